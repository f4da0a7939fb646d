use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use postline_utils::constants::ANONYMOUS_USER_NAME;
use postline_utils::errors::AppError;

#[cfg(feature = "ssr")]
use postline_auth::session::ssr::get_api_client;

const COMMENT_PAGE_CONTENT_KEY: &str = "content";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "profilePicture")]
    pub user_profile_picture: Option<String>,
}

/// Body of the comment create and update requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentContent {
    pub content: String,
}

/// Shapes of the comment list returned by the API. A page or list with a malformed comment fails to decode.
#[derive(Clone, Debug, PartialEq)]
pub enum CommentListPayload {
    Page { content: Vec<Comment> },
    List(Vec<Comment>),
    Unrecognized(serde_json::Value),
}

impl Comment {
    pub fn display_name(&self) -> &str {
        match self.user_name.trim() {
            "" => ANONYMOUS_USER_NAME,
            name => name,
        }
    }

    pub fn handle(&self) -> Option<String> {
        self.username.as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .map(|username| format!("@{username}"))
    }
}

impl CommentListPayload {
    pub fn into_comments(self) -> Vec<Comment> {
        match self {
            CommentListPayload::Page { content } => content,
            CommentListPayload::List(comments) => comments,
            CommentListPayload::Unrecognized(value) => {
                log::warn!("Unrecognized comment list payload, defaulting to empty list: {value}");
                Vec::new()
            }
        }
    }
}

impl<'de> Deserialize<'de> for CommentListPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Array(_) => Vec::<Comment>::deserialize(value)
                .map(CommentListPayload::List)
                .map_err(serde::de::Error::custom),
            serde_json::Value::Object(mut page) if page.contains_key(COMMENT_PAGE_CONTENT_KEY) => {
                let content = page.remove(COMMENT_PAGE_CONTENT_KEY).unwrap_or_default();
                Vec::<Comment>::deserialize(content)
                    .map(|content| CommentListPayload::Page { content })
                    .map_err(serde::de::Error::custom)
            },
            value => Ok(CommentListPayload::Unrecognized(value)),
        }
    }
}

/// Accepts RFC 3339 timestamps as well as zone-less date-times, read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamp = String::deserialize(deserializer)?;
    parse_timestamp(&timestamp).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|timestamp| timestamp.and_utc())
        .map_err(|e| format!("Invalid timestamp {timestamp}: {e}"))
}

/// Returns the trimmed content of a comment, or an error if it is blank
pub fn validate_comment_content(content: &str) -> Result<String, AppError> {
    match content.trim() {
        "" => Err(AppError::InvalidRequest(String::from("Cannot submit an empty comment."))),
        content => Ok(content.to_string()),
    }
}

#[cfg(feature = "ssr")]
pub mod ssr {
    use postline_utils::api::ssr::ApiClient;
    use postline_utils::errors::AppError;
    use postline_utils::image::resolve_image_url;
    use postline_utils::routes::{get_comment_api_path, get_post_comments_api_path};

    use super::*;

    pub async fn get_post_comments(
        post_id: i64,
        api_client: &ApiClient,
    ) -> Result<Vec<Comment>, AppError> {
        let payload = api_client.get_json::<CommentListPayload>(&get_post_comments_api_path(post_id)).await?;
        let base_url = &api_client.config.base_url;
        let comments = payload.into_comments()
            .into_iter()
            .map(|mut comment| {
                comment.user_profile_picture = resolve_image_url(base_url, comment.user_profile_picture.as_deref());
                comment
            })
            .collect();
        Ok(comments)
    }

    pub async fn create_comment(
        post_id: i64,
        content: &str,
        api_client: &ApiClient,
    ) -> Result<(), AppError> {
        let body = CommentContent { content: validate_comment_content(content)? };
        api_client.post_json(&get_post_comments_api_path(post_id), &body).await
    }

    pub async fn update_comment(
        comment_id: i64,
        content: &str,
        api_client: &ApiClient,
    ) -> Result<(), AppError> {
        let body = CommentContent { content: validate_comment_content(content)? };
        api_client.put_json(&get_comment_api_path(comment_id), &body).await
    }

    pub async fn delete_comment(
        comment_id: i64,
        api_client: &ApiClient,
    ) -> Result<(), AppError> {
        api_client.delete(&get_comment_api_path(comment_id)).await
    }
}

#[server]
pub async fn get_post_comments(
    post_id: i64,
) -> Result<Vec<Comment>, AppError> {
    log::trace!("Get comments of post {post_id}");
    let api_client = get_api_client()?;
    ssr::get_post_comments(post_id, &api_client).await
}

#[server]
pub async fn create_comment(
    post_id: i64,
    content: String,
) -> Result<(), AppError> {
    log::trace!("Create comment for post {post_id}");
    let api_client = get_api_client()?;
    ssr::create_comment(post_id, &content, &api_client).await
}

#[server]
pub async fn edit_comment(
    comment_id: i64,
    content: String,
) -> Result<(), AppError> {
    log::trace!("Edit comment {comment_id}");
    let api_client = get_api_client()?;
    ssr::update_comment(comment_id, &content, &api_client).await
}

#[server]
pub async fn delete_comment(
    comment_id: i64,
) -> Result<(), AppError> {
    log::trace!("Delete comment {comment_id}");
    let api_client = get_api_client()?;
    ssr::delete_comment(comment_id, &api_client).await
}
