#![cfg(feature = "ssr")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use postline_core::comment::ssr::{create_comment, delete_comment, get_post_comments, update_comment};
use postline_utils::api::ssr::{ApiClient, ApiConfig};
use postline_utils::errors::AppError;

const TOKEN: &str = "valid_token";

#[derive(Clone, Default)]
struct FakeApi {
    comments: Arc<Mutex<Vec<Value>>>,
    received_bodies: Arc<Mutex<Vec<Value>>>,
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|value| value.to_str().ok()) == Some("Bearer valid_token")
}

async fn list_comments(Path(post_id): Path<i64>, State(api): State<FakeApi>) -> (StatusCode, Json<Value>) {
    let comments = api.comments.lock().expect("Should lock comments").clone();
    match post_id {
        1 => (StatusCode::OK, Json(json!({ "content": comments, "totalElements": comments.len() }))),
        2 => (StatusCode::OK, Json(Value::Array(comments))),
        3 => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        5 => (StatusCode::OK, Json(json!([
            { "id": 1, "userId": 1, "userName": "Ada", "content": "fine", "createdAt": "2024-03-05T15:07:00Z" },
            { "id": 2, "userId": 1, "userName": "Ada", "content": "broken", "createdAt": null },
        ]))),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Post not found" }))),
    }
}

async fn add_comment(
    Path(post_id): Path<i64>,
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    api.received_bodies.lock().expect("Should lock bodies").push(body.clone());
    let mut comments = api.comments.lock().expect("Should lock comments");
    let id = comments.len() as i64 + 1;
    comments.push(json!({
        "id": id,
        "userId": 1,
        "userName": "Ada",
        "content": body["content"],
        "createdAt": format!("2024-03-05T15:0{id}:00"),
        "postId": post_id,
    }));
    StatusCode::CREATED
}

async fn edit_comment(
    Path(comment_id): Path<i64>,
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    api.received_bodies.lock().expect("Should lock bodies").push(body.clone());
    let mut comments = api.comments.lock().expect("Should lock comments");
    match comments.iter_mut().find(|comment| comment["id"] == json!(comment_id)) {
        Some(comment) => {
            comment["content"] = body["content"].clone();
            StatusCode::OK
        },
        None => StatusCode::NOT_FOUND,
    }
}

async fn remove_comment(
    Path(comment_id): Path<i64>,
    State(api): State<FakeApi>,
    headers: HeaderMap,
) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let mut comments = api.comments.lock().expect("Should lock comments");
    let author_id = comments.iter()
        .find(|comment| comment["id"] == json!(comment_id))
        .map(|comment| comment["userId"].clone());
    match author_id {
        Some(author_id) if author_id != json!(1) => StatusCode::FORBIDDEN,
        Some(_) => {
            comments.retain(|comment| comment["id"] != json!(comment_id));
            StatusCode::NO_CONTENT
        },
        None => StatusCode::NOT_FOUND,
    }
}

async fn start_fake_api() -> (FakeApi, ApiConfig) {
    let api = FakeApi::default();
    let router = Router::new()
        .route("/api/posts/{post_id}/comments", get(list_comments).post(add_comment))
        .route("/api/comments/{comment_id}", put(edit_comment).delete(remove_comment))
        .with_state(api.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Should bind listener");
    let address = listener.local_addr().expect("Should get local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Fake API should run");
    });
    let config = ApiConfig::new(&format!("http://{address}/api"), Duration::from_secs(5)).expect("Should create api config");
    (api, config)
}

#[tokio::test]
async fn test_comment_lifecycle() -> Result<(), AppError> {
    let (api, config) = start_fake_api().await;
    let api_client = ApiClient::new(config, Some(String::from(TOKEN)));

    assert!(get_post_comments(1, &api_client).await?.is_empty());

    create_comment(1, "  first  ", &api_client).await?;
    create_comment(1, "second", &api_client).await?;
    let comments = get_post_comments(1, &api_client).await?;
    assert_eq!(comments.iter().map(|comment| comment.content.as_str()).collect::<Vec<&str>>(), vec!["first", "second"]);
    assert_eq!(api.received_bodies.lock().expect("Should lock bodies")[0], json!({ "content": "first" }));

    update_comment(comments[0].id, " edited ", &api_client).await?;
    let comments = get_post_comments(2, &api_client).await?;
    assert_eq!(comments[0].content, "edited");

    delete_comment(comments[0].id, &api_client).await?;
    let comments = get_post_comments(1, &api_client).await?;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "second");

    Ok(())
}

#[tokio::test]
async fn test_unrecognized_list_shape_is_empty() -> Result<(), AppError> {
    let (_, config) = start_fake_api().await;
    let api_client = ApiClient::new(config, None);
    assert!(get_post_comments(3, &api_client).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_comment_fails_list() {
    let (_, config) = start_fake_api().await;
    let api_client = ApiClient::new(config, None);
    assert!(get_post_comments(5, &api_client).await.is_err());
}

#[tokio::test]
async fn test_failed_delete_keeps_comment() -> Result<(), AppError> {
    let (api, config) = start_fake_api().await;
    let api_client = ApiClient::new(config, Some(String::from(TOKEN)));

    create_comment(1, "mine", &api_client).await?;
    api.comments.lock().expect("Should lock comments").push(json!({
        "id": 2,
        "userId": 2,
        "userName": "Bob",
        "content": "not mine",
        "createdAt": "2024-03-05T16:00:00",
    }));

    assert_eq!(delete_comment(2, &api_client).await, Err(AppError::InsufficientPrivileges));
    let comments = get_post_comments(1, &api_client).await?;
    assert_eq!(comments.iter().map(|comment| comment.id).collect::<Vec<i64>>(), vec![1, 2]);
    assert_eq!(comments[1].content, "not mine");

    delete_comment(1, &api_client).await?;
    let comments = get_post_comments(1, &api_client).await?;
    assert_eq!(comments.iter().map(|comment| comment.id).collect::<Vec<i64>>(), vec![2]);
    Ok(())
}

#[tokio::test]
async fn test_api_errors() {
    let (api, config) = start_fake_api().await;
    let anonymous_client = ApiClient::new(config.clone(), None);
    let api_client = ApiClient::new(config, Some(String::from(TOKEN)));

    assert_eq!(get_post_comments(4, &anonymous_client).await, Err(AppError::NotFound));
    assert_eq!(create_comment(1, "hello", &anonymous_client).await, Err(AppError::NotAuthenticated));
    assert_eq!(delete_comment(99, &api_client).await, Err(AppError::NotFound));
    assert_eq!(update_comment(42, "hello", &api_client).await, Err(AppError::NotFound));

    assert!(matches!(create_comment(1, "   ", &api_client).await, Err(AppError::InvalidRequest(_))));
    assert!(matches!(update_comment(1, "\n", &api_client).await, Err(AppError::InvalidRequest(_))));
    assert!(api.received_bodies.lock().expect("Should lock bodies").is_empty());
}
