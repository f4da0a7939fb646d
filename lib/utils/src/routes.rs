use const_format::concatcp;
use leptos::prelude::{Memo, Read};
use leptos_router::params::ParamsMap;

pub const POST_ROUTE_PREFIX: &str = "/posts";
pub const POST_ROUTE_PARAM_NAME: &str = "post_id";
pub const PROFILE_ROUTE_PREFIX: &str = "/profile";
pub const PROFILE_ROUTE_PARAM_NAME: &str = "user_id";

pub const API_POSTS_SEGMENT: &str = "posts";
pub const API_COMMENTS_SEGMENT: &str = "comments";
pub const API_USERS_SEGMENT: &str = "users";
pub const CURRENT_USER_API_PATH: &str = concatcp!(API_USERS_SEGMENT, "/me");

/// # Returns the path to a user's profile given its id
///
/// ```
/// use postline_utils::routes::get_profile_path;
///
/// assert_eq!(get_profile_path(7), "/profile/7");
/// ```
pub fn get_profile_path(
    user_id: i64,
) -> String {
    format!("{PROFILE_ROUTE_PREFIX}/{user_id}")
}

/// # Returns the API path listing or creating the comments of a post
///
/// ```
/// use postline_utils::routes::get_post_comments_api_path;
///
/// assert_eq!(get_post_comments_api_path(3), "posts/3/comments");
/// ```
pub fn get_post_comments_api_path(
    post_id: i64,
) -> String {
    format!("{API_POSTS_SEGMENT}/{post_id}/{API_COMMENTS_SEGMENT}")
}

/// # Returns the API path of a single comment
///
/// ```
/// use postline_utils::routes::get_comment_api_path;
///
/// assert_eq!(get_comment_api_path(12), "comments/12");
/// ```
pub fn get_comment_api_path(
    comment_id: i64,
) -> String {
    format!("{API_COMMENTS_SEGMENT}/{comment_id}")
}

fn parse_id_param(params: &ParamsMap, param_name: &str) -> Option<i64> {
    params.get_str(param_name).and_then(|value| value.parse::<i64>().ok())
}

/// Get a memo returning the last valid post id from the url. Used to avoid triggering resources when leaving pages
pub fn get_post_id_memo(params: Memo<ParamsMap>) -> Memo<i64> {
    Memo::new(move |current_post_id: Option<&i64>| {
        match parse_id_param(&params.read(), POST_ROUTE_PARAM_NAME) {
            Some(new_post_id) => {
                log::trace!("Current post id: {current_post_id:?}, new post id: {new_post_id}");
                new_post_id
            },
            None => {
                log::trace!("Could not find valid post id, reuse current post id: {current_post_id:?}");
                current_post_id.cloned().unwrap_or_default()
            }
        }
    })
}

/// Get a memo returning the last valid user id from the url.
pub fn get_user_id_memo(params: Memo<ParamsMap>) -> Memo<i64> {
    Memo::new(move |current_user_id: Option<&i64>| {
        match parse_id_param(&params.read(), PROFILE_ROUTE_PARAM_NAME) {
            Some(new_user_id) => new_user_id,
            None => {
                log::trace!("Could not find valid user id, reuse current user id: {current_user_id:?}");
                current_user_id.cloned().unwrap_or_default()
            }
        }
    })
}
