pub const DEFAULT_AVATAR_PATH: &str = "/default-avatar.png";
pub const AVATAR_ALT_TEXT: &str = "User";
pub const ANONYMOUS_USER_NAME: &str = "Anonymous User";


pub const ERROR_NOTIFICATION_DURATION_MS: u64 = 6000;
pub const SUCCESS_NOTIFICATION_DURATION_MS: u64 = 3000;


pub const COMMENT_CREATED_MESSAGE: &str = "Comment added successfully!";
pub const COMMENT_CREATE_FAILED_MESSAGE: &str = "Failed to add comment. Please try again.";
pub const COMMENT_UPDATED_MESSAGE: &str = "Comment updated successfully!";
pub const COMMENT_UPDATE_FAILED_MESSAGE: &str = "Failed to update comment. Please try again.";
pub const COMMENT_DELETED_MESSAGE: &str = "Comment deleted successfully!";
pub const COMMENT_DELETE_FAILED_MESSAGE: &str = "Failed to delete comment. Please try again.";
pub const COMMENTS_LOAD_FAILED_MESSAGE: &str = "Failed to load comments.";
pub const COMMENTS_LOAD_FAILED_NOTIFICATION: &str = "Failed to load comments. Please try again.";
pub const NO_COMMENTS_MESSAGE: &str = "No comments yet. Be the first to comment!";
pub const COMPOSER_PLACEHOLDER: &str = "Add a comment...";


pub const COMMENT_TIMESTAMP_FORMAT: &str = "%b %-d, %Y • %-I:%M %p";
