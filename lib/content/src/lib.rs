pub mod comment;
pub mod notification;
