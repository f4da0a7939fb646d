pub mod cache;
pub mod comment;
pub mod notification;
pub mod state;
pub mod thread;
