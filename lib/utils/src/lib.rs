#![recursion_limit = "256"]
pub mod api;
pub mod constants;
pub mod errors;
pub mod error_template;
pub mod icons;
pub mod image;
pub mod routes;
pub mod widget;
