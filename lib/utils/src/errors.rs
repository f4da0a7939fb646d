use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use http::status::StatusCode;
use leptos::prelude::*;
use leptos::{component, view, IntoView};
use leptos::server_fn::codec::JsonEncoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::icons::{AuthErrorIcon, InternalErrorIcon, InvalidRequestIcon, NetworkErrorIcon, NotAuthorizedIcon, NotFoundIcon, TooHeavyIcon};

const NOT_AUTHENTICATED_MESSAGE: &str = "Please authenticate yourself.";
const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong.";
const NOT_AUTHORIZED_MESSAGE: &str = "You're in a restricted area, please do not resist.";
const BAD_REQUEST_MESSAGE: &str = "Sorry, we didn't understand your request.";
const UNAVAILABLE_MESSAGE: &str = "Sorry, we've got noise on the line.";
const NOT_FOUND_MESSAGE: &str = "There's nothing here";

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    NotAuthenticated,
    InsufficientPrivileges,
    CommunicationError(ServerFnErrorErr),
    BackendError(u16, String),
    InvalidRequest(String),
    InternalServerError(String),
    NotFound,
    PayloadTooLarge(usize),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotAuthenticated | AppError::InsufficientPrivileges => StatusCode::FORBIDDEN,
            AppError::CommunicationError(error) => match error {
                ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) | ServerFnErrorErr::Serialization(_) | ServerFnErrorErr::Deserialization(_) => StatusCode::BAD_REQUEST,
                ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BackendError(status, _) => match StatusCode::from_u16(*status) {
                Ok(status) if status.is_client_error() => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::NotAuthenticated => String::from(NOT_AUTHENTICATED_MESSAGE),
            AppError::InsufficientPrivileges => String::from(NOT_AUTHORIZED_MESSAGE),
            AppError::CommunicationError(error) => match error {
                ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) |
                ServerFnErrorErr::Serialization(_) | ServerFnErrorErr::Deserialization(_) => String::from(BAD_REQUEST_MESSAGE),
                ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => String::from(UNAVAILABLE_MESSAGE),
                _ => String::from(INTERNAL_ERROR_MESSAGE),
            },
            AppError::BackendError(status, _) if StatusCode::from_u16(*status).is_ok_and(|status| status.is_client_error()) => String::from(BAD_REQUEST_MESSAGE),
            AppError::BackendError(_, _) => String::from(UNAVAILABLE_MESSAGE),
            AppError::InvalidRequest(_) => String::from(BAD_REQUEST_MESSAGE),
            AppError::InternalServerError(_) => String::from(INTERNAL_ERROR_MESSAGE),
            AppError::NotFound => String::from(NOT_FOUND_MESSAGE),
            AppError::PayloadTooLarge(byte_limit) => format!("Payload exceeds the {byte_limit} Bytes limit."),
        }
    }

    pub fn error_detail(&self) -> String {
        match self {
            AppError::NotAuthenticated => String::from(NOT_AUTHENTICATED_MESSAGE),
            AppError::InsufficientPrivileges => String::from("Insufficient privileges"),
            AppError::CommunicationError(error) => match error {
                ServerFnErrorErr::Args(e) | ServerFnErrorErr::MissingArg(e) |
                ServerFnErrorErr::Serialization(e) | ServerFnErrorErr::Deserialization(e) => e.clone(),
                ServerFnErrorErr::Registration(e) | ServerFnErrorErr::Request(e) | ServerFnErrorErr::Response(e) => e.clone(),
                _ => String::from(INTERNAL_ERROR_MESSAGE),
            },
            AppError::BackendError(status, body) => format!("API responded with status {status}: {body}"),
            AppError::InvalidRequest(e) | AppError::InternalServerError(e) => e.clone(),
            AppError::NotFound => String::from(NOT_FOUND_MESSAGE),
            AppError::PayloadTooLarge(byte_limit) => format!("Payload exceeds the {byte_limit} Bytes limit."),
        }
    }

    /// Constructs a new [`AppError::InternalServerError`] from some other type.
    pub fn new(msg: impl ToString) -> Self {
        Self::InternalServerError(msg.to_string())
    }

    /// Maps a non-success status returned by the comment API to an error
    pub fn from_api_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::NotAuthenticated,
            StatusCode::FORBIDDEN => AppError::InsufficientPrivileges,
            StatusCode::NOT_FOUND => AppError::NotFound,
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(body.parse::<usize>().unwrap_or_default()),
            _ => AppError::BackendError(status.as_u16(), body),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

impl FromStr for AppError {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl FromServerFnError for AppError {
    type Encoder = JsonEncoding;

    fn from_server_fn_error(error: ServerFnErrorErr) -> Self {
        match error {
            ServerFnErrorErr::ServerError(message) => serde_json::from_str(message.as_str()).unwrap_or(AppError::InternalServerError(message.clone())),
            _ => AppError::CommunicationError(error),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(feature = "ssr")]
mod ssr {
    use crate::errors::AppError;

    impl From<std::env::VarError> for AppError {
        fn from(error: std::env::VarError) -> Self {
            AppError::InternalServerError(error.to_string())
        }
    }

    impl From<reqwest::Error> for AppError {
        fn from(error: reqwest::Error) -> Self {
            match error.status() {
                Some(status) => AppError::from_api_status(status, error.to_string()),
                None => AppError::BackendError(
                    http::StatusCode::BAD_GATEWAY.as_u16(),
                    error.to_string()
                ),
            }
        }
    }
}

#[component]
pub fn AppErrorIcon(
    app_error: AppError,
) -> impl IntoView {
    match app_error {
        AppError::NotAuthenticated => view! { <AuthErrorIcon/> }.into_any(),
        AppError::InsufficientPrivileges => view! { <NotAuthorizedIcon/> }.into_any(),
        AppError::CommunicationError(error) => match error {
            ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) => view! { <InvalidRequestIcon/> }.into_any(),
            ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => view! { <NetworkErrorIcon/> }.into_any(),
            _ => view! { <InternalErrorIcon/> }.into_any(),
        },
        AppError::BackendError(_, _) => view! { <NetworkErrorIcon/> }.into_any(),
        AppError::InvalidRequest(_) => view! { <InvalidRequestIcon/> }.into_any(),
        AppError::InternalServerError(_) => view! { <InternalErrorIcon/> }.into_any(),
        AppError::NotFound => view! { <NotFoundIcon/> }.into_any(),
        AppError::PayloadTooLarge(_) => view! { <TooHeavyIcon/> }.into_any(),
    }
}

/// Displays an error
#[component]
pub fn ErrorDisplay(
    error: AppError
) -> impl IntoView {
    let error_string = error.to_string();
    let status_code =  error.status_code().as_u16();
    let user_message = error.user_message();

    log::error!("Caught error, status_code: {status_code}, error message: {error_string}");
    view! {
        <div class="w-full flex items-center gap-2 justify-center">
            <AppErrorIcon app_error=error/>
            <div class="flex flex-col">
                <h2 class="text-2xl">{status_code}</h2>
                <h3 class="text-xl">{user_message}</h3>
            </div>
        </div>
    }.into_any()
}
