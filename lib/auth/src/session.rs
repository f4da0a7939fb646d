pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const BEARER_PREFIX: &str = "Bearer ";

#[cfg(feature = "ssr")]
pub mod ssr {
    use std::env;

    use http::header::{AUTHORIZATION, COOKIE};
    use http::request::Parts;
    use http::HeaderMap;
    use leptos::prelude::use_context;

    use postline_utils::api::ssr::{ApiClient, ApiConfig};
    use postline_utils::errors::AppError;

    use super::*;

    pub const LEPTOS_ENV_KEY: &str = "LEPTOS_ENV";

    pub fn get_api_config() -> Result<ApiConfig, AppError> {
        use_context::<ApiConfig>().ok_or_else(|| AppError::new("Api config missing."))
    }

    /// Builds a client of the comment API forwarding the bearer token of the current request
    pub fn get_api_client() -> Result<ApiClient, AppError> {
        let config = get_api_config()?;
        let bearer_token = use_context::<Parts>().and_then(|parts| bearer_token_from_headers(&parts.headers));
        Ok(ApiClient::new(config, bearer_token))
    }

    pub fn is_prod_mode() -> bool {
        env::var(LEPTOS_ENV_KEY).is_ok_and(|leptos_env| leptos_env == "PROD" )
    }

    /// Returns the bearer token from the `Authorization` header, or else from the auth token cookie
    pub fn bearer_token_from_headers(headers: &HeaderMap) -> Option<String> {
        let header_token = headers.get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        match header_token {
            Some(token) => Some(token.to_string()),
            None => headers.get_all(COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .flat_map(|cookies| cookies.split(';'))
                .filter_map(|cookie| cookie.trim().split_once('='))
                .find(|(name, value)| *name == AUTH_TOKEN_COOKIE && !value.is_empty())
                .map(|(_, value)| value.to_string()),
        }
    }

}
