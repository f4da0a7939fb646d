pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const API_TIMEOUT_S_ENV: &str = "API_TIMEOUT_S";
pub const DEFAULT_API_TIMEOUT_S: u64 = 30;

#[cfg(feature = "ssr")]
pub mod ssr {
    use std::env;
    use std::time::Duration;

    use reqwest::{Client, RequestBuilder, Response};
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use url::Url;

    use crate::errors::AppError;

    use super::*;

    /// Connection settings of the comment API, shared by all requests of the server
    #[derive(Clone, Debug)]
    pub struct ApiConfig {
        pub http_client: Client,
        pub base_url: Url,
    }

    impl ApiConfig {
        pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
            let base_url = Url::parse(base_url)?;
            let http_client = reqwest::ClientBuilder::new()
                .timeout(timeout)
                .build()?;
            Ok(ApiConfig { http_client, base_url })
        }

        pub fn from_env() -> Result<Self, AppError> {
            let base_url = env::var(API_BASE_URL_ENV)?;
            let timeout = parse_timeout(env::var(API_TIMEOUT_S_ENV).ok().as_deref());
            log::info!("Comment API at {base_url}, timeout {timeout:?}");
            Self::new(&base_url, timeout)
        }

        /// Returns the absolute url of `path` relative to the API base url
        pub fn endpoint(&self, path: &str) -> Url {
            let base_path = self.base_url.path().trim_end_matches('/');
            let mut url = self.base_url.clone();
            url.set_path(&format!("{base_path}/{}", path.trim_start_matches('/')));
            url
        }
    }

    pub fn parse_timeout(timeout_s: Option<&str>) -> Duration {
        let timeout_s = match timeout_s.map(str::trim) {
            Some(value) => value.parse::<u64>().unwrap_or_else(|e| {
                log::warn!("Invalid {API_TIMEOUT_S_ENV} value {value}: {e}, using default.");
                DEFAULT_API_TIMEOUT_S
            }),
            None => DEFAULT_API_TIMEOUT_S,
        };
        Duration::from_secs(timeout_s)
    }

    /// Client of the comment API for a single incoming request, forwarding its bearer token
    #[derive(Clone, Debug)]
    pub struct ApiClient {
        pub config: ApiConfig,
        pub bearer_token: Option<String>,
    }

    impl ApiClient {
        pub fn new(config: ApiConfig, bearer_token: Option<String>) -> Self {
            ApiClient { config, bearer_token }
        }

        pub fn has_token(&self) -> bool {
            self.bearer_token.is_some()
        }

        fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
            match &self.bearer_token {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        }

        pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
            let url = self.config.endpoint(path);
            log::debug!("GET {url}");
            let response = self.authorize(self.config.http_client.get(url)).send().await?;
            Ok(check_status(response).await?.json::<T>().await?)
        }

        pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
            let url = self.config.endpoint(path);
            log::debug!("POST {url}");
            let response = self.authorize(self.config.http_client.post(url).json(body)).send().await?;
            check_status(response).await?;
            Ok(())
        }

        pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
            let url = self.config.endpoint(path);
            log::debug!("PUT {url}");
            let response = self.authorize(self.config.http_client.put(url).json(body)).send().await?;
            check_status(response).await?;
            Ok(())
        }

        pub async fn delete(&self, path: &str) -> Result<(), AppError> {
            let url = self.config.endpoint(path);
            log::debug!("DELETE {url}");
            let response = self.authorize(self.config.http_client.delete(url)).send().await?;
            check_status(response).await?;
            Ok(())
        }
    }

    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::error!("Comment API responded with status {status}: {body}");
            Err(AppError::from_api_status(status, body))
        }
    }

}
