use axum::extract::FromRef;
use leptos::prelude::LeptosOptions;
use leptos_axum::AxumRouteListing;

use postline_utils::api::ssr::ApiConfig;

/// Shared state of the axum router, from which the leptos options and api configuration are extracted
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub api_config: ApiConfig,
    pub routes: Vec<AxumRouteListing>,
}
