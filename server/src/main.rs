#![recursion_limit = "256"]
use axum::{body::Body as AxumBody, extract::{Path, State}, http::Request, response::{IntoResponse, Response}, routing::get, Router};
use axum::body::Body;
use axum::http::HeaderValue;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};

use postline_app::app::*;
use postline_utils::api::ssr::ApiConfig;
use crate::fallback::file_and_error_handler;
use crate::state::AppState;

mod fallback;
mod state;

async fn server_fn_handler(
    State(app_state): State<AppState>,
    path: Path<String>,
    request: Request<AxumBody>,
) -> impl IntoResponse {
    log::info!("Serve fn handler for path: {path:?}");

    handle_server_fns_with_context(
        move || {
            provide_context(app_state.api_config.clone());
        },
        request,
    ).await
}

async fn leptos_routes_handler(
    app_state: State<AppState>,
    req: Request<AxumBody>,
) -> Response {
    let leptos_options = app_state.leptos_options.clone();
    let api_config = app_state.api_config.clone();

    log::info!("leptos_routes_handler for uri: {:?}", req.uri());
    let handler = leptos_axum::render_route_with_context(
        app_state.routes.clone(),
        move || {
            provide_context(api_config.clone());
        },
        move || shell(leptos_options.clone()),
    );
    let mut response = handler(app_state, req).await.into_response();
    add_security_headers(&mut response);
    response
}

fn add_security_headers(response: &mut Response<Body>) {
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("strict-origin-when-cross-origin"));
    headers.insert("Permissions-Policy", HeaderValue::from_static("geolocation=(), microphone=(), camera=(), fullscreen=(self)"));
    headers.insert("Cross-Origin-Opener-Policy", HeaderValue::from_static("same-origin"));
    headers.insert("Cross-Origin-Resource-Policy", HeaderValue::from_static("same-origin"));
    headers.insert("X-XSS-Protection", HeaderValue::from_static("0"));
    headers.insert(
        "Strict-Transport-Security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::ERROR).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api_config = ApiConfig::from_env()?;
    log::info!("Forwarding comment requests to {}", api_config.base_url);

    // Setting get_configuration(None) means we'll be using cargo-leptos's env values
    let conf = get_configuration(None)?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app_state = AppState {
        leptos_options: leptos_options.clone(),
        api_config,
        routes: routes.clone(),
    };

    let app = Router::new()
        .route(
            "/api/{id}",
            get(server_fn_handler).post(server_fn_handler)
        )
        .leptos_routes_with_handler(routes, get(leptos_routes_handler))
        .fallback(file_and_error_handler)
        .with_state(app_state);

    log::info!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::Response;

    use super::*;

    #[test]
    fn test_add_security_headers() {
        let mut response = Response::new(Body::empty());
        add_security_headers(&mut response);
        let headers = response.headers();
        assert_eq!(headers.get("X-Frame-Options"), Some(&HeaderValue::from_static("DENY")));
        assert_eq!(headers.get("X-Content-Type-Options"), Some(&HeaderValue::from_static("nosniff")));
        assert!(headers.contains_key("Strict-Transport-Security"));
    }
}
