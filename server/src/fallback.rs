use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode, Uri},
    response::{IntoResponse, Response as AxumResponse},
};
use axum::http::{header, HeaderValue};
use leptos::prelude::{Errors, LeptosOptions};
use leptos::view;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

use postline_auth::session::ssr::is_prod_mode;
use postline_utils::error_template::ErrorTemplate;
use postline_utils::errors::AppError;

pub async fn file_and_error_handler(
    uri: Uri,
    State(options): State<LeptosOptions>,
    req: Request<Body>,
) -> AxumResponse {
    let root = options.site_root.clone();
    match get_static_file(uri, &root).await {
        Ok(res) if res.status() == StatusCode::OK => res.into_response(),
        result => {
            if let Err(error) = result {
                log::error!("Failed to serve static file: {error}");
            }
            let mut errors = Errors::default();
            errors.insert_with_default_key(AppError::NotFound);
            let handler = leptos_axum::render_app_to_stream(
                move || view! {<ErrorTemplate outside_errors=errors.clone()/>},
            );
            handler(req).await.into_response()
        }
    }
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response<Body>, axum::http::Error> {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())?;

    let mut response = ServeDir::new(root)
        .oneshot(req)
        .await
        .unwrap_or_else(|err| match err {})
        .into_response();

    if is_prod_mode() {
        response.headers_mut().append(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=31536000, immutable"));
    }

    Ok(response)
}
