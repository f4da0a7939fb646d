#[cfg(feature = "ssr")]
use http::StatusCode;
use leptos::prelude::*;

use crate::errors::{AppError, ErrorDisplay};

/// Displays the errors caught by an error boundary or the router fallback
#[component]
pub fn ErrorTemplate(
    #[prop(optional)] outside_errors: Option<Errors>,
    #[prop(optional)] errors: Option<ArcRwSignal<Errors>>,
) -> impl IntoView {
    let errors = match (outside_errors, errors) {
        (Some(outside_errors), _) => outside_errors,
        (None, Some(errors)) => errors.get_untracked(),
        (None, None) => {
            log::error!("Error template rendered without errors.");
            Errors::default()
        }
    };

    let errors: Vec<AppError> = errors
        .into_iter()
        .map(|(_key, error)| error.downcast_ref::<AppError>().cloned().unwrap_or_else(|| AppError::new(error)))
        .collect();
    log::debug!("Error template: {errors:?}");

    // only the status of the first error is sent with the response
    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let Some(response) = use_context::<ResponseOptions>() {
            let status_code = match errors.first() {
                Some(error) => error.status_code(),
                None => StatusCode::INTERNAL_SERVER_ERROR,
            };
            response.set_status(status_code);
        }
    }

    view! {
        <div class="w-full h-full flex flex-col items-center justify-center">
            <For
                each= move || {errors.clone().into_iter().enumerate()}
                key=|(index, _error)| *index
                children=move |(_, error)| {
                    view! { <ErrorDisplay error/> }
                }
            />
        </div>
    }
}
