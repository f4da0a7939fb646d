use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, MetaTags, Stylesheet, Title};
use leptos_router::hooks::use_params_map;
use leptos_router::{components::{Route, Router, Routes}, ParamSegment, StaticSegment};

use postline_auth::user::UserState;
use postline_content::comment::CommentSection;
use postline_core::state::GlobalState;
use postline_utils::error_template::ErrorTemplate;
use postline_utils::errors::AppError;
use postline_utils::routes::{get_post_id_memo, get_user_id_memo, POST_ROUTE_PARAM_NAME, POST_ROUTE_PREFIX, PROFILE_ROUTE_PARAM_NAME, PROFILE_ROUTE_PREFIX};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Meta
                    http_equiv="Content-Security-Policy"
                    content=move || {
                        // inserts the CSP with nonce on the server, empty on the client
                        use_nonce().map(|nonce| {
                            format!(
                                "default-src 'self';
                                script-src 'strict-dynamic' 'nonce-{nonce}' 'wasm-unsafe-eval';
                                img-src 'self' http: https: data:;
                                style-src 'self' 'nonce-{nonce}';
                                connect-src 'self' ws://localhost:3001/ ws://127.0.0.1:3001/;"
                            )
                        }).unwrap_or_default()
                    }
                />
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    provide_context(UserState::new());
    provide_context(GlobalState::new());

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/postline.css"/>
        <Title text="Postline"/>
        <Router>
            <main class="min-h-screen flex justify-center p-2">
                <Routes fallback=|| {
                    let mut outside_errors = Errors::default();
                    outside_errors.insert_with_default_key(AppError::NotFound);
                    view! {
                        <ErrorTemplate outside_errors/>
                    }
                }>
                    <Route path=(StaticSegment(POST_ROUTE_PREFIX), ParamSegment(POST_ROUTE_PARAM_NAME)) view=PostPage/>
                    <Route path=(StaticSegment(PROFILE_ROUTE_PREFIX), ParamSegment(PROFILE_ROUTE_PARAM_NAME)) view=ProfilePage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Page of a post, hosting its comment section
#[component]
fn PostPage() -> impl IntoView {
    let post_id = get_post_id_memo(use_params_map());

    view! {
        <div class="flex flex-col gap-3 w-full lg:w-3/5 2xl:w-2/5">
            <h2 class="text-xl font-bold">"Comments"</h2>
            <CommentSection post_id/>
        </div>
    }
}

/// Landing page of a user's profile
#[component]
fn ProfilePage() -> impl IntoView {
    let user_id = get_user_id_memo(use_params_map());

    view! {
        <div class="flex flex-col gap-3 w-full lg:w-3/5 2xl:w-2/5">
            <h2 class="text-xl font-bold">{move || format!("Profile of user {}", user_id.get())}</h2>
        </div>
    }
}
