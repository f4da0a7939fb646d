use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use postline_utils::errors::AppError;

#[cfg(feature = "ssr")]
use crate::session::ssr::get_api_client;

/// User of the current session, as returned by the authentication service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "userId")]
    pub id: i64,
    #[serde(default, alias = "userName")]
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Copy, Clone)]
pub struct UserState {
    pub user: Resource<Result<Option<SessionUser>, AppError>>,
}

impl UserState {
    pub fn new() -> Self {
        UserState {
            user: Resource::new(|| (), |_| get_session_user()),
        }
    }
}

#[cfg(feature = "ssr")]
pub mod ssr {
    use url::Url;

    use postline_utils::image::resolve_image_url;

    use super::*;

    impl SessionUser {
        /// Replaces the avatar reference by an url usable by the browser
        pub fn with_resolved_avatar(mut self, base_url: &Url) -> Self {
            self.profile_picture = resolve_image_url(base_url, self.profile_picture.as_deref());
            self
        }
    }

    /// Maps the outcome of the session lookup, a missing or rejected token means there is no session user
    pub fn into_optional_user(result: Result<SessionUser, AppError>) -> Result<Option<SessionUser>, AppError> {
        match result {
            Ok(user) => Ok(Some(user)),
            Err(AppError::NotAuthenticated | AppError::InsufficientPrivileges) => Ok(None),
            Err(e) => Err(e),
        }
    }

}

#[server]
pub async fn get_session_user() -> Result<Option<SessionUser>, AppError> {
    use postline_utils::routes::CURRENT_USER_API_PATH;

    let api_client = get_api_client()?;
    if !api_client.has_token() {
        log::trace!("No bearer token, no session user.");
        return Ok(None);
    }
    let user = ssr::into_optional_user(
        api_client.get_json::<SessionUser>(CURRENT_USER_API_PATH).await
    )?;
    log::trace!("Session user: {user:?}");
    Ok(user.map(|user| user.with_resolved_avatar(&api_client.config.base_url)))
}
