use url::Url;

use crate::constants::DEFAULT_AVATAR_PATH;

const ABSOLUTE_IMAGE_SCHEMES: [&str; 3] = ["http://", "https://", "data:"];

/// # Resolves an image reference returned by the API into a url usable in an `img` tag
///
/// Absolute `http(s)` and `data:` references are kept as is, other references are resolved against the API base url.
///
/// ```
/// use url::Url;
/// use postline_utils::image::resolve_image_url;
///
/// let base = Url::parse("http://localhost:8080/api/").unwrap();
/// assert_eq!(resolve_image_url(&base, Some("https://cdn.test/a.png")), Some(String::from("https://cdn.test/a.png")));
/// assert_eq!(resolve_image_url(&base, Some("/uploads/a.png")), Some(String::from("http://localhost:8080/api/uploads/a.png")));
/// assert_eq!(resolve_image_url(&base, Some("  ")), None);
/// assert_eq!(resolve_image_url(&base, None), None);
/// ```
pub fn resolve_image_url(base_url: &Url, reference: Option<&str>) -> Option<String> {
    let reference = reference.map(str::trim).filter(|reference| !reference.is_empty())?;
    let lowercase_reference = reference.to_ascii_lowercase();
    if ABSOLUTE_IMAGE_SCHEMES.iter().any(|scheme| lowercase_reference.starts_with(scheme)) {
        return Some(reference.to_string());
    }
    match with_trailing_slash(base_url).join(reference.trim_start_matches('/')) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            log::warn!("Cannot resolve image reference {reference}: {e}");
            None
        }
    }
}

/// Returns the resolved avatar url or the default avatar placeholder
pub fn avatar_url_or_default(avatar_url: Option<&str>) -> String {
    match avatar_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => String::from(DEFAULT_AVATAR_PATH),
    }
}

fn with_trailing_slash(base_url: &Url) -> Url {
    let mut base_url = base_url.clone();
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::constants::DEFAULT_AVATAR_PATH;
    use crate::image::{avatar_url_or_default, resolve_image_url, with_trailing_slash};

    #[test]
    fn test_resolve_image_url_keeps_absolute_references() {
        let base_url = Url::parse("http://localhost:8080/api").expect("Should parse url");
        assert_eq!(
            resolve_image_url(&base_url, Some("http://images.test/avatar.png")),
            Some(String::from("http://images.test/avatar.png"))
        );
        assert_eq!(
            resolve_image_url(&base_url, Some("HTTPS://images.test/avatar.png")),
            Some(String::from("HTTPS://images.test/avatar.png"))
        );
        assert_eq!(
            resolve_image_url(&base_url, Some("data:image/png;base64,AAAA")),
            Some(String::from("data:image/png;base64,AAAA"))
        );
    }

    #[test]
    fn test_resolve_image_url_joins_relative_references() {
        let base_url = Url::parse("http://localhost:8080/api").expect("Should parse url");
        assert_eq!(
            resolve_image_url(&base_url, Some("uploads/avatar.png")),
            Some(String::from("http://localhost:8080/api/uploads/avatar.png"))
        );
        assert_eq!(
            resolve_image_url(&base_url, Some("/uploads/avatar.png")),
            Some(String::from("http://localhost:8080/api/uploads/avatar.png"))
        );
    }

    #[test]
    fn test_resolve_image_url_missing_reference() {
        let base_url = Url::parse("http://localhost:8080/").expect("Should parse url");
        assert_eq!(resolve_image_url(&base_url, None), None);
        assert_eq!(resolve_image_url(&base_url, Some("")), None);
        assert_eq!(resolve_image_url(&base_url, Some(" \n")), None);
    }

    #[test]
    fn test_avatar_url_or_default() {
        assert_eq!(avatar_url_or_default(None), DEFAULT_AVATAR_PATH);
        assert_eq!(avatar_url_or_default(Some("")), DEFAULT_AVATAR_PATH);
        assert_eq!(avatar_url_or_default(Some("http://images.test/a.png")), "http://images.test/a.png");
    }

    #[test]
    fn test_with_trailing_slash() {
        let base_url = Url::parse("http://localhost:8080/api").expect("Should parse url");
        assert_eq!(with_trailing_slash(&base_url).as_str(), "http://localhost:8080/api/");
        let base_url = Url::parse("http://localhost:8080/api/").expect("Should parse url");
        assert_eq!(with_trailing_slash(&base_url).as_str(), "http://localhost:8080/api/");
    }
}
