//! The http module helper functions useful for serving and requesting http content
use actix_web::http::header::ContentType;
use url::Url;

/// `get_contenttype` guesses the `ContentType` of the file at `path` from its
/// extension. Anything unrecognised, including a missing extension, is
/// served as an octet stream.
#[must_use]
pub fn get_contenttype(path: &str) -> ContentType {
    ContentType(mime_guess::from_path(path).first_or_octet_stream())
}

/// Append `path` to `base`, keeping whatever path `base` already carries.
///
/// `Url::join` would drop the last segment of `http://host/api`, which is
/// exactly where the engine lives, so the join is done on the string form.
#[must_use]
pub fn join_url(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
