//! Endpoint URL construction for the transport.

use crate::error::KbgError;

/// Joins the API base URL, an endpoint path and query pairs.
///
/// A trailing slash on `base_url` is ignored, so both
/// `"https://api.example.com"` and `"https://api.example.com/"` work.
///
/// # Errors
///
/// Returns [`KbgError::InvalidBaseUrl`] if the joined string does not parse
/// as an absolute URL.
pub(crate) fn endpoint_url(
    base_url: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<String, KbgError> {
    let base = base_url.trim_end_matches('/');
    let mut url =
        reqwest::Url::parse(&format!("{base}{path}")).map_err(|e| KbgError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}
