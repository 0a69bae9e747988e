use crate::error::CoreError;

/// Join `base/endpoint/prefix/suffix`.
///
/// One trailing slash is stripped from `base` so the endpoint never follows a
/// `//`. Empty `prefix` or `suffix` contribute no segment: an empty prefix
/// yields `base/api/suffix`, deliberately never `base/api//suffix`.
pub(super) fn url_for_api_call(
    base: Option<&str>,
    endpoint: &str,
    prefix: &str,
    suffix: &str,
) -> Result<String, CoreError> {
    let base = base.ok_or(CoreError::MissingBaseUrl)?;
    let base = base.strip_suffix('/').unwrap_or(base);

    let mut url = format!("{base}/{endpoint}/{prefix}");
    if !suffix.is_empty() {
        if !prefix.is_empty() {
            url.push('/');
        }
        url.push_str(suffix);
    }
    Ok(url)
}
