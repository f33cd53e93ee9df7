use url::Url;

use crate::error::RemoteAccessError;

/// Appends `path_components` to `base` and encodes `query`.
///
/// Unlike [`Url::join`] this keeps any path prefix already on the base, so an
/// enterprise base such as `https://ghe.example.com/api/v3` still resolves
/// `users` under `/api/v3/`.
pub fn generate_url(
    base: &Url,
    path_components: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, RemoteAccessError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| RemoteAccessError::InvalidEndpoint)?;
        segments.pop_if_empty();
        for component in path_components {
            for part in component.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
        }
    }

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
