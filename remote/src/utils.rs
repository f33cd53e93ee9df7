use std::time::Duration;

use http::{HeaderMap, HeaderValue, header::ACCEPT};

use crate::error::RemoteAccessError;

// GitHub rejects API requests that carry no User-Agent.
pub const CLIENT_USER_AGENT: &str = concat!("github-users/", env!("CARGO_PKG_VERSION"));
pub const GITHUB_JSON: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn get_client_async() -> Result<reqwest::Client, RemoteAccessError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

    let client = reqwest::ClientBuilder::new()
        .user_agent(CLIENT_USER_AGENT)
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}
