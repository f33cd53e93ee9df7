use std::{future::Future, sync::Arc};

use client::{settings::Settings, user::UserRecord};
use log::{debug, warn};
use serde::Deserialize;
use url::Url;

use crate::{error::RemoteAccessError, requests::generate_url, utils::get_client_async};

/// A paged listing of users.
///
/// Implementations return at most `per_page` records for the 1-based `page`.
pub trait UserSource: Send + Sync + 'static {
    fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<UserRecord>, RemoteAccessError>> + Send;
}

impl<T: UserSource> UserSource for Arc<T> {
    fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<UserRecord>, RemoteAccessError>> + Send {
        (**self).fetch_page(page, per_page)
    }
}

#[derive(Deserialize, Debug)]
struct GithubApiError {
    message: String,
}

#[derive(Clone, Debug)]
pub struct GithubUserSource {
    client: reqwest::Client,
    base_url: Url,
}

impl GithubUserSource {
    pub fn new(api_base: &str) -> Result<Self, RemoteAccessError> {
        let base_url = Url::parse(api_base)?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteAccessError::InvalidEndpoint);
        }

        Ok(Self {
            client: get_client_async()?,
            base_url,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RemoteAccessError> {
        Self::new(&settings.api_base)
    }
}

impl UserSource for GithubUserSource {
    async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<UserRecord>, RemoteAccessError> {
        let url = generate_url(
            &self.base_url,
            &["users"],
            &[
                ("per_page", &per_page.to_string()),
                ("page", &page.to_string()),
            ],
        )?;

        debug!("requesting users page {page} from {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GithubApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            warn!("users page {page} returned {status}: {message}");
            return Err(RemoteAccessError::InvalidResponse(status, message));
        }

        let body = response.bytes().await?;
        let users: Vec<UserRecord> = serde_json::from_slice(&body)?;
        debug!("users page {page} returned {} record(s)", users.len());

        Ok(users)
    }
}
