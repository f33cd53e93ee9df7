use serde::{Deserialize, Serialize};

/// A single entry of the remote users listing.
///
/// The remote API speaks snake_case while the frontend expects camelCase, so
/// `avatar_url` is renamed in each direction separately. Records handed back
/// by the frontend are accepted in either spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: u64,
    login: String,
    #[serde(
        rename(serialize = "avatarUrl", deserialize = "avatar_url"),
        alias = "avatarUrl"
    )]
    avatar_url: String,
}

impl UserRecord {
    pub fn new(id: u64, login: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            avatar_url: avatar_url.into(),
        }
    }
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn login(&self) -> &str {
        &self.login
    }
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}
