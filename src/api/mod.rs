pub mod hypixel;
pub mod mojang;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::data::player_stats::RawStats;

pub type PlayerId = String;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no profile with that name")]
    NotFound,
    #[error("profile has no player record")]
    NoPlayerRecord,
    #[error("upstream request failed: {0}")]
    Transient(String),
}

impl LookupError {
    /// Both ways of "this player doesn't exist" read the same to the user.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound | LookupError::NoPlayerRecord)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transient(e.to_string())
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, display_name: &str) -> Result<PlayerId, LookupError>;
}

#[async_trait]
pub trait StatsFetcher: Send + Sync {
    async fn fetch(&self, player_id: &str) -> Result<RawStats, LookupError>;
}

pub fn http_client() -> Result<reqwest::Client, crate::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("voidstats/0.1.0"));
    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}
