use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{IdentityResolver, LookupError, PlayerId};

const PROFILE_URL: &str = "https://api.mojang.com/users/profiles/minecraft";

#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
}

pub struct Mojang {
    client: reqwest::Client,
}

impl Mojang {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityResolver for Mojang {
    async fn resolve(&self, display_name: &str) -> Result<PlayerId, LookupError> {
        let url = format!("{}/{}", PROFILE_URL, urlencoding::encode(display_name));
        let res = self.client.get(&url).send().await?;

        match res.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => return Err(LookupError::NotFound),
            s if !s.is_success() => {
                let text = res.text().await.unwrap_or_default();
                return Err(LookupError::Transient(format!(
                    "profile request failed: {} - {}",
                    s, text
                )));
            }
            _ => {}
        }

        let body_text = res.text().await?;
        parse_profile(&body_text)
    }
}

fn parse_profile(body: &str) -> Result<PlayerId, LookupError> {
    // An empty 200 is how the endpoint has historically said "no such name".
    if body.trim().is_empty() {
        return Err(LookupError::NotFound);
    }
    let profile: Profile = serde_json::from_str(body)
        .map_err(|e| LookupError::Transient(format!("unexpected profile response: {}", e)))?;
    Ok(profile.id)
}
