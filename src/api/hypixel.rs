use async_trait::async_trait;
use serde_json::Value;

use super::{LookupError, StatsFetcher};
use crate::data::player_stats::RawStats;

const PLAYER_URL: &str = "https://api.hypixel.net/player";

pub struct Hypixel {
    client: reqwest::Client,
    api_key: String,
}

impl Hypixel {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl StatsFetcher for Hypixel {
    async fn fetch(&self, player_id: &str) -> Result<RawStats, LookupError> {
        let res = self
            .client
            .get(PLAYER_URL)
            .query(&[("key", self.api_key.as_str()), ("uuid", player_id)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(LookupError::Transient(format!(
                "player request failed: {} - {}",
                status, text
            )));
        }

        let body: Value = res.json().await?;
        extract_bedwars(&body)
    }
}

fn extract_bedwars(body: &Value) -> Result<RawStats, LookupError> {
    if body.get("success").and_then(|v| v.as_bool()) == Some(false) {
        let cause = body.get("cause").and_then(|v| v.as_str()).unwrap_or("unknown cause");
        return Err(LookupError::Transient(format!("player request rejected: {}", cause)));
    }

    let player = match body.get("player") {
        Some(p) if p.is_object() => p,
        _ => return Err(LookupError::NoPlayerRecord),
    };

    // Never having played Bed Wars is a valid, all-zero record.
    let bedwars = player
        .get("stats")
        .and_then(|s| s.get("Bedwars"))
        .and_then(|b| b.as_object())
        .cloned()
        .unwrap_or_default();

    Ok(RawStats::new(bedwars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_player_is_no_record() {
        let body = json!({ "success": true, "player": null });
        assert!(matches!(extract_bedwars(&body), Err(LookupError::NoPlayerRecord)));
    }

    #[test]
    fn rejected_request_is_transient() {
        let body = json!({ "success": false, "cause": "Invalid API key" });
        match extract_bedwars(&body) {
            Err(LookupError::Transient(msg)) => assert!(msg.contains("Invalid API key")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_bedwars_section_is_empty() {
        let body = json!({ "success": true, "player": { "stats": { "SkyWars": {} } } });
        assert_eq!(extract_bedwars(&body).unwrap(), RawStats::default());
    }

    #[test]
    fn bedwars_section_is_passed_through() {
        let body = json!({
            "success": true,
            "player": { "stats": { "Bedwars": { "void_kills_bedwars": 10 } } }
        });
        assert_eq!(extract_bedwars(&body).unwrap().count("void_kills_bedwars"), 10);
    }
}
