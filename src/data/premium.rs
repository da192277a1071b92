use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::config::ConfigError;

/// `premium.json`: users exempt from the command cooldown.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PremiumList {
    #[serde(default)]
    pub users: Vec<String>,
}

impl PremiumList {
    pub async fn load_from_disk(path: &Path) -> Result<PremiumList, ConfigError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::warn!(path = %path.display(), "premium list not found, no users exempt from cooldown");
            return Ok(PremiumList::default());
        }
        let data = tokio::fs::read(path).await.map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        if data.is_empty() {
            return Ok(PremiumList::default());
        }
        serde_json::from_slice(&data).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Discord snowflakes; entries that aren't one are skipped.
    pub fn user_ids(&self) -> HashSet<u64> {
        self.users
            .iter()
            .filter_map(|raw| match raw.trim().parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(entry = %raw, "ignoring premium entry that is not a user id");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_ids_and_skips_garbage() {
        let list: PremiumList =
            serde_json::from_str(r#"{"users":["123456789012345678"," 42 ","someone"]}"#).unwrap();
        assert_eq!(list.user_ids(), HashSet::from([123456789012345678, 42]));
    }

    #[tokio::test]
    async fn missing_file_means_nobody_is_exempt() {
        let path = std::env::temp_dir().join("voidstats-premium-does-not-exist.json");
        let list = PremiumList::load_from_disk(&path).await.unwrap();
        assert!(list.user_ids().is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("voidstats-premium-{}.json", std::process::id()));
        tokio::fs::write(&path, b"{ users: nope").await.unwrap();
        let res = PremiumList::load_from_disk(&path).await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(matches!(res, Err(ConfigError::Parse { .. })));
    }
}
