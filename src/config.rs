use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnv(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub hypixel_key: String,
    /// Register commands to this guild only; global registration otherwise.
    pub guild_id: Option<u64>,
    pub premium_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            get(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        let guild_id = match get("GUILD_ID").filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                name: "GUILD_ID",
                value: v.clone(),
            })?),
            None => None,
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            hypixel_key: required("HYPIXEL_KEY")?,
            guild_id,
            premium_path: get("PREMIUM_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("premium.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "t"), ("HYPIXEL_KEY", "k")])).unwrap();
        assert_eq!(cfg.guild_id, None);
        assert_eq!(cfg.premium_path, PathBuf::from("premium.json"));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("HYPIXEL_KEY")));
    }

    #[test]
    fn guild_id_must_be_numeric() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "t"),
            ("HYPIXEL_KEY", "k"),
            ("GUILD_ID", "abc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "GUILD_ID", .. }));
    }
}
