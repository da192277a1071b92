use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Add;

use crate::data::modes::{MERGED_MODES, MERGE_BASES, MODES, NORMAL_MODES, OVERALL};

/// The `player.stats.Bedwars` object exactly as Hypixel returns it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawStats(Map<String, Value>);

impl RawStats {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Numeric field lookup; anything absent, negative or non-integral reads as 0.
    pub fn count(&self, field: &str) -> u64 {
        self.0.get(field).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    fn void_counters(&self, prefix: Option<&str>) -> ModeCounters {
        let field = |suffix: &str| match prefix {
            Some(p) => format!("{}_void_{}_bedwars", p, suffix),
            None => format!("void_{}_bedwars", suffix),
        };
        ModeCounters {
            kills: self.count(&field("kills")),
            deaths: self.count(&field("deaths")),
            final_kills: self.count(&field("final_kills")),
            final_deaths: self.count(&field("final_deaths")),
        }
    }

    /// Counters recorded under `{prefix}_void_*_bedwars`.
    pub fn mode_counters(&self, prefix: &str) -> ModeCounters {
        self.void_counters(Some(prefix))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCounters {
    pub kills: u64,
    pub deaths: u64,
    pub final_kills: u64,
    pub final_deaths: u64,
}

impl Add for ModeCounters {
    type Output = ModeCounters;

    fn add(self, rhs: ModeCounters) -> ModeCounters {
        ModeCounters {
            kills: self.kills.saturating_add(rhs.kills),
            deaths: self.deaths.saturating_add(rhs.deaths),
            final_kills: self.final_kills.saturating_add(rhs.final_kills),
            final_deaths: self.final_deaths.saturating_add(rhs.final_deaths),
        }
    }
}

/// Counters for every registry mode of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    modes: BTreeMap<String, ModeCounters>,
}

impl PlayerStats {
    pub fn get(&self, mode: &str) -> Option<&ModeCounters> {
        self.modes.get(mode)
    }

    pub fn mode_or_zero(&self, mode: &str) -> ModeCounters {
        self.get(mode).copied().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.modes.len()
    }
}

pub fn aggregate(raw: &RawStats) -> PlayerStats {
    let mut modes = BTreeMap::new();

    modes.insert(OVERALL.to_string(), raw.void_counters(None));

    for mode in NORMAL_MODES {
        modes.insert(mode.to_string(), raw.mode_counters(mode));
    }

    for mode in MERGED_MODES {
        let merged = MERGE_BASES
            .iter()
            .map(|base| raw.mode_counters(&format!("{}_{}", base, mode)))
            .fold(ModeCounters::default(), |acc, c| acc + c);
        modes.insert(mode.to_string(), merged);
    }

    debug_assert_eq!(modes.len(), MODES.len());
    PlayerStats { modes }
}
