//! In-memory upstreams for tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{IdentityResolver, LookupError, PlayerId, StatsFetcher};
use crate::data::player_stats::RawStats;

#[derive(Clone)]
pub enum Outcome {
    Stats(Value),
    NotFound,
    NoRecord,
    Down,
}

/// Answers both the identity and the stats lookup from one table keyed by display name.
/// The "uuid" handed out is the display name itself.
#[derive(Default)]
pub struct FakeUpstream {
    players: Mutex<HashMap<String, Outcome>>,
    pub resolves: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl FakeUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, name: &str, outcome: Outcome) {
        self.players.lock().unwrap().insert(name.to_string(), outcome);
    }

    pub fn resolves(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn outcome(&self, name: &str) -> Outcome {
        self.players.lock().unwrap().get(name).cloned().unwrap_or(Outcome::NotFound)
    }
}

#[async_trait]
impl IdentityResolver for FakeUpstream {
    async fn resolve(&self, display_name: &str) -> Result<PlayerId, LookupError> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        match self.outcome(display_name) {
            Outcome::NotFound => Err(LookupError::NotFound),
            Outcome::Down => Err(LookupError::Transient("connection refused".into())),
            _ => Ok(display_name.to_string()),
        }
    }
}

#[async_trait]
impl StatsFetcher for FakeUpstream {
    async fn fetch(&self, player_id: &str) -> Result<RawStats, LookupError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.outcome(player_id) {
            Outcome::Stats(v) => Ok(serde_json::from_value(v).unwrap()),
            Outcome::NoRecord => Err(LookupError::NoPlayerRecord),
            Outcome::NotFound => Err(LookupError::NotFound),
            Outcome::Down => Err(LookupError::Transient("connection refused".into())),
        }
    }
}
