use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

pub const COOLDOWN: Duration = Duration::from_secs(3);

/// Per-user spacing between command invocations. Privileged users skip it entirely
/// and never get an entry.
pub struct Cooldowns {
    window: Duration,
    privileged: HashSet<u64>,
    last_used: RwLock<HashMap<u64, Instant>>,
}

impl Cooldowns {
    pub fn new(window: Duration, privileged: HashSet<u64>) -> Self {
        Self {
            window,
            privileged,
            last_used: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_privileged(&self, user_id: u64) -> bool {
        self.privileged.contains(&user_id)
    }

    /// Records the invocation and returns `Ok`, or returns the time left to wait
    /// without touching the record.
    pub async fn try_acquire(&self, user_id: u64) -> Result<(), Duration> {
        if self.is_privileged(user_id) {
            return Ok(());
        }
        let now = Instant::now();
        let mut last_used = self.last_used.write().await;
        if let Some(last) = last_used.get(&user_id) {
            let since = now.duration_since(*last);
            if since < self.window {
                return Err(self.window - since);
            }
        }
        last_used.insert(user_id, now);
        Ok(())
    }

    /// Drops entries that can no longer block anyone.
    pub async fn sweep(&self) -> usize {
        let window = self.window;
        let mut last_used = self.last_used.write().await;
        let before = last_used.len();
        last_used.retain(|_, last| last.elapsed() < window);
        before - last_used.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.last_used.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_call_inside_window_is_refused_with_remaining_time() {
        let cd = Cooldowns::new(COOLDOWN, HashSet::new());
        assert!(cd.try_acquire(1).await.is_ok());

        tokio::time::advance(Duration::from_millis(1200)).await;
        let remaining = cd.try_acquire(1).await.unwrap_err();
        assert_eq!(remaining, Duration::from_millis(1800));
        assert!(remaining < COOLDOWN);
    }

    #[tokio::test(start_paused = true)]
    async fn refusal_does_not_extend_the_window() {
        let cd = Cooldowns::new(COOLDOWN, HashSet::new());
        cd.try_acquire(1).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cd.try_acquire(1).await.is_err());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cd.try_acquire(1).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn users_are_independent() {
        let cd = Cooldowns::new(COOLDOWN, HashSet::new());
        cd.try_acquire(1).await.unwrap();
        assert!(cd.try_acquire(2).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn privileged_users_are_never_limited() {
        let cd = Cooldowns::new(COOLDOWN, HashSet::from([7]));
        for _ in 0..10 {
            assert!(cd.try_acquire(7).await.is_ok());
        }
        assert_eq!(cd.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_drops_only_expired_entries() {
        let cd = Cooldowns::new(COOLDOWN, HashSet::new());
        cd.try_acquire(1).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        cd.try_acquire(2).await.unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(cd.sweep().await, 1);
        assert_eq!(cd.len().await, 1);
        assert!(cd.try_acquire(2).await.is_err());
    }
}
