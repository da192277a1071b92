pub mod cache;
pub mod cooldown;
pub mod modes;
pub mod player_stats;
pub mod premium;
