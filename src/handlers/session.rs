//! Lifecycle of one `/void` invocation, independent of Discord.
//!
//! The command glue feeds [`Event`]s into a [`Session`] and performs whatever [`Action`]
//! comes back. A session starts in [`State::Received`] and ends in either
//! [`State::Closed`] (cooldown, not found, error) or [`State::Expired`] (idle teardown).

use crate::api::LookupError;
use crate::commands::bedwars::card::{
    render_card, render_mode_menu, CooldownNotice, ModeMenu, StatsCard,
};
use crate::data::cache::ResponseCache;
use crate::data::cooldown::Cooldowns;
use crate::data::modes::OVERALL;

pub const NOT_FOUND: &str = "Player not found.";
pub const ERROR: &str = "Error occurred";
pub const REFETCH_FAILED: &str = "Refetch failed";
pub const SELECT_ERROR: &str = "Error";

/// Shared state every session consults.
pub struct Controller {
    pub cache: ResponseCache,
    pub cooldowns: Cooldowns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Received,
    Deferred,
    Interactive { mode: String },
    Closed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command { user_id: u64 },
    /// The platform has been told we're working on it.
    Resolve,
    Select { mode: String },
    IdleTimeout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Stats { card: StatsCard, menu: ModeMenu },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Immediate reply; nothing was deferred.
    Cooldown(CooldownNotice),
    Defer,
    /// Replace the deferred response.
    Edit(Reply),
    /// Update the interactive message in place.
    Update { card: StatsCard, menu: ModeMenu },
    /// Ephemeral note to whoever touched the control.
    Notice(String),
    /// Strip all components from the interactive message.
    Freeze,
}

pub struct Session {
    command: String,
    player: String,
    state: State,
}

impl Session {
    pub fn new(command: impl Into<String>, player: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            player: player.into(),
            state: State::Received,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, State::Interactive { .. })
    }

    pub async fn handle(&mut self, controller: &Controller, event: Event) -> Option<Action> {
        match event {
            Event::Command { user_id } if self.state == State::Received => {
                match controller.cooldowns.try_acquire(user_id).await {
                    Err(remaining) => {
                        tracing::debug!(user_id, ?remaining, "command on cooldown");
                        self.state = State::Closed;
                        Some(Action::Cooldown(CooldownNotice {
                            command: self.command.clone(),
                            remaining,
                        }))
                    }
                    Ok(()) => {
                        self.state = State::Deferred;
                        Some(Action::Defer)
                    }
                }
            }
            Event::Resolve if self.state == State::Deferred => {
                match controller.cache.get_or_fetch(&self.player).await {
                    Ok(stats) => {
                        self.state = State::Interactive {
                            mode: OVERALL.to_string(),
                        };
                        Some(Action::Edit(Reply::Stats {
                            card: render_card(&self.player, OVERALL, &stats),
                            menu: render_mode_menu(OVERALL),
                        }))
                    }
                    Err(e) => {
                        self.state = State::Closed;
                        Some(Action::Edit(Reply::Text(self.failure_text(&e, NOT_FOUND, ERROR))))
                    }
                }
            }
            Event::Select { mode } if self.is_live() => {
                match controller.cache.get_or_fetch(&self.player).await {
                    Ok(stats) => {
                        let card = render_card(&self.player, &mode, &stats);
                        let menu = render_mode_menu(&mode);
                        self.state = State::Interactive { mode };
                        Some(Action::Update { card, menu })
                    }
                    Err(e) => Some(Action::Notice(self.failure_text(&e, REFETCH_FAILED, SELECT_ERROR))),
                }
            }
            Event::IdleTimeout if self.is_live() => {
                self.state = State::Expired;
                Some(Action::Freeze)
            }
            event => {
                tracing::trace!(state = ?self.state, ?event, "event ignored");
                None
            }
        }
    }

    fn failure_text(&self, e: &LookupError, not_found: &str, error: &str) -> String {
        if e.is_not_found() {
            tracing::debug!(player = %self.player, "player not found");
            not_found.to_string()
        } else {
            tracing::error!(player = %self.player, error = %e, "stats lookup failed");
            error.to_string()
        }
    }
}
