use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use std::fmt;
use std::time::Duration;

use crate::data::modes::{self, MODES};
use crate::data::player_stats::PlayerStats;

pub const MENU_ID: &str = "mode_select";
pub const FOOTER: &str = "void | made by mtnk";

const CARD_COLOR: u32 = 0x000000;
const COOLDOWN_COLOR: u32 = 0xFF0000;

/// Kill/death style ratio. With no deaths the ratio is the kill count itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    Whole(u64),
    /// Quotient in hundredths, halves rounded up.
    Hundredths(u128),
}

impl Ratio {
    pub fn of(num: u64, den: u64) -> Ratio {
        if den == 0 {
            return Ratio::Whole(num);
        }
        let (num, den) = (num as u128, den as u128);
        Ratio::Hundredths((num * 200 + den) / (den * 2))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Whole(n) => write!(f, "{}", n),
            Ratio::Hundredths(h) => write!(f, "{}.{:02}", h / 100, h % 100),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsCard {
    pub player: String,
    pub mode_key: String,
    pub fields: Vec<(&'static str, String)>,
    pub generated_at: DateTime<Utc>,
}

impl StatsCard {
    pub fn subtitle(&self) -> String {
        // Unknown keys can only come from a forged component payload.
        match modes::label(&self.mode_key) {
            Some(label) => format!("{} mode", label),
            None => format!("{} mode", self.mode_key),
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let embed = serenity::CreateEmbed::new()
            .color(CARD_COLOR)
            .title(format!("``{}``", self.player))
            .description(self.subtitle())
            .fields(self.fields.iter().map(|(n, v)| (*n, v.clone(), true)))
            .footer(serenity::CreateEmbedFooter::new(FOOTER));
        with_timestamp(embed, self.generated_at)
    }
}

pub fn render_card(player: &str, mode_key: &str, stats: &PlayerStats) -> StatsCard {
    let s = stats.mode_or_zero(mode_key);
    StatsCard {
        player: player.to_string(),
        mode_key: mode_key.to_string(),
        fields: vec![
            ("Void Kills", s.kills.to_string()),
            ("Void Deaths", s.deaths.to_string()),
            ("Void KDR", Ratio::of(s.kills, s.deaths).to_string()),
            ("Void Final Kills", s.final_kills.to_string()),
            ("Void Final Deaths", s.final_deaths.to_string()),
            ("Void FKDR", Ratio::of(s.final_kills, s.final_deaths).to_string()),
        ],
        generated_at: Utc::now(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: &'static str,
    pub label: &'static str,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeMenu {
    pub options: Vec<MenuOption>,
}

impl ModeMenu {
    #[cfg(test)]
    pub fn selected(&self) -> Option<&'static str> {
        self.options.iter().find(|o| o.default).map(|o| o.key)
    }

    pub fn to_action_row(&self) -> serenity::CreateActionRow {
        let options = self
            .options
            .iter()
            .map(|o| serenity::CreateSelectMenuOption::new(o.label, o.key).default_selection(o.default))
            .collect();
        serenity::CreateActionRow::SelectMenu(
            serenity::CreateSelectMenu::new(MENU_ID, serenity::CreateSelectMenuKind::String { options })
                .placeholder("Select Mode"),
        )
    }
}

pub fn render_mode_menu(selected: &str) -> ModeMenu {
    ModeMenu {
        options: MODES
            .iter()
            .map(|&(key, label)| MenuOption {
                key,
                label,
                default: key == selected,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CooldownNotice {
    pub command: String,
    pub remaining: Duration,
}

impl CooldownNotice {
    pub fn description(&self) -> String {
        format!(
            "Please wait `{}` before reusing `{}`.",
            format_cooldown(self.remaining),
            self.command
        )
    }

    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let embed = serenity::CreateEmbed::new()
            .color(COOLDOWN_COLOR)
            .title("Cooldown")
            .description(self.description())
            .footer(serenity::CreateEmbedFooter::new(FOOTER));
        with_timestamp(embed, Utc::now())
    }
}

pub fn format_cooldown(remaining: Duration) -> String {
    let ms = remaining.as_millis();
    format!("{}s, {}ms", ms / 1000, ms % 1000)
}

fn with_timestamp(embed: serenity::CreateEmbed, at: DateTime<Utc>) -> serenity::CreateEmbed {
    match serenity::Timestamp::from_unix_timestamp(at.timestamp()) {
        Ok(ts) => embed.timestamp(ts),
        Err(_) => embed,
    }
}
