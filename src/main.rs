use poise::serenity_prelude as serenity;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{hypixel::Hypixel, mojang::Mojang};
use crate::config::Config;
use crate::data::cache::{ResponseCache, FRESHNESS};
use crate::data::cooldown::{Cooldowns, COOLDOWN};
use crate::data::premium::PremiumList;
use crate::handlers::session::Controller;

pub struct CommandStatus {
    pub name: String,
    pub status: String,
}

pub struct Data {
    pub started_at: Instant,
    pub commands_check_duration: Duration,
    pub command_statuses: Vec<CommandStatus>,
    pub controller: Arc<Controller>,
    pub sweeper_started: Arc<AtomicBool>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub mod api;
pub mod commands;
pub mod config;
pub mod data;
mod handlers;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,voidstats=info".into()),
        )
        .with_target(false)
        .init();
    let program_started = Instant::now();

    let config = Config::from_env()?;
    let premium = PremiumList::load_from_disk(&config.premium_path).await?;
    let privileged = premium.user_ids();
    tracing::info!(privileged = privileged.len(), "loaded premium list");

    let http = api::http_client()?;
    let controller = Arc::new(Controller {
        cache: ResponseCache::new(
            Arc::new(Mojang::new(http.clone())),
            Arc::new(Hypixel::new(http, config.hypixel_key.clone())),
            FRESHNESS,
        ),
        cooldowns: Cooldowns::new(COOLDOWN, privileged),
    });

    let guild_id = config.guild_id;
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(async move {
                    handlers::event_handler::handle_event(ctx, event, framework, data).await
                })
            },
            on_error: |error| Box::pin(handlers::errors::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                let check_started = Instant::now();
                let reg_result = match guild_id {
                    Some(id) => {
                        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id)).await
                    }
                    None => poise::builtins::register_globally(ctx, commands).await,
                };
                let commands_check_duration = check_started.elapsed();

                let status = match reg_result {
                    Ok(()) => match guild_id {
                        Some(id) => format!("Registered in guild {}", id),
                        None => "Registered".to_string(),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "command registration failed");
                        format!("Reg err: {}", e)
                    }
                };
                let command_statuses = commands
                    .iter()
                    .map(|c| CommandStatus {
                        name: c.name.to_string(),
                        status: status.clone(),
                    })
                    .collect();

                Ok(Data {
                    started_at: program_started,
                    commands_check_duration,
                    command_statuses,
                    controller,
                    sweeper_started: Arc::new(AtomicBool::new(false)),
                })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, serenity::GatewayIntents::GUILDS)
        .framework(framework)
        .await;
    client?.start().await?;
    Ok(())
}
