use poise::serenity_prelude as serenity;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// How often stale cooldown entries are dropped.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

fn fmt_dur(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.3}s", d.as_secs_f64())
    } else {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }
}

pub async fn handle_event<'a>(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'a, crate::Data, crate::Error>,
    data: &crate::Data,
) -> Result<(), crate::Error> {
    if let serenity::FullEvent::Ready { data_about_bot, .. } = event {
        tracing::info!(
            user = %data_about_bot.user.name,
            startup = %fmt_dur(data.started_at.elapsed()),
            commands_check = %fmt_dur(data.commands_check_duration),
            commands = data.command_statuses.len(),
            "bot ready"
        );
        for s in &data.command_statuses {
            tracing::info!(command = %s.name, status = %s.status, "command");
        }

        // Ready fires again on every reconnect; the sweeper only needs to start once.
        if !data.sweeper_started.swap(true, Ordering::SeqCst) {
            let controller = data.controller.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
                loop {
                    ticker.tick().await;
                    let dropped = controller.cooldowns.sweep().await;
                    if dropped > 0 {
                        tracing::debug!(dropped, "swept cooldown entries");
                    }
                }
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_switch_units_at_one_second() {
        assert_eq!(fmt_dur(Duration::from_millis(1500)), "1.500s");
        assert_eq!(fmt_dur(Duration::from_micros(2500)), "2.500ms");
    }
}
