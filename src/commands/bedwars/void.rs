use poise::serenity_prelude as serenity;
use std::future::Future;
use std::time::Duration;

use super::card::MENU_ID;
use crate::handlers::session::{Action, Event, Reply, Session};

/// How long the mode menu stays usable after its last selection.
pub const IDLE: Duration = Duration::from_secs(300);

/// Show player's void stats
#[poise::command(slash_command)]
pub async fn void(
    ctx: poise::Context<'_, crate::Data, crate::Error>,
    #[description = "Minecraft Username"] player: String,
) -> Result<(), crate::Error> {
    let controller = ctx.data().controller.as_ref();
    let user_id = ctx.author().id.get();
    let mut session = Session::new(ctx.command().name.as_str(), player);

    match session.handle(controller, Event::Command { user_id }).await {
        Some(Action::Cooldown(notice)) => {
            ctx.send(poise::CreateReply::default().embed(notice.to_embed())).await?;
            return Ok(());
        }
        Some(Action::Defer) => ctx.defer().await?,
        _ => return Ok(()),
    }

    let (card, menu) = match session.handle(controller, Event::Resolve).await {
        Some(Action::Edit(Reply::Stats { card, menu })) => (card, menu),
        Some(Action::Edit(Reply::Text(text))) => {
            ctx.say(text).await?;
            return Ok(());
        }
        _ => return Ok(()),
    };

    let handle = ctx
        .send(
            poise::CreateReply::default()
                .embed(card.to_embed())
                .components(vec![menu.to_action_row()]),
        )
        .await?;
    let message_id = handle.message().await?.id;
    tracing::info!(player = %session.player(), user_id, "stats card sent");

    while session.is_live() {
        // A fresh collector per round makes the timeout an idle timeout.
        let interaction = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .message_id(message_id)
            .filter(|ci| ci.data.custom_id == MENU_ID)
            .timeout(IDLE)
            .await;

        let Some(interaction) = interaction else {
            if let Some(Action::Freeze) = session.handle(controller, Event::IdleTimeout).await {
                freeze_menu(handle.edit(ctx, poise::CreateReply::default().components(vec![]))).await;
            }
            break;
        };

        // Acknowledge inside the interaction deadline; the upstream lookup may take longer.
        if let Err(e) = interaction
            .create_response(ctx.http(), serenity::CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::warn!(error = %e, user_id = %interaction.user.id, "failed to acknowledge mode selection");
            continue;
        }

        let Some(mode) = selected_mode(&interaction) else {
            continue;
        };

        let result = match selection_reply(session.handle(controller, Event::Select { mode }).await) {
            SelectionReply::Edit(edit) => interaction.edit_response(ctx.http(), edit).await.map(|_| ()),
            SelectionReply::Followup(followup) => {
                interaction.create_followup(ctx.http(), followup).await.map(|_| ())
            }
            SelectionReply::Nothing => Ok(()),
        };
        // Selection failures never tear the menu down.
        if let Err(e) = result {
            tracing::warn!(error = %e, user_id = %interaction.user.id, "failed to answer mode selection");
        }
    }

    Ok(())
}

fn selected_mode(interaction: &serenity::ComponentInteraction) -> Option<String> {
    match &interaction.data.kind {
        serenity::ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    }
}

/// What to send after a selection has been acknowledged.
enum SelectionReply {
    Edit(serenity::EditInteractionResponse),
    Followup(serenity::CreateInteractionResponseFollowup),
    Nothing,
}

fn selection_reply(action: Option<Action>) -> SelectionReply {
    match action {
        Some(Action::Update { card, menu }) => SelectionReply::Edit(
            serenity::EditInteractionResponse::new()
                .embed(card.to_embed())
                .components(vec![menu.to_action_row()]),
        ),
        Some(Action::Notice(text)) => SelectionReply::Followup(
            serenity::CreateInteractionResponseFollowup::new()
                .content(text)
                .ephemeral(true),
        ),
        _ => SelectionReply::Nothing,
    }
}

/// Strips the menu off an expired card. Returns whether the edit went through; a message
/// deleted in the meantime has nothing left to freeze and is only logged.
async fn freeze_menu<T, E: std::fmt::Display>(edit: impl Future<Output = Result<T, E>>) -> bool {
    match edit.await {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "could not strip mode menu");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::bedwars::card::{render_card, render_mode_menu};
    use crate::data::player_stats::PlayerStats;

    #[tokio::test]
    async fn freezing_a_deleted_message_is_swallowed() {
        let edit = async { Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "Unknown Message")) };
        assert!(!freeze_menu(edit).await);
    }

    #[tokio::test]
    async fn freezing_a_live_message_succeeds() {
        assert!(freeze_menu(async { Ok::<_, std::io::Error>(()) }).await);
    }

    #[test]
    fn mode_change_edits_the_acknowledged_message() {
        let action = Action::Update {
            card: render_card("Foo", "rush", &PlayerStats::default()),
            menu: render_mode_menu("rush"),
        };
        assert!(matches!(selection_reply(Some(action)), SelectionReply::Edit(_)));
    }

    #[test]
    fn lookup_failure_after_selection_is_a_followup() {
        let action = Action::Notice("Player not found".into());
        assert!(matches!(selection_reply(Some(action)), SelectionReply::Followup(_)));
    }

    #[test]
    fn ignored_selection_sends_nothing_more() {
        assert!(matches!(selection_reply(None), SelectionReply::Nothing));
        assert!(matches!(selection_reply(Some(Action::Freeze)), SelectionReply::Nothing));
    }
}
