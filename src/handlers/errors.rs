use crate::handlers::session::ERROR;

/// Last line of defence for both entry points: whatever escaped the command still
/// gets logged and, when the interaction can still be answered, a generic reply.
pub async fn on_error(error: poise::FrameworkError<'_, crate::Data, crate::Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!(error = %error, "framework setup failed");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(command = %ctx.command().name, error = %error, "command failed");
            if let Err(e) = ctx.say(ERROR).await {
                tracing::warn!(error = %e, "could not report command failure");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!(error = %e, "error while handling framework error");
            }
        }
    }
}
