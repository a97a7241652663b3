use anyhow::{Context, Result, bail};
use lore_application::{Surface, evaluate};
use lore_core::history::MessageRole;
use lore_core::session::GateDecision;

/// Prints the persisted conversation log, oldest first.
pub async fn show() -> Result<()> {
    let ctx = gated_context().await?;
    ctx.history.load().await;

    let log = ctx.history.messages().await;
    if log.is_empty() {
        println!("(no history for {})", ctx.session.user_id);
        return Ok(());
    }
    for message in log {
        let speaker = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
        };
        println!("[{speaker}] {}", message.content);
    }
    Ok(())
}

/// Deletes the entire persisted log.
///
/// Deletion is not optimistic: if the remote call fails, nothing is
/// reported as cleared.
pub async fn clear() -> Result<()> {
    let ctx = gated_context().await?;
    ctx.history
        .clear()
        .await
        .context("history was NOT cleared")?;
    println!("History cleared.");
    Ok(())
}

async fn gated_context() -> Result<super::ClientContext> {
    let ctx = super::establish()?;
    match evaluate(ctx.provider.as_ref(), Surface::Chat) {
        GateDecision::Allow => Ok(ctx),
        GateDecision::Deny { message } => bail!(message),
        GateDecision::RedirectToLogin => bail!("not signed in"),
    }
}
