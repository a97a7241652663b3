use anyhow::{Result, bail};
use lore_application::chat::{ChatTurnService, SendOutcome};
use lore_application::{Surface, evaluate};
use lore_core::session::GateDecision;
use std::sync::Arc;

/// Runs one conversation turn and prints the assistant's reply.
pub async fn run(query: &str) -> Result<()> {
    let ctx = super::establish()?;

    match evaluate(ctx.provider.as_ref(), Surface::Chat) {
        GateDecision::Allow => {}
        GateDecision::Deny { message } => bail!(message),
        GateDecision::RedirectToLogin => bail!("not signed in"),
    }

    ctx.history.load().await;

    let service = ChatTurnService::new(
        Arc::clone(&ctx.history),
        ctx.api.clone(),
        ctx.provider.clone(),
    );

    match service.send(query).await {
        SendOutcome::Completed { reply } => println!("{}", reply.content),
        SendOutcome::IgnoredEmpty => bail!("nothing to ask: the query is empty"),
        SendOutcome::RejectedBusy => bail!("another turn is already in flight"),
    }

    Ok(())
}
