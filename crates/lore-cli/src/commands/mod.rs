pub mod chat;
pub mod history;
pub mod upload;

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use lore_core::history::HistoryStore;
use lore_core::session::Session;
use lore_infrastructure::{ClientConfig, IdentityPayload, RestHistoryRepository, WatchSessionProvider};
use lore_interaction::AssistantApiClient;

/// Everything a command needs: the signed-in identity, the backend client
/// and the history store bound to the session's user.
pub(crate) struct ClientContext {
    pub provider: Arc<WatchSessionProvider>,
    pub session: Session,
    pub api: Arc<AssistantApiClient>,
    pub history: Arc<HistoryStore>,
}

/// Builds the client context from the config file and environment.
///
/// The identity comes from `LORE_USER_ID` / `LORE_USER_EMAIL` /
/// `LORE_USER_ROLE`; in a full deployment an authentication provider would
/// hand this payload over after sign-in.
pub(crate) fn establish() -> Result<ClientContext> {
    let config = ClientConfig::load().context("failed to load configuration")?;

    let Ok(user_id) = env::var("LORE_USER_ID") else {
        bail!("not signed in: set LORE_USER_ID (and optionally LORE_USER_EMAIL, LORE_USER_ROLE)");
    };
    let email = env::var("LORE_USER_EMAIL").unwrap_or_default();
    let metadata = match env::var("LORE_USER_ROLE") {
        Ok(role) => serde_json::json!({ "role": role }),
        Err(_) => serde_json::json!({}),
    };

    let provider = Arc::new(WatchSessionProvider::new());
    let session = provider.establish(IdentityPayload {
        user_id,
        email,
        metadata,
    });

    let api = Arc::new(
        AssistantApiClient::new(config.api_url.clone()).with_timeout(config.timeout()),
    );
    let repository =
        Arc::new(RestHistoryRepository::new(config.history_url()).with_timeout(config.timeout()));
    let history = Arc::new(HistoryStore::new(repository, session.user_id.clone()));

    Ok(ClientContext {
        provider,
        session,
        api,
        history,
    })
}
