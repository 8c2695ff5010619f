//! Subcommand implementations.

pub mod chat;
pub mod config_cmd;
pub mod queue;
pub mod tools;

use parley_agent::{Engine, SessionManager};
use parley_config::AppConfig;
use parley_core::session::SessionId;

/// Load config and open the engine for the default queue or a named session.
pub async fn open_engine(session: Option<&str>) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let engine = match session {
        Some(name) => {
            let path = SessionManager::new(config.clone()).queue_path(&SessionId::from(name));
            Engine::from_config_at(&config, &path).await?
        }
        None => Engine::from_config(&config).await?,
    };
    Ok(engine)
}
