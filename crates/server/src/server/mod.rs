use tracing::info;

use crate::config::AppConfig;
use crate::server::state::AppState;

pub mod admin;
pub mod content;
pub mod router;
pub mod state;
pub mod views;

pub async fn run_all(config: &AppConfig) -> anyhow::Result<()> {
    let app_state = AppState::try_init(config)?;
    info!("using {} storage backend", app_state.storage.backend_name());
    router::serve(app_state).await?;
    Ok(())
}
