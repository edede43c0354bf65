use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::auth::session::{derive_cookie_key, random_secret, SessionStore};
use crate::config::AppConfig;
use crate::server::views::Views;
use crate::storage::Storage;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<Storage>,
    pub sessions: Arc<SessionStore>,
    pub views: Arc<Views>,
    pub(crate) cookie_key: Key,
}

impl AppState {
    pub fn try_init(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = Storage::select(&config.store);
        let secret = config.admin.secret_key.clone().unwrap_or_else(|| {
            warn!("SECRET_KEY is not set, sessions will not survive a restart");
            random_secret()
        });
        Ok(Self {
            config: Arc::new(config.clone()),
            storage: Arc::new(storage),
            sessions: Arc::default(),
            views: Arc::new(Views::new()?),
            cookie_key: derive_cookie_key(&secret),
        })
    }
}
