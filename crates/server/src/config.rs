use std::fmt;

use clap::{Args, Parser};
use tracing::{info, warn};

use crate::storage::StoreConfig;

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Args)]
pub struct AdminConfig {
    #[arg(long = "admin-email", env = "ADMIN_EMAIL")]
    pub email: String,
    #[arg(long = "admin-password", env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Secret the session cookie signing key is derived from. Random per
    /// process when unset, which logs everyone out on restart.
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Tutorial and video listing server")]
pub struct AppConfig {
    #[command(flatten)]
    pub server: ServerConfig,
    #[command(flatten)]
    pub admin: AdminConfig,
    #[command(flatten)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then command line arguments and environment.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("ignoring unreadable .env file: {e}"),
        }
        Self::parse()
    }
}
