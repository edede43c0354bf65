use std::path::{Path, PathBuf};

use crate::config::{AdminConfig, AppConfig, ServerConfig};
use crate::storage::StoreConfig;

mod document;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub fn file_store_config(data_dir: &Path) -> StoreConfig {
    StoreConfig {
        data_dir: data_dir.to_path_buf(),
        credentials_file: data_dir.join("missing-key.json"),
        firebase_project_id: None,
        firebase_private_key_id: None,
        firebase_private_key: None,
        firebase_client_email: None,
        firestore_emulator_host: None,
    }
}

pub fn test_config(data_dir: &Path) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        admin: AdminConfig {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            secret_key: Some("integration test secret".to_string()),
        },
        store: file_store_config(data_dir),
    }
}

pub fn collection_file(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{name}.json"))
}
