use std::fmt;
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::models::record::{Record, RecordId};
use crate::storage::document::DocumentStore;
use crate::storage::file::FileStore;

pub mod credentials;
pub mod document;
pub mod file;
pub mod value;

#[derive(Clone, Args)]
pub struct StoreConfig {
    /// Directory holding the collection files when no document store is configured.
    #[arg(long, env = "DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,
    /// Service account key file, preferred over the individual `FIREBASE_*` fields.
    #[arg(long, env = "FIREBASE_CREDENTIALS_FILE", default_value = "firebase-key.json")]
    pub credentials_file: PathBuf,
    #[arg(long, env = "FIREBASE_PROJECT_ID")]
    pub firebase_project_id: Option<String>,
    #[arg(long, env = "FIREBASE_PRIVATE_KEY_ID")]
    pub firebase_private_key_id: Option<String>,
    #[arg(long, env = "FIREBASE_PRIVATE_KEY", hide_env_values = true)]
    pub firebase_private_key: Option<String>,
    #[arg(long, env = "FIREBASE_CLIENT_EMAIL")]
    pub firebase_client_email: Option<String>,
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub firestore_emulator_host: Option<String>,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .field("credentials_file", &self.credentials_file)
            .field("firebase_project_id", &self.firebase_project_id)
            .field("firebase_private_key_id", &self.firebase_private_key_id)
            .field(
                "firebase_private_key",
                &self.firebase_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("firebase_client_email", &self.firebase_client_email)
            .field("firestore_emulator_host", &self.firestore_emulator_host)
            .finish()
    }
}

/// The active persistence backend. Every storage operation dispatches here.
pub enum Storage {
    Document(DocumentStore),
    File(FileStore),
}

impl Storage {
    /// Picks the document store when credentials are available and usable,
    /// otherwise the collection files in `data_dir`. Never fails.
    pub fn select(config: &StoreConfig) -> Self {
        match DocumentStore::from_config(config) {
            Ok(Some(store)) => {
                info!("document store initialized for project {}", store.project_id());
                Self::Document(store)
            }
            Ok(None) => {
                info!(
                    "no document store credentials, using collection files in {}",
                    config.data_dir.display()
                );
                Self::File(FileStore::new(&config.data_dir))
            }
            Err(e) => {
                warn!("document store not initialized: {e}");
                warn!(
                    "falling back to collection files in {}",
                    config.data_dir.display()
                );
                Self::File(FileStore::new(&config.data_dir))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::File(_) => "file",
        }
    }

    /// All records of the collection, ordered by id.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        match self {
            Self::Document(store) => store.load().await,
            Self::File(store) => store.load().await,
        }
    }

    pub async fn save<R: Record>(&self, record: &R) -> Result<(), StorageError> {
        match self {
            Self::Document(store) => store.save(record).await,
            Self::File(store) => store.save(record).await,
        }
    }

    /// Removes every record carrying `id` and returns how many were removed.
    pub async fn delete<R: Record>(&self, id: RecordId) -> Result<usize, StorageError> {
        match self {
            Self::Document(store) => store.delete::<R>(id).await,
            Self::File(store) => store.delete::<R>(id).await,
        }
    }
}
