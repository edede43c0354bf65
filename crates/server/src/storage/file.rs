use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::record::{Collection, Record, RecordId};

/// One pretty-printed JSON array per collection, rewritten in full on every
/// change. No locking: concurrent writers can lose each other's updates.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    #[instrument(skip_all, fields(collection = %R::COLLECTION))]
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        let path = self.collection_path(R::COLLECTION);
        let mut records: Vec<R> = read_records(&path).await?;
        records.sort_by_key(R::id);
        debug!("loaded {} record(s) from {}", records.len(), path.display());
        Ok(records)
    }

    /// Appends `record`. Entries already in the file are written back as they
    /// were read, including fields the record type doesn't know.
    #[instrument(skip_all, fields(collection = %R::COLLECTION, id = record.id()))]
    pub async fn save<R: Record>(&self, record: &R) -> Result<(), StorageError> {
        let path = self.collection_path(R::COLLECTION);
        let mut entries: Vec<Value> = read_records(&path).await?;
        entries.push(serde_json::to_value(record)?);
        self.write_records(&path, &entries).await?;
        info!("appended record {} to {}", record.id(), path.display());
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %R::COLLECTION))]
    pub async fn delete<R: Record>(&self, id: RecordId) -> Result<usize, StorageError> {
        let path = self.collection_path(R::COLLECTION);
        let mut entries: Vec<Value> = read_records(&path).await?;
        let before = entries.len();
        entries.retain(|entry| stored_id(entry) != Some(id));
        let removed = before - entries.len();
        if removed > 0 {
            self.write_records(&path, &entries).await?;
        }
        info!("removed {removed} record(s) with id {id} from {}", path.display());
        Ok(removed)
    }

    async fn write_records(&self, path: &Path, entries: &[Value]) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(entries)?;
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.data_dir.clone(),
                source,
            })?;
        fs::write(path, content)
            .await
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// The id a stored entry is listed under. A missing id reads as 0.
fn stored_id(entry: &Value) -> Option<RecordId> {
    match entry.get("id") {
        None => Some(0),
        Some(id) => id.as_i64(),
    }
}

/// A missing file is an empty collection, anything unparsable is corrupt.
async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&content).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
