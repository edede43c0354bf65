use serde::de::DeserializeOwned;
use serde::Serialize;
use strum_macros::Display;

use crate::error::StorageError;

pub type RecordId = i64;

/// Named group of same-shaped records. The string form is the collection name
/// in the document store and the file stem in the file store.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Tutorials,
    LatestVideos,
}

pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> RecordId;
}

/// `max(existing ids) + 1`, or 0 for an empty collection.
pub fn next_id<R: Record>(existing: &[R]) -> Result<RecordId, StorageError> {
    match existing.iter().map(R::id).max() {
        None => Ok(0),
        Some(max) => max
            .checked_add(1)
            .ok_or(StorageError::IdsExhausted(R::COLLECTION)),
    }
}
