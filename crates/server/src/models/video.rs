use serde::{Deserialize, Serialize};

use crate::models::record::{Collection, Record, RecordId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: RecordId,
    pub title: Option<String>,
    pub video_embed: Option<String>,
}

impl Record for Video {
    const COLLECTION: Collection = Collection::LatestVideos;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub video_embed: Option<String>,
}

impl CreateVideoRequest {
    pub fn into_record(self, id: RecordId) -> Video {
        Video {
            id,
            title: self.title,
            video_embed: self.video_embed,
        }
    }
}
