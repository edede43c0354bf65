use serde::{Deserialize, Serialize};

use crate::models::record::{Collection, Record, RecordId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    #[serde(default)]
    pub id: RecordId,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub code_snippets: Vec<String>,
    pub video_embed: Option<String>,
    #[serde(default)]
    pub code_urls: Vec<String>,
    #[serde(default)]
    pub files_urls: Vec<String>,
}

impl Record for Tutorial {
    const COLLECTION: Collection = Collection::Tutorials;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTutorialRequest {
    pub title: Option<String>,
    pub description: String,
    pub code_snippets: Vec<String>,
    pub video_embed: Option<String>,
    pub code_urls: Vec<String>,
    pub files_urls: Vec<String>,
}

impl CreateTutorialRequest {
    pub fn into_record(self, id: RecordId) -> Tutorial {
        Tutorial {
            id,
            title: self.title,
            description: Some(self.description),
            code_snippets: self.code_snippets,
            video_embed: self.video_embed,
            code_urls: self.code_urls,
            files_urls: self.files_urls,
        }
    }
}
