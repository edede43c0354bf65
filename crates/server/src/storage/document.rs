use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::record::{Record, RecordId};
use crate::storage::credentials::{ServiceAccountAuth, ServiceAccountKey};
use crate::storage::value::{decode_record, encode_record, encode_value, Fields};
use crate::storage::StoreConfig;

const FIRESTORE_API_ROOT: &str = "https://firestore.googleapis.com/v1";
const EMULATOR_BEARER: &str = "owner";

enum Authenticator {
    ServiceAccount(ServiceAccountAuth),
    Emulator,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct RunQueryRow {
    document: Option<Document>,
}

/// Records kept in a Firestore database, one document per record under an
/// auto-generated document id. Ordering and lookup use the `id` field.
pub struct DocumentStore {
    http: Client,
    api_root: String,
    project_id: String,
    auth: Authenticator,
}

impl DocumentStore {
    /// `Ok(None)` when no credentials are configured at all, `Err` when they
    /// are present but unusable.
    pub fn from_config(config: &StoreConfig) -> Result<Option<Self>, StorageError> {
        if let Some(host) = &config.firestore_emulator_host {
            let project_id = config.firebase_project_id.clone().ok_or_else(|| {
                StorageError::Credentials(
                    "FIREBASE_PROJECT_ID is required with the emulator".to_string(),
                )
            })?;
            info!("using document store emulator at {host}");
            // the emulator is local, system proxies must not intercept it
            let http = Client::builder().no_proxy().build()?;
            return Ok(Some(Self {
                http,
                api_root: format!("http://{host}/v1"),
                project_id,
                auth: Authenticator::Emulator,
            }));
        }

        let Some(key) = ServiceAccountKey::discover(config)? else {
            return Ok(None);
        };
        let project_id = key.project_id.clone().ok_or_else(|| {
            StorageError::Credentials("service account key has no project id".to_string())
        })?;
        let auth = ServiceAccountAuth::new(&key)?;
        Ok(Some(Self {
            http: Client::builder().build()?,
            api_root: FIRESTORE_API_ROOT.to_string(),
            project_id,
            auth: Authenticator::ServiceAccount(auth),
        }))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.api_root, self.project_id
        )
    }

    async fn bearer(&self) -> Result<String, StorageError> {
        match &self.auth {
            Authenticator::ServiceAccount(auth) => auth.access_token(&self.http).await,
            Authenticator::Emulator => Ok(EMULATOR_BEARER.to_string()),
        }
    }

    async fn run_query(&self, structured_query: Value) -> Result<Vec<Document>, StorageError> {
        let rows: Vec<RunQueryRow> = self
            .http
            .post(format!("{}:runQuery", self.documents_url()))
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        // rows without a document only carry read metadata
        Ok(rows.into_iter().filter_map(|row| row.document).collect())
    }

    #[instrument(skip_all, fields(collection = %R::COLLECTION))]
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        let documents = self
            .run_query(json!({
                "from": [{ "collectionId": R::COLLECTION.to_string() }],
                "orderBy": [{ "field": { "fieldPath": "id" }, "direction": "ASCENDING" }],
            }))
            .await?;
        debug!("fetched {} document(s)", documents.len());
        documents
            .into_iter()
            .map(|document| decode_record(document.fields))
            .collect()
    }

    #[instrument(skip_all, fields(collection = %R::COLLECTION, id = record.id()))]
    pub async fn save<R: Record>(&self, record: &R) -> Result<(), StorageError> {
        let created: Document = self
            .http
            .post(format!("{}/{}", self.documents_url(), R::COLLECTION))
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "fields": encode_record(record)? }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("created document {} for record {}", created.name, record.id());
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %R::COLLECTION))]
    pub async fn delete<R: Record>(&self, id: RecordId) -> Result<usize, StorageError> {
        let documents = self
            .run_query(json!({
                "from": [{ "collectionId": R::COLLECTION.to_string() }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "id" },
                        "op": "EQUAL",
                        "value": encode_value(Value::from(id)),
                    }
                },
            }))
            .await?;

        let token = self.bearer().await?;
        let deletions = documents.iter().map(|document| {
            let request = self
                .http
                .delete(format!("{}/{}", self.api_root, document.name))
                .bearer_auth(&token);
            async move {
                request
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map(drop)
            }
        });
        try_join_all(deletions).await?;
        info!("deleted {} document(s) with id {id}", documents.len());
        Ok(documents.len())
    }
}
