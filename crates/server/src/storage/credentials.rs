use std::fs::read_to_string;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::storage::StoreConfig;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are exchanged again.
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The subset of a service account key file needed to talk to the document store.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, StorageError> {
        let content = read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content)
            .map_err(|e| StorageError::Credentials(format!("{}: {e}", path.display())))
    }

    /// Key file first, then the individual environment fields. `None` when
    /// neither is present.
    pub fn discover(config: &StoreConfig) -> Result<Option<Self>, StorageError> {
        if config.credentials_file.exists() {
            info!(
                "reading service account key from {}",
                config.credentials_file.display()
            );
            return Self::from_file(&config.credentials_file).map(Some);
        }
        let Some(private_key) = &config.firebase_private_key else {
            return Ok(None);
        };
        let client_email = config.firebase_client_email.clone().ok_or_else(|| {
            StorageError::Credentials("FIREBASE_CLIENT_EMAIL is not set".to_string())
        })?;
        info!("using service account key from environment");
        Ok(Some(Self {
            project_id: config.firebase_project_id.clone(),
            private_key_id: config.firebase_private_key_id.clone(),
            // keys passed through env usually carry escaped newlines
            private_key: private_key.replace("\\n", "\n"),
            client_email,
            token_uri: default_token_uri(),
        }))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Mints OAuth2 access tokens through the service account JWT bearer flow
/// and caches them until shortly before they expire.
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    key_id: Option<String>,
    encoding_key: EncodingKey,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: &ServiceAccountKey) -> Result<Self, StorageError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(Self {
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            key_id: key.private_key_id.clone(),
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    pub async fn access_token(&self, http: &Client) -> Result<String, StorageError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }
        let token = self.exchange(http).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn exchange(&self, http: &Client) -> Result<AccessToken, StorageError> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        let assertion = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        let response: TokenResponse = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("exchanged assertion for token valid {}s", response.expires_in);
        Ok(AccessToken {
            value: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in),
        })
    }
}
