use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::async_trait;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use dashmap::DashSet;
use sha2::{Digest, Sha512};
use tracing::debug;
use uuid::Uuid;

use crate::error::SessionError;
use crate::server::state::AppState;

pub type SessionId = Uuid;

pub const SESSION_COOKIE: &str = "session";

/// Cookie signing key derived from the configured secret. SHA-512 yields the
/// 64 bytes [`Key::from`] requires regardless of the secret's length.
pub fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn random_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Ids of the sessions that passed an admin credential check. Entries leave
/// only on logout or when the same browser logs in again; sessions never expire.
#[derive(Debug, Default)]
pub struct SessionStore {
    admins: DashSet<SessionId>,
}

impl SessionStore {
    pub fn open_admin(&self) -> SessionId {
        let session_id = Uuid::new_v4();
        self.admins.insert(session_id);
        session_id
    }

    pub fn is_admin(&self, session_id: &SessionId) -> bool {
        self.admins.contains(session_id)
    }

    pub fn close(&self, session_id: &SessionId) -> bool {
        self.admins.remove(session_id).is_some()
    }
}

pub fn session_id(jar: &SignedCookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(session_id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Extracting this guards a handler: requests without an admin session are
/// rejected with 401 before the handler runs.
#[derive(Debug)]
pub struct AdminSession {
    pub session_id: SessionId,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let session_id = session_id(&jar).ok_or_else(|| {
            debug!("missing or tampered session cookie");
            SessionError::Unauthorized
        })?;
        if !state.sessions.is_admin(&session_id) {
            debug!("session {session_id} is not an admin session");
            return Err(SessionError::Unauthorized);
        }
        Ok(AdminSession { session_id })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sessions_lose_admin_rights() {
        let store = SessionStore::default();
        let kept = store.open_admin();
        let closed = store.open_admin();
        assert_ne!(kept, closed);

        assert!(store.close(&closed));
        assert!(!store.close(&closed));
        assert!(!store.is_admin(&closed));
        assert!(store.is_admin(&kept));
        assert_eq!(store.admins.len(), 1);
    }
}
