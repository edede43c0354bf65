use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{info, warn};

use crate::auth::admin::{AdminLoginForm, LoginResponse, VerifyAdminForm};
use crate::auth::session::{removal_cookie, session_cookie, session_id};
use crate::server::state::AppState;

/// Replaces whatever session the browser had with a fresh admin session.
fn start_admin_session(state: &AppState, jar: SignedCookieJar) -> SignedCookieJar {
    if let Some(previous) = session_id(&jar) {
        state.sessions.close(&previous);
    }
    let session_id = state.sessions.open_admin();
    info!("opened admin session {session_id}");
    jar.add(session_cookie(session_id))
}

pub async fn admin_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AdminLoginForm>,
) -> (SignedCookieJar, Json<LoginResponse>) {
    let admin = &state.config.admin;
    if admin.accepts_login(form.email.as_deref(), form.password.as_deref()) {
        let jar = start_admin_session(&state, jar);
        (jar, Json(LoginResponse::accepted()))
    } else {
        warn!("rejected admin login");
        (jar, Json(LoginResponse::rejected("Invalid credentials")))
    }
}

pub async fn verify_admin(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<VerifyAdminForm>,
) -> (SignedCookieJar, Json<LoginResponse>) {
    if state.config.admin.accepts_password(form.admin_password.as_deref()) {
        let jar = start_admin_session(&state, jar);
        (jar, Json(LoginResponse::accepted()))
    } else {
        warn!("rejected admin password");
        (jar, Json(LoginResponse::rejected("Invalid admin password")))
    }
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    if let Some(session_id) = session_id(&jar) {
        if state.sessions.close(&session_id) {
            info!("closed admin session {session_id}");
        }
    }
    (jar.remove(removal_cookie()), Redirect::to("/"))
}
