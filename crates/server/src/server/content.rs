use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use tracing::{error, info};

use crate::auth::session::AdminSession;
use crate::error::RequestError;
use crate::models::record::{next_id, Record, RecordId};
use crate::models::submission::{Submission, SubmittedForm};
use crate::models::tutorial::Tutorial;
use crate::models::video::Video;
use crate::server::state::AppState;
use crate::storage::Storage;

/// Listing pages degrade to an empty list when the store can't be read.
async fn load_or_empty<R: Record>(storage: &Storage) -> Vec<R> {
    storage.load::<R>().await.unwrap_or_else(|e| {
        error!("unable to load {}: {e}", R::COLLECTION);
        Vec::new()
    })
}

pub async fn index(
    State(state): State<AppState>,
    admin: Option<AdminSession>,
) -> Result<Html<String>, RequestError> {
    let videos: Vec<Video> = load_or_empty(&state.storage).await;
    Ok(Html(state.views.render_index(&videos, admin.is_some())?))
}

pub async fn tutorials(
    State(state): State<AppState>,
    admin: Option<AdminSession>,
) -> Result<Html<String>, RequestError> {
    let tutorials: Vec<Tutorial> = load_or_empty(&state.storage).await;
    Ok(Html(
        state.views.render_tutorials(&tutorials, admin.is_some())?,
    ))
}

pub async fn add_tutorial(
    admin: AdminSession,
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, RequestError> {
    let form = SubmittedForm::from_pairs(fields);
    match Submission::from_form(&form) {
        Submission::Video(request) => {
            let existing: Vec<Video> = state.storage.load().await?;
            let video = request.into_record(next_id(&existing)?);
            state.storage.save(&video).await?;
            info!(session = %admin.session_id, "added video {}", video.id);
            Ok(Redirect::to("/"))
        }
        Submission::Tutorial(request) => {
            let existing: Vec<Tutorial> = state.storage.load().await?;
            let tutorial = request.into_record(next_id(&existing)?);
            state.storage.save(&tutorial).await?;
            info!(session = %admin.session_id, "added tutorial {}", tutorial.id);
            Ok(Redirect::to("/tutorials"))
        }
    }
}

pub async fn delete_tutorial(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Redirect, RequestError> {
    let removed = state.storage.delete::<Tutorial>(id).await?;
    info!(session = %admin.session_id, "deleted {removed} tutorial(s) with id {id}");
    Ok(Redirect::to("/tutorials"))
}

pub async fn delete_video(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Redirect, RequestError> {
    let removed = state.storage.delete::<Video>(id).await?;
    info!(session = %admin.session_id, "deleted {removed} video(s) with id {id}");
    Ok(Redirect::to("/"))
}
