use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::server::state::AppState;
use crate::server::{admin, content};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(content::index))
        .route("/tutorials", get(content::tutorials))
        .route("/admin-login", post(admin::admin_login))
        .route("/verify-admin", post(admin::verify_admin))
        .route("/logout", get(admin::logout))
        .route("/add-tutorial", post(content::add_tutorial))
        .route("/delete-tutorial/:id", post(content::delete_tutorial))
        .route("/delete-video/:id", post(content::delete_video))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("address: {addr}"))?;
    info!("starting server on: {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("unable to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("unable to listen for terminate signal: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
