//! The web surface: every page load runs a fresh check.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ProjectTree;
use crate::registry::Source;
use crate::report::{self, html};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn Source>,
    pub tree: Arc<ProjectTree>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/deps.json", get(json_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("kit-deps-checkr listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

pub(crate) async fn index_handler(State(state): State<AppState>) -> Response {
    match report::run(state.source.clone(), &state.tree).await {
        Ok(deps) => Html(html::render(&deps)).into_response(),
        Err(e) => {
            error!("{e}");
            (StatusCode::BAD_GATEWAY, Html(html::render_error(&e.to_string()))).into_response()
        }
    }
}

pub(crate) async fn json_handler(State(state): State<AppState>) -> Response {
    match report::run(state.source.clone(), &state.tree).await {
        Ok(deps) => Json(deps).into_response(),
        Err(e) => {
            error!("{e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}
