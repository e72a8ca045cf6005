//! History feed endpoint.
//!
//! GET /history?limit=&from=&to=&paths=&ignoreMessage=&showFiles=&showModules=&ignoreMerges=
//!
//! Returns a JSON array of commits, newest first, numbered from 1 after
//! filtering. `files` and `modules` appear only when requested and non-empty.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::git::SharedRepo;
use crate::models::{HistoryEntry, HistoryQuery};

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/history", get(get_history))
        .with_state(repo)
}

async fn get_history(
    State(repo): State<SharedRepo>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let entries = tokio::task::spawn_blocking(move || repo.history(&query))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(entries))
}
