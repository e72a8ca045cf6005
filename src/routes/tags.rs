//! GET /tags
//!
//! Returns every tag ref name as a flat JSON array of strings.

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::git::SharedRepo;

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/tags", get(list_tags))
        .with_state(repo)
}

async fn list_tags(State(repo): State<SharedRepo>) -> Result<Json<Vec<String>>> {
    let tags = tokio::task::spawn_blocking(move || repo.tags())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(tags))
}
