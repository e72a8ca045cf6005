//! API route handlers - maps HTTP endpoints to git operations.
//!
//! - `history`: Filterable commit feed (GET /history)
//! - `tags`: Tag names (GET /tags)

pub mod history;
pub mod tags;

use axum::Router;

use crate::git::SharedRepo;

pub fn create_router(repo: SharedRepo) -> Router {
    Router::new()
        .merge(history::routes(repo.clone()))
        .merge(tags::routes(repo))
}
