//! History feed DTOs.
//!
//! - `HistoryQuery`: `GET /history` parameters with their defaults
//! - `HistoryEntry`: one commit of the feed
//!
//! Field names on the wire are camelCase, including the historical
//! `authorEmailAdress` spelling that existing consumers rely on.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryQuery {
    pub limit: i64,
    pub from: String,
    pub to: String,
    pub paths: String,
    pub ignore_message: String,
    pub show_files: bool,
    pub show_modules: bool,
    pub ignore_merges: bool,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            from: String::new(),
            to: String::new(),
            paths: String::new(),
            ignore_message: String::new(),
            show_files: true,
            show_modules: true,
            ignore_merges: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    pub hash: String,
    #[serde(rename = "authorEmailAdress")]
    pub author_email: String,
    pub author_date: DateTime<FixedOffset>,
    pub short_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
    /// Why files/modules are missing when the diff could not be computed
    #[serde(skip)]
    pub degraded: Option<String>,
}
