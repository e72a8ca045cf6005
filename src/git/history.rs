//! History feed assembly.
//!
//! Drives a `CommitLog`, drops commits whose short message contains the
//! ignore filter, numbers the survivors from 1 and enriches each one with its
//! changed files and modules when asked to.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Commit, Repository};

use crate::error::Result;
use crate::git::changes::Enrichment;
use crate::git::log::LogQuery;
use crate::git::repository::GitRepository;
use crate::models::{HistoryEntry, HistoryQuery};

#[derive(Debug, Clone)]
pub struct HistoryOptions {
    /// Substring to exclude by; blank disables the filter
    pub ignore_message: String,
    pub show_files: bool,
    pub show_modules: bool,
}

impl From<&HistoryQuery> for HistoryOptions {
    fn from(query: &HistoryQuery) -> Self {
        Self {
            ignore_message: query.ignore_message.clone(),
            show_files: query.show_files,
            show_modules: query.show_modules,
        }
    }
}

impl GitRepository {
    pub fn history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>> {
        self.with_repo(|repo| {
            let commits = LogQuery::new()
                .max_count(query.limit)
                .range(&query.from, &query.to)
                .paths(&query.paths)
                .ignore_merges(query.ignore_merges)
                .walk(repo)?;

            let entries = assemble(repo, commits, &HistoryOptions::from(query))
                .collect::<Result<Vec<_>>>()?;

            let degraded = entries.iter().filter(|e| e.degraded.is_some()).count();
            if degraded > 0 {
                tracing::warn!("{} history entries are missing their changes", degraded);
            }

            tracing::info!(
                "History query (limit={}, from='{}', to='{}') returned {} entries",
                query.limit,
                query.from,
                query.to,
                entries.len()
            );
            Ok(entries)
        })
    }
}

/// Turn a commit sequence into history entries.
///
/// Ids are assigned after the message filter, so dropped commits never
/// leave gaps. A traversal error is passed through as-is.
pub fn assemble<'r, I>(
    repo: &'r Repository,
    commits: I,
    options: &HistoryOptions,
) -> impl Iterator<Item = Result<HistoryEntry>> + use<'r, I>
where
    I: Iterator<Item = Result<Commit<'r>>> + 'r,
{
    let ignore_message = options.ignore_message.clone();
    let (show_files, show_modules) = (options.show_files, options.show_modules);
    let mut next_id: u64 = 0;

    commits
        .filter(move |item| match item {
            Ok(commit) => message_passes(&short_message(commit), &ignore_message),
            Err(_) => true,
        })
        .map(move |item| {
            let commit = item?;
            next_id += 1;
            Ok(to_entry(repo, &commit, next_id, show_files, show_modules))
        })
}

pub fn message_passes(short_message: &str, ignore_message: &str) -> bool {
    ignore_message.trim().is_empty() || !short_message.contains(ignore_message)
}

fn to_entry(
    repo: &Repository,
    commit: &Commit,
    id: u64,
    show_files: bool,
    show_modules: bool,
) -> HistoryEntry {
    let author = commit.author();
    let mut entry = HistoryEntry {
        id,
        hash: commit.id().to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        author_date: to_datetime(author.when()),
        short_message: short_message(commit),
        files: None,
        modules: None,
        degraded: None,
    };

    if show_files || show_modules {
        match Enrichment::for_commit(repo, commit) {
            Enrichment::Collected(changes) => {
                if show_files {
                    entry.files = non_empty(changes.files);
                }
                if show_modules {
                    entry.modules = non_empty(changes.modules);
                }
            }
            Enrichment::Degraded { reason } => entry.degraded = Some(reason),
        }
    }

    entry
}

/// First paragraph of the message, whitespace folded.
fn short_message(commit: &Commit) -> String {
    commit
        .summary_bytes()
        .map(String::from_utf8_lossy)
        .unwrap_or_default()
        .to_string()
}

fn to_datetime(time: git2::Time) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() { None } else { Some(items) }
}
