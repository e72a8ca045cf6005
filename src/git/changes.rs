//! Changed files and touched modules of a single commit.
//!
//! A commit is diffed against its first parent (roots against the empty
//! tree). Each delta contributes one representative path: the old path for
//! deletions, the new path otherwise. The module of a path is its first
//! segment, or `<ROOT>` for files at the top level.

use git2::{Commit, Delta, DiffDelta, Repository};

/// Module name for changes outside any directory.
pub const ROOT_MODULE: &str = "<ROOT>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Paths in diff enumeration order
    pub files: Vec<String>,
    /// First path segments, deduplicated, in first-seen order
    pub modules: Vec<String>,
}

impl ChangeSet {
    pub fn collect(repo: &Repository, commit: &Commit) -> Result<Self, git2::Error> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut changes = ChangeSet::default();
        for delta in diff.deltas() {
            if let Some(path) = representative_path(&delta) {
                changes.push(path);
            }
        }
        Ok(changes)
    }

    fn push(&mut self, path: String) {
        let module = module_of(&path);
        if !self.modules.iter().any(|m| m == module) {
            self.modules.push(module.to_string());
        }
        self.files.push(path);
    }
}

/// Outcome of enriching one commit with its changes.
///
/// Diff failures don't abort the history walk; they degrade the entry and
/// keep the reason so "diff failed" stays distinguishable from "no changes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Collected(ChangeSet),
    Degraded { reason: String },
}

impl Enrichment {
    pub fn for_commit(repo: &Repository, commit: &Commit) -> Self {
        match ChangeSet::collect(repo, commit) {
            Ok(changes) => Enrichment::Collected(changes),
            Err(e) => {
                tracing::warn!("Could not collect changes for {}: {}", commit.id(), e);
                Enrichment::Degraded {
                    reason: e.message().to_string(),
                }
            }
        }
    }
}

fn representative_path(delta: &DiffDelta) -> Option<String> {
    let file = match delta.status() {
        Delta::Deleted => delta.old_file(),
        _ => delta.new_file(),
    };
    file.path().map(|p| p.to_string_lossy().to_string())
}

/// Git paths always use `/`, whatever the host platform.
pub fn module_of(path: &str) -> &str {
    match path.split_once('/') {
        Some((first, _)) if !first.is_empty() => first,
        _ => ROOT_MODULE,
    }
}
