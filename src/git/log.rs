//! Commit traversal for the history feed.
//!
//! `LogQuery` collects the walk parameters; `LogQuery::walk` turns them into
//! a lazy `CommitLog` over the repository. Every predicate (merge exclusion,
//! path scope) runs before the count limit, so asking for N commits yields N
//! matching commits whenever that many exist.

use git2::{Commit, DiffOptions, Repository, Revwalk, Sort, Tree};

use crate::error::Result;
use crate::git::range::resolve_ref;

#[derive(Debug, Clone)]
pub struct LogQuery {
    max_count: i64,
    from: String,
    to: String,
    paths: Vec<String>,
    ignore_merges: bool,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            max_count: -1,
            from: String::new(),
            to: String::new(),
            paths: Vec::new(),
            ignore_merges: false,
        }
    }
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative means unbounded.
    pub fn max_count(mut self, max_count: i64) -> Self {
        self.max_count = max_count;
        self
    }

    /// Walk `(to, from]`. Names that don't resolve are dropped at walk time.
    pub fn range(mut self, from: &str, to: &str) -> Self {
        self.from = from.to_string();
        self.to = to.to_string();
        self
    }

    /// Comma-separated path scope; a commit must touch at least one entry.
    pub fn paths(mut self, csv: &str) -> Self {
        self.paths = csv
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn ignore_merges(mut self, ignore_merges: bool) -> Self {
        self.ignore_merges = ignore_merges;
        self
    }

    pub fn walk<'r>(&self, repo: &'r Repository) -> Result<CommitLog<'r>> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        match resolve_ref(repo, &self.from) {
            Some(from) => {
                revwalk.push(from)?;
                if let Some(to) = resolve_ref(repo, &self.to) {
                    revwalk.hide(to)?;
                    tracing::debug!("Walking range {}..{}", to, from);
                } else {
                    tracing::debug!("Walking ancestors of {}", from);
                }
            }
            None => {
                if repo.head().is_err() {
                    tracing::debug!("HEAD is unborn, nothing to walk");
                    return Ok(CommitLog::empty(repo, revwalk));
                }
                revwalk.push_head()?;
                tracing::debug!("Walking from HEAD");
            }
        }

        Ok(CommitLog {
            repo,
            revwalk,
            remaining: usize::try_from(self.max_count).ok(),
            ignore_merges: self.ignore_merges,
            paths: self.paths.clone(),
            exhausted: false,
        })
    }
}

/// Lazy, newest-first sequence of commits matching a `LogQuery`.
pub struct CommitLog<'r> {
    repo: &'r Repository,
    revwalk: Revwalk<'r>,
    remaining: Option<usize>,
    ignore_merges: bool,
    paths: Vec<String>,
    exhausted: bool,
}

impl<'r> CommitLog<'r> {
    fn empty(repo: &'r Repository, revwalk: Revwalk<'r>) -> Self {
        Self {
            repo,
            revwalk,
            remaining: Some(0),
            ignore_merges: false,
            paths: Vec::new(),
            exhausted: true,
        }
    }

    fn accepts(&self, commit: &Commit) -> Result<bool> {
        if self.ignore_merges && commit.parent_count() > 1 {
            return Ok(false);
        }
        if self.paths.is_empty() {
            return Ok(true);
        }
        commit_touches_paths(self.repo, commit, &self.paths)
    }

    fn next_match(&mut self) -> Result<Option<Commit<'r>>> {
        while let Some(oid) = self.revwalk.next() {
            let commit = self.repo.find_commit(oid?)?;
            if self.accepts(&commit)? {
                return Ok(Some(commit));
            }
        }
        Ok(None)
    }
}

impl<'r> Iterator for CommitLog<'r> {
    type Item = Result<Commit<'r>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.remaining == Some(0) {
            return None;
        }

        match self.next_match() {
            Ok(Some(commit)) => {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                Some(Ok(commit))
            }
            Ok(None) => {
                self.exhausted = true;
                None
            }
            // A broken walk can't be resumed meaningfully.
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

/// A commit touches the path scope when its tree differs from its parent
/// under at least one pathspec. Merges must differ from every parent, the
/// way `git log -- <path>` simplifies history.
fn commit_touches_paths(repo: &Repository, commit: &Commit, paths: &[String]) -> Result<bool> {
    let tree = commit.tree()?;

    if commit.parent_count() == 0 {
        return tree_differs(repo, None, &tree, paths);
    }

    for parent in commit.parents() {
        let parent_tree = parent.tree()?;
        if !tree_differs(repo, Some(&parent_tree), &tree, paths)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn tree_differs(repo: &Repository, old: Option<&Tree>, new: &Tree, paths: &[String]) -> Result<bool> {
    let mut opts = DiffOptions::new();
    for path in paths {
        opts.pathspec(path);
    }

    let diff = repo.diff_tree_to_tree(old, Some(new), Some(&mut opts))?;
    Ok(diff.deltas().len() > 0)
}
