//! Throwaway repositories for unit tests.
//!
//! Every commit advances a fake clock by one minute so time-sorted walks
//! are deterministic.

use git2::{Commit, ObjectType, Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory for test repo");
        let repo = Repository::init(dir.path()).expect("Failed to init test repo");
        Self {
            dir,
            repo,
            clock: 1_600_000_000,
        }
    }

    pub fn head(&self) -> Option<Oid> {
        self.repo.head().ok().and_then(|h| h.target())
    }

    /// Commit on top of HEAD, writing and deleting the given files.
    pub fn commit(&mut self, message: &str, writes: &[(&str, &str)], deletes: &[&str]) -> Oid {
        let parents: Vec<Oid> = self.head().into_iter().collect();
        let tree = self.stage(writes, deletes);
        self.commit_tree(Some("HEAD"), message, tree, &parents)
    }

    /// Commit a root-level file on top of `parent` without moving HEAD or
    /// touching the index.
    pub fn side_commit(&mut self, message: &str, parent: Oid, file: (&str, &str)) -> Oid {
        let tree = {
            let base = self.repo.find_commit(parent).unwrap().tree().unwrap();
            let blob = self.repo.blob(file.1.as_bytes()).unwrap();
            let mut builder = self.repo.treebuilder(Some(&base)).unwrap();
            builder.insert(file.0, blob, 0o100644).unwrap();
            builder.write().unwrap()
        };
        self.commit_tree(None, message, tree, &[parent])
    }

    /// Merge `other` into HEAD. `writes` should carry whatever the merged
    /// side introduced so the merge tree contains it.
    pub fn merge(&mut self, message: &str, other: Oid, writes: &[(&str, &str)]) -> Oid {
        let head = self.head().expect("merge needs a HEAD commit");
        let tree = self.stage(writes, &[]);
        self.commit_tree(Some("HEAD"), message, tree, &[head, other])
    }

    /// Write a commit reusing `base`'s tree whose parent is absent from the
    /// object database, so diffing it against its parent fails.
    pub fn commit_with_missing_parent(&self, base: Oid) -> Oid {
        let tree = self.repo.find_commit(base).unwrap().tree_id();
        let raw = format!(
            "tree {}\nparent {}\nauthor Test <test@example.com> {} +0000\ncommitter Test <test@example.com> {} +0000\n\norphan\n",
            tree,
            "1111111111111111111111111111111111111111",
            self.clock + 60,
            self.clock + 60,
        );
        let odb = self.repo.odb().unwrap();
        odb.write(ObjectType::Commit, raw.as_bytes()).unwrap()
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) -> Oid {
        let object = self.repo.find_object(target, None).unwrap();
        let sig = Signature::new("Test", "test@example.com", &Time::new(self.clock, 0)).unwrap();
        self.repo.tag(name, &object, &sig, name, false).unwrap()
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    fn stage(&self, writes: &[(&str, &str)], deletes: &[&str]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (path, content) in writes {
            let full = self.dir.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, content).unwrap();
            index.add_path(Path::new(path)).unwrap();
        }
        for path in deletes {
            let _ = fs::remove_file(self.dir.path().join(path));
            index.remove_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        index.write_tree().unwrap()
    }

    fn commit_tree(&mut self, update_ref: Option<&str>, message: &str, tree: Oid, parents: &[Oid]) -> Oid {
        self.clock += 60;
        let sig = Signature::new("Test", "test@example.com", &Time::new(self.clock, 120)).unwrap();
        let tree = self.repo.find_tree(tree).unwrap();
        let parents: Vec<Commit> = parents.iter().map(|p| self.repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();
        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }
}
