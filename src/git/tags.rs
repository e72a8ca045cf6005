use crate::error::Result;
use crate::git::repository::GitRepository;

impl GitRepository {
    /// Full ref names of every tag (`refs/tags/...`), sorted by name.
    pub fn tags(&self) -> Result<Vec<String>> {
        self.with_repo(|repo| {
            let mut names = Vec::new();
            for reference in repo.references_glob("refs/tags/*")? {
                if let Some(name) = reference?.name() {
                    names.push(name.to_string());
                }
            }
            names.sort();
            Ok(names)
        })
    }
}
