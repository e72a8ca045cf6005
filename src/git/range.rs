//! Ref name resolution for history ranges.
//!
//! A name that is blank or unknown resolves to `None`: callers treat that as
//! "no constraint", never as a failure.

use git2::{ObjectType, Oid, Reference, Repository};

/// Resolve a short or full ref name to the object a walk should start from.
///
/// Annotated tags are peeled through every tag level; if peeling fails the
/// ref's direct target is used instead.
pub fn resolve_ref(repo: &Repository, name: &str) -> Option<Oid> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let reference = match repo.resolve_reference_from_short_name(name) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Ref '{}' not found: {}", name, e.message());
            return None;
        }
    };

    let oid = peeled_id(&reference).or_else(|| direct_id(&reference));
    tracing::debug!("Resolved ref '{}' to {:?}", name, oid);
    oid
}

fn peeled_id(reference: &Reference) -> Option<Oid> {
    reference.peel(ObjectType::Any).ok().map(|obj| obj.id())
}

fn direct_id(reference: &Reference) -> Option<Oid> {
    reference.target().or_else(|| reference.resolve().ok()?.target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::TestRepo;

    #[test]
    fn test_blank_name_is_no_constraint() {
        let mut fixture = TestRepo::new();
        fixture.commit("initial", &[("README.md", "hello")], &[]);

        assert_eq!(resolve_ref(&fixture.repo, ""), None);
        assert_eq!(resolve_ref(&fixture.repo, "   "), None);
    }

    #[test]
    fn test_unknown_name_is_no_constraint() {
        let mut fixture = TestRepo::new();
        fixture.commit("initial", &[("README.md", "hello")], &[]);

        assert_eq!(resolve_ref(&fixture.repo, "v9.9.9"), None);
    }

    #[test]
    fn test_annotated_tag_is_peeled_to_commit() {
        let mut fixture = TestRepo::new();
        let c1 = fixture.commit("initial", &[("README.md", "hello")], &[]);
        let tag_oid = fixture.annotated_tag("v1.0", c1);
        assert_ne!(tag_oid, c1);

        assert_eq!(resolve_ref(&fixture.repo, "v1.0"), Some(c1));
        assert_eq!(resolve_ref(&fixture.repo, "refs/tags/v1.0"), Some(c1));
    }

    #[test]
    fn test_tag_of_tag_is_fully_peeled() {
        let mut fixture = TestRepo::new();
        let c1 = fixture.commit("initial", &[("README.md", "hello")], &[]);
        let inner = fixture.annotated_tag("inner", c1);
        fixture.annotated_tag("outer", inner);

        assert_eq!(resolve_ref(&fixture.repo, "outer"), Some(c1));
    }

    #[test]
    fn test_lightweight_tag_and_branch() {
        let mut fixture = TestRepo::new();
        let c1 = fixture.commit("initial", &[("README.md", "hello")], &[]);
        let c2 = fixture.commit("second", &[("README.md", "hello again")], &[]);
        fixture.lightweight_tag("light", c1);
        fixture.branch("feature", c2);

        assert_eq!(resolve_ref(&fixture.repo, "light"), Some(c1));
        assert_eq!(resolve_ref(&fixture.repo, "feature"), Some(c2));
        assert_eq!(resolve_ref(&fixture.repo, "HEAD"), Some(c2));
    }
}
