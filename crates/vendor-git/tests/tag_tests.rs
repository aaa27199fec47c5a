//! Tests for idempotent local tag creation

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;
use vendor_git::{Error, TagOutcome, ensure_tag, open_repository, tag_exists};
use vendor_test_utils::git::{commit_all, repo_with_commit, tag_names};

#[test]
fn test_ensure_tag_creates_at_head() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());

    let outcome = ensure_tag(&repo, "golang/v0.16.0").unwrap();

    assert_eq!(outcome, TagOutcome::Created);
    let tagged = repo
        .find_reference("refs/tags/golang/v0.16.0")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(tagged.id(), repo.head().unwrap().peel_to_commit().unwrap().id());
}

#[test]
fn test_ensure_tag_twice_is_noop() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());

    assert_eq!(ensure_tag(&repo, "json/v0.21.0").unwrap(), TagOutcome::Created);
    assert_eq!(ensure_tag(&repo, "json/v0.21.0").unwrap(), TagOutcome::Existing);
    assert_eq!(tag_names(&repo), vec!["json/v0.21.0".to_string()]);
}

#[test]
fn test_existing_tag_is_not_moved_on_new_commit() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());
    ensure_tag(&repo, "bash/v0.20.5").unwrap();
    let first = repo.head().unwrap().peel_to_commit().unwrap().id();

    std::fs::write(temp.path().join("later.txt"), "later").unwrap();
    commit_all(&repo, "Later commit");

    assert_eq!(ensure_tag(&repo, "bash/v0.20.5").unwrap(), TagOutcome::Existing);
    let tagged = repo
        .find_reference("refs/tags/bash/v0.20.5")
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    assert_eq!(tagged, first);
}

#[rstest]
#[case("bad name")]
#[case("trailing.lock")]
#[case("double..dot")]
fn test_ensure_tag_rejects_invalid_names(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());

    let err = ensure_tag(&repo, name).unwrap_err();
    assert!(matches!(err, Error::InvalidTagName { .. }), "got {err}");
}

#[test]
fn test_ensure_tag_without_commit_fails() {
    let temp = TempDir::new().unwrap();
    let repo = git2::Repository::init(temp.path()).unwrap();

    let err = ensure_tag(&repo, "golang/v0.16.0").unwrap_err();
    assert!(matches!(err, Error::NoHead { .. }));
}

#[test]
fn test_tag_exists_reports_missing() {
    let temp = TempDir::new().unwrap();
    let repo = repo_with_commit(temp.path());

    assert!(!tag_exists(&repo, "golang/v0.16.0").unwrap());
}

#[test]
fn test_open_repository_discovers_from_subdir() {
    let temp = TempDir::new().unwrap();
    repo_with_commit(temp.path());
    let nested = temp.path().join("golang");
    std::fs::create_dir_all(&nested).unwrap();

    assert!(open_repository(&nested).is_ok());
}
