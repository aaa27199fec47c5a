//! Tests for tagged clones and remote tag listing against local upstreams

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vendor_git::{Error, clone_at_tag, list_remote_tags};
use vendor_test_utils::UpstreamMirror;

#[test]
fn test_list_remote_tags_returns_all_tags() {
    let mirror = UpstreamMirror::new();
    let path = mirror.add_git_repo(
        "tree-sitter/tree-sitter-go",
        &[("src/parser.c", "int x;\n")],
        &["v0.19.0", "v0.20.0", "nightly"],
    );

    let tags = list_remote_tags(path.to_str().unwrap()).unwrap();

    assert_eq!(tags, vec!["nightly", "v0.19.0", "v0.20.0"]);
}

#[test]
fn test_list_remote_tags_missing_repository() {
    let mirror = UpstreamMirror::new();
    let missing = mirror.git_base().join("nobody/nothing");

    let err = list_remote_tags(missing.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::RemoteQuery { .. }));
}

#[test]
fn test_clone_at_tag_checks_out_files() {
    let mirror = UpstreamMirror::new();
    let path = mirror.add_git_repo(
        "tree-sitter/tree-sitter",
        &[("lib/src/alloc.c", "void *x;\n")],
        &["v0.22.6"],
    );
    let scratch = TempDir::new().unwrap();
    let dest = scratch.path().join("engine");

    clone_at_tag(path.to_str().unwrap(), &dest, "v0.22.6").unwrap();

    assert_eq!(
        std::fs::read_to_string(dest.join("lib/src/alloc.c")).unwrap(),
        "void *x;\n"
    );
}

#[test]
fn test_clone_at_tag_replaces_previous_scratch() {
    let mirror = UpstreamMirror::new();
    let path = mirror.add_git_repo("tree-sitter/tree-sitter", &[], &["v0.22.6"]);
    let scratch = TempDir::new().unwrap();
    let dest = scratch.path().join("engine");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("leftover.c"), "stale").unwrap();

    clone_at_tag(path.to_str().unwrap(), &dest, "v0.22.6").unwrap();

    assert!(!dest.join("leftover.c").exists());
    assert!(dest.join("README.md").exists());
}

#[test]
fn test_clone_at_unknown_tag_fails() {
    let mirror = UpstreamMirror::new();
    let path = mirror.add_git_repo("tree-sitter/tree-sitter", &[], &["v0.22.6"]);
    let scratch = TempDir::new().unwrap();

    let err = clone_at_tag(path.to_str().unwrap(), &scratch.path().join("engine"), "v9.9.9")
        .unwrap_err();

    assert!(matches!(err, Error::TagNotFound { ref tag, .. } if tag == "v9.9.9"));
}
