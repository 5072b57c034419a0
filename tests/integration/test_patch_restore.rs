//! Integration Tests: patching a real repository
//!
//! Drives `GitPatchManager` against a git2-built fixture and inspects the
//! working tree through git2 afterwards.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use bisect_helper::error::Error;
use bisect_helper::execution::DirectExecutor;
use bisect_helper::patch::{GitPatchManager, PatchOps};
use git2::{Repository, StatusOptions};
use std::fs;
use test_utils::fixtures::{
    git_available, init_repo, read_firmware, write_patch, BAD_PATCH, GOOD_PATCH, ORIGINAL, PATCHED,
};

/// Tracked files with staged or unstaged changes
fn dirty_files(repo: &Repository) -> Vec<String> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(false);
    repo.statuses(Some(&mut opts))
        .unwrap()
        .iter()
        .filter_map(|entry| entry.path().map(str::to_string))
        .collect()
}

#[test]
fn test_check_leaves_tree_untouched() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = init_repo(dir.path());
    let patch = write_patch(dir.path(), "good.patch", GOOD_PATCH);

    let mut manager = GitPatchManager::new(DirectExecutor::new()).with_repo_dir(dir.path());
    manager.check_all(&[patch]).unwrap();

    assert_eq!(read_firmware(dir.path()), ORIGINAL);
    assert!(dirty_files(&repo).is_empty());
}

#[test]
fn test_apply_then_restore() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = init_repo(dir.path());
    let patch = write_patch(dir.path(), "good.patch", GOOD_PATCH);

    let mut manager = GitPatchManager::new(DirectExecutor::new()).with_repo_dir(dir.path());
    manager.apply_all(&[patch]).unwrap();
    assert_eq!(read_firmware(dir.path()), PATCHED);
    assert_eq!(dirty_files(&repo), vec!["firmware.txt".to_string()]);

    manager.restore();
    assert_eq!(read_firmware(dir.path()), ORIGINAL);
    assert!(dirty_files(&repo).is_empty());
}

#[test]
fn test_restore_reverts_staged_changes() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = init_repo(dir.path());
    fs::write(dir.path().join("firmware.txt"), PATCHED).unwrap();
    {
        let mut index = repo.index().unwrap();
        index.add_path(std::path::Path::new("firmware.txt")).unwrap();
        index.write().unwrap();
    }
    assert!(!dirty_files(&repo).is_empty());

    let mut manager = GitPatchManager::new(DirectExecutor::new()).with_repo_dir(dir.path());
    manager.restore();

    assert_eq!(read_firmware(dir.path()), ORIGINAL);
    assert!(dirty_files(&repo).is_empty());
}

#[test]
fn test_failed_check_reports_patch() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = init_repo(dir.path());
    let good = write_patch(dir.path(), "good.patch", GOOD_PATCH);
    let bad = write_patch(dir.path(), "bad.patch", BAD_PATCH);

    let mut manager = GitPatchManager::new(DirectExecutor::new()).with_repo_dir(dir.path());
    match manager.check_all(&[good, bad.clone()]) {
        Err(Error::PatchFailed { patch, .. }) => assert_eq!(patch, bad),
        other => panic!("expected patch failure, got {:?}", other),
    }

    assert_eq!(read_firmware(dir.path()), ORIGINAL);
    assert!(dirty_files(&repo).is_empty());
}

#[test]
fn test_restore_outside_repository_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = GitPatchManager::new(DirectExecutor::new()).with_repo_dir(dir.path());
    manager.restore();
}
