// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::ScanError;
use crate::git::inventory::HookEntry;
use crate::git::parse::{
    parse_count, parse_ref_line, parse_stats_lines, parse_worktree_line, strip_list_marker,
};
use crate::git::{GitRunner, Repository};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn runner() -> GitRunner {
    GitRunner::from_environment().expect("git binary should be on PATH")
}

/// Helper to run git commands in a directory, panicking on failure.
fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an initialized git repo with `main` as the default branch.
fn init_test_repo(dir: &Path) {
    git(&["init", "-q", "-b", "main"], dir);
    git(&["config", "user.email", "test@test.com"], dir);
    git(&["config", "user.name", "Test"], dir);
}

fn commit(dir: &Path, message: &str) {
    git(&["commit", "-q", "--allow-empty", "-m", message], dir);
}

/// Canonicalized path, so comparisons against git's own output are stable
/// even when the temp directory sits behind a symlink.
fn canonical(dir: &Path) -> PathBuf {
    dir.canonicalize().expect("failed to canonicalize")
}

fn open<'r>(runner: &'r GitRunner, dir: &Path) -> Repository<'r> {
    Repository::open(runner, &canonical(dir)).expect("repository should open")
}

// --- Parser grammars (pinned to literal sample outputs) ---

#[test]
fn test_strip_list_marker() {
    assert_eq!(strip_list_marker("* main").unwrap(), "main");
    assert_eq!(strip_list_marker("+ linked").unwrap(), "linked");
    assert_eq!(strip_list_marker("  dev").unwrap(), "dev");
    assert!(strip_list_marker("x").is_err());
}

#[test]
fn test_parse_worktree_line() {
    let parsed = parse_worktree_line("C:/projects/github/a  f9a41f8 [main]").unwrap();
    assert_eq!(parsed.path, "C:/projects/github/a");
    assert_eq!(parsed.hash, "f9a41f8");
    assert_eq!(parsed.branch, "main");
    assert!(!parsed.prunable);

    let parsed = parse_worktree_line("/home/u/wt deadbeef0 [fix/thing] prunable").unwrap();
    assert_eq!(parsed.path, "/home/u/wt");
    assert_eq!(parsed.branch, "fix/thing");
    assert!(parsed.prunable);
}

#[test]
fn test_parse_worktree_line_mismatch_is_fatal() {
    let err = parse_worktree_line("/home/u/bare (bare)").unwrap_err();
    assert!(matches!(err, ScanError::Parse(_)), "got: {err}");
}

#[test]
fn test_parse_ref_line() {
    let parsed =
        parse_ref_line("251dbc8356fdd71dcbb1fbfa29b796aa7d5e0ca8\trefs/heads/main").unwrap();
    assert_eq!(parsed.hash, "251dbc8356fdd71dcbb1fbfa29b796aa7d5e0ca8");
    assert_eq!(parsed.name, "refs/heads/main");

    // show-ref separates with a single space
    let parsed = parse_ref_line("251dbc8356fdd71dcbb1fbfa29b796aa7d5e0ca8 HEAD").unwrap();
    assert_eq!(parsed.name, "HEAD");

    assert!(parse_ref_line("not a ref line").is_err());
}

#[test]
fn test_parse_stats_lines() {
    let lines: Vec<String> = [
        "count: 4356",
        "size: 90642",
        "in-pack: 309",
        "packs: 1",
        "size-pack: 132508",
        "prune-packable: 0",
        "garbage: 0",
        "size-garbage: 0",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let stats = parse_stats_lines(&lines).unwrap();
    assert_eq!(stats.get("count"), Some(&4356));
    assert_eq!(stats.get("size-pack"), Some(&132_508));

    let bad = vec!["count 4356".to_string()];
    assert!(parse_stats_lines(&bad).is_err());

    let bad = vec!["count: lots".to_string()];
    assert!(parse_stats_lines(&bad).is_err());
}

#[test]
fn test_parse_count() {
    assert_eq!(parse_count(&["17".to_string()]).unwrap(), 17);
    assert!(parse_count(&[]).is_err());
    assert!(parse_count(&["many".to_string()]).is_err());
}

// --- Classification ---

#[test]
fn test_open_classifies_worktree() {
    let temp = temp_dir();
    init_test_repo(temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert!(repo.is_worktree());
    assert!(!repo.is_bare());
}

#[test]
fn test_open_classifies_bare() {
    let temp = temp_dir();
    git(&["init", "-q", "--bare", "-b", "main"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert!(repo.is_bare());
    assert!(!repo.is_worktree());
}

#[test]
fn test_open_rejects_plain_directory() {
    let temp = temp_dir();

    let runner = runner();
    let result = Repository::open(&runner, temp.path());
    assert!(result.is_err(), "plain directory should not open");
}

#[test]
fn test_worktree_and_bare_are_exclusive() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let bare = temp_dir();
    git(&["init", "-q", "--bare", "-b", "main"], bare.path());

    let runner = runner();
    for dir in [temp.path(), bare.path()] {
        let repo = open(&runner, dir);
        assert!(
            !(repo.is_worktree() && repo.is_bare()),
            "classification flags must be exclusive"
        );
    }
}

// --- Main branch resolution ---

#[test]
fn test_main_branch_prefers_main() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let runner = runner();
    let mut repo = open(&runner, temp.path());

    let branches: Vec<String> = ["main", "master", "dev"]
        .iter()
        .map(ToString::to_string)
        .collect();
    repo.resolve_main_branch(&branches);
    assert_eq!(repo.main_branch(), Some("main"));
}

#[test]
fn test_main_branch_falls_back_to_master() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let runner = runner();
    let mut repo = open(&runner, temp.path());

    let branches: Vec<String> = ["master", "dev"].iter().map(ToString::to_string).collect();
    repo.resolve_main_branch(&branches);
    assert_eq!(repo.main_branch(), Some("master"));
}

#[test]
fn test_main_branch_falls_back_to_first() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let runner = runner();
    let mut repo = open(&runner, temp.path());

    let branches: Vec<String> = ["dev", "feat"].iter().map(ToString::to_string).collect();
    repo.resolve_main_branch(&branches);
    assert_eq!(repo.main_branch(), Some("dev"));
}

#[test]
fn test_main_branch_absent_without_branches() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let runner = runner();
    let mut repo = open(&runner, temp.path());

    repo.resolve_main_branch(&[]);
    assert_eq!(repo.main_branch(), None);
}

// --- Inventory ---

#[test]
fn test_branches_lists_without_markers() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");
    git(&["branch", "dev"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    let branches = repo.branches().unwrap();
    assert_eq!(branches, ["dev", "main"]);
}

#[test]
fn test_commit_count_and_last_commit_date() {
    let temp = temp_dir();
    init_test_repo(temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert_eq!(repo.commit_count().unwrap(), 0);
    assert_eq!(repo.last_commit_date().unwrap(), None);

    commit(temp.path(), "initial");
    assert_eq!(repo.commit_count().unwrap(), 1);
    let date = repo.last_commit_date().unwrap().expect("date expected");
    assert_eq!(date.len(), 10, "expected ISO calendar date, got {date}");
    assert_eq!(&date[4..5], "-");
}

#[test]
fn test_tags_listing() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");
    git(&["tag", "v1.0"], temp.path());
    git(&["tag", "v1.1"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert_eq!(repo.tags().unwrap(), ["v1.0", "v1.1"]);
}

#[test]
fn test_remotes_resolve_urls_individually() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    git(
        &["remote", "add", "origin", "git@example.com:user/repo.git"],
        temp.path(),
    );
    git(
        &["remote", "add", "upstream", "https://example.com/up/repo.git"],
        temp.path(),
    );

    let runner = runner();
    let mut repo = open(&runner, temp.path());
    let remotes = repo.remotes().unwrap();
    let rendered: Vec<String> = remotes.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "origin:git@example.com:user/repo.git",
            "upstream:https://example.com/up/repo.git"
        ]
    );
}

#[test]
fn test_object_stats_after_commit() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join("file.txt"), "content").unwrap();
    git(&["add", "file.txt"], temp.path());
    commit(temp.path(), "add file");

    let runner = runner();
    let repo = open(&runner, temp.path());
    let stats = repo.object_stats().unwrap();
    assert!(stats.loose_count() > 0, "fresh commits leave loose objects");
    assert_eq!(stats.garbage_count(), 0);
}

#[test]
fn test_worktrees_exclude_own_root() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");

    let linked = temp_dir();
    let linked_path = linked.path().join("wt");
    git(
        &[
            "worktree",
            "add",
            "-q",
            "-b",
            "feat",
            linked_path.to_str().unwrap(),
        ],
        temp.path(),
    );

    let runner = runner();
    let repo = open(&runner, temp.path());
    let worktrees = repo.worktrees().unwrap();
    assert_eq!(worktrees.len(), 1, "own root must be excluded");
    assert_eq!(worktrees[0].branch, "feat");
    assert!(!worktrees[0].prunable);
}

#[test]
fn test_hooks_classification() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    let hooks_dir = temp.path().join(".git").join("hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("pre-commit"), "#!/bin/sh\n").unwrap();
    fs::write(hooks_dir.join("deploy-thing"), "#!/bin/sh\n").unwrap();
    fs::write(hooks_dir.join("custom.sample"), "#!/bin/sh\n").unwrap();
    fs::create_dir_all(hooks_dir.join("helpers")).unwrap();

    let runner = runner();
    let repo = open(&runner, temp.path());
    let hooks = repo.hooks().unwrap();

    assert!(hooks.contains(&HookEntry::Active {
        name: "pre-commit".to_string()
    }));
    assert!(hooks.contains(&HookEntry::Nonstandard {
        name: "deploy-thing".to_string()
    }));
    assert!(hooks.contains(&HookEntry::NonstandardSample {
        name: "custom".to_string()
    }));
    assert!(hooks.contains(&HookEntry::Directory {
        name: "helpers".to_string()
    }));
    // standard samples installed by git init are skipped silently
    assert!(
        !hooks
            .iter()
            .any(|h| matches!(h, HookEntry::NonstandardSample { name } if name == "pre-commit")),
        "standard samples must not be reported"
    );
}

#[test]
fn test_roots_owned_by_branch() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");
    commit(temp.path(), "second");

    let runner = runner();
    let repo = open(&runner, temp.path());
    let roots = repo.roots().unwrap();
    assert_eq!(roots.len(), 1, "linear history has one root");
    assert_eq!(roots[0].owners, ["main"]);
    assert_eq!(roots[0].hash.len(), 40);
}

#[test]
fn test_root_without_owning_ref_has_empty_owner_list() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join("file.txt"), "one").unwrap();
    git(&["add", "file.txt"], temp.path());
    commit(temp.path(), "initial");

    // leave the commit reachable only through the stash ref
    fs::write(temp.path().join("file.txt"), "two").unwrap();
    git(&["stash", "push", "-q"], temp.path());
    git(&["checkout", "-q", "--detach"], temp.path());
    git(&["branch", "-D", "main"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    let roots = repo.roots().unwrap();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].owners.is_empty(), "got: {:?}", roots[0].owners);
    assert_eq!(roots[0].to_string(), format!("{}:", roots[0].hash));
}

// --- Signature ---

#[test]
fn test_signature_stable_without_changes() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");

    let runner = runner();
    let repo = open(&runner, temp.path());
    let first = repo.signature().unwrap();
    let second = repo.signature().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 64, "expected sha256 hex digest");
}

#[test]
fn test_signature_changes_on_branch_creation() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");

    let runner = runner();
    let repo = open(&runner, temp.path());
    let before = repo.signature().unwrap();
    git(&["branch", "dev"], temp.path());
    let after = repo.signature().unwrap();
    assert_ne!(before, after);

    git(&["branch", "-D", "dev"], temp.path());
    let restored = repo.signature().unwrap();
    assert_eq!(before, restored, "same ref state, same signature");
}

#[test]
fn test_signature_changes_on_stash() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join("file.txt"), "one").unwrap();
    git(&["add", "file.txt"], temp.path());
    commit(temp.path(), "initial");

    let runner = runner();
    let repo = open(&runner, temp.path());
    let before = repo.signature().unwrap();

    fs::write(temp.path().join("file.txt"), "two").unwrap();
    git(&["stash", "push", "-q"], temp.path());
    let after = repo.signature().unwrap();
    assert_ne!(before, after);
    assert_eq!(repo.stashes().unwrap().len(), 1);
}

// --- Divergence ---

#[test]
fn test_uncommitted_lists_status_lines() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert!(repo.uncommitted().unwrap().is_empty());

    fs::write(temp.path().join("new.txt"), "x").unwrap();
    let uncommitted = repo.uncommitted().unwrap();
    assert_eq!(uncommitted, ["?? new.txt"]);
}

#[test]
fn test_unmerged_counts_commits_off_main() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");
    git(&["checkout", "-q", "-b", "feat"], temp.path());
    commit(temp.path(), "feature work");
    git(&["checkout", "-q", "main"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    let unmerged = repo.unmerged("main").unwrap();
    assert_eq!(unmerged.len(), 1);
    assert_eq!(unmerged[0].len(), 40);

    assert!(repo.unmerged("feat").unwrap().is_empty());
}

#[test]
fn test_unpushed_against_local_remote() {
    let upstream = temp_dir();
    git(&["init", "-q", "--bare", "-b", "main"], upstream.path());

    let temp = temp_dir();
    init_test_repo(temp.path());
    commit(temp.path(), "initial");
    git(
        &["remote", "add", "origin", upstream.path().to_str().unwrap()],
        temp.path(),
    );
    git(&["push", "-q", "-u", "origin", "main"], temp.path());

    let runner = runner();
    let repo = open(&runner, temp.path());
    assert!(repo.unpushed().unwrap().is_empty(), "everything is pushed");

    commit(temp.path(), "local only");
    let unpushed = repo.unpushed().unwrap();
    assert_eq!(unpushed.branches.len(), 1);
    assert_eq!(unpushed.commits.len(), 1);
}

#[test]
fn test_unfetched_empty_when_in_sync() {
    let (_upstream, _work, clone) = cloned_pair();

    let runner = runner();
    let mut repo = open(&runner, clone.path());
    assert!(repo.unfetched().unwrap().is_empty());
}

#[test]
fn test_unfetched_reports_moved_upstream_ref() {
    let (upstream, work, clone) = cloned_pair();

    // advance upstream behind the clone's back
    commit(work.path(), "upstream moved");
    git(&["push", "-q", "origin", "main"], work.path());

    let runner = runner();
    let mut repo = open(&runner, clone.path());
    let stale = repo.unfetched().unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].name, "refs/remotes/origin/main");
    assert_ne!(stale[0].local, stale[0].remote);

    // fetching resolves the divergence
    git(&["fetch", "-q"], clone.path());
    assert!(repo.unfetched().unwrap().is_empty());
    drop(upstream);
}

#[test]
fn test_unfetched_ignores_upstream_only_refs() {
    let (_upstream, work, clone) = cloned_pair();

    // a branch the clone has never fetched is unknown, not stale
    git(&["branch", "feat"], work.path());
    git(&["push", "-q", "origin", "feat"], work.path());

    let runner = runner();
    let mut repo = open(&runner, clone.path());
    assert!(repo.unfetched().unwrap().is_empty());
}

/// upstream (bare) <- work (origin member) and a fresh clone of upstream.
fn cloned_pair() -> (TempDir, TempDir, TempDir) {
    let upstream = temp_dir();
    git(&["init", "-q", "--bare", "-b", "main"], upstream.path());

    let work = temp_dir();
    init_test_repo(work.path());
    commit(work.path(), "initial");
    git(
        &["remote", "add", "origin", upstream.path().to_str().unwrap()],
        work.path(),
    );
    git(&["push", "-q", "-u", "origin", "main"], work.path());

    let clone = temp_dir();
    git(
        &[
            "clone",
            "-q",
            upstream.path().to_str().unwrap(),
            clone.path().to_str().unwrap(),
        ],
        work.path(),
    );
    git(&["config", "user.email", "test@test.com"], clone.path());
    git(&["config", "user.name", "Test"], clone.path());

    (upstream, work, clone)
}
