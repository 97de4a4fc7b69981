// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inventory reporting: simple enumerations of repository state.
//!
//! ```text
//! branches / tags          marker-list queries
//! commit_count             rev-list --all --count
//! last_commit_date         log --all -1 --date-order
//! object_stats             count-objects -v
//! remotes                  remote + remote get-url (one query per remote)
//! worktrees                worktree list, minus the handle's own entry
//! submodules               submodule status (failure is informational)
//! roots                    rev-list --max-parents=0 + --contains queries
//! hooks                    filesystem enumeration of the hooks directory
//! stashes                  stash list
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FsError, ScanResult};

use super::parse::{parse_count, parse_stats_lines, parse_worktree_line, strip_list_marker};
use super::repo::Repository;

/// Hook names installed by git itself.
/// <https://git-scm.com/docs/githooks>
const STANDARD_HOOKS: &[&str] = &[
    "applypatch-msg",
    "pre-applypatch",
    "post-applypatch",
    "post-checkout",
    "pre-commit",
    "prepare-commit-msg",
    "commit-msg",
    "post-commit",
    "fsmonitor-watchman",
    "pre-auto-gc",
    "post-index-change",
    "pre-merge-commit",
    "post-merge",
    "p4-changelist",
    "p4-prepare-changelist",
    "p4-post-changelist",
    "p4-pre-submit",
    "pre-push",
    "pre-receive",
    "update",
    "proc-receive",
    "post-receive",
    "post-update",
    "push-to-checkout",
    "pre-rebase",
    "reference-transaction",
    "post-rewrite",
    "sendemail-validate",
];

/// Loose/packed object statistics (`git count-objects -v`).
///
/// Sizes are in KiB, as reported by the backend.
#[derive(Debug, Clone, Default)]
pub struct ObjectStats {
    stats: BTreeMap<String, u64>,
}

impl ObjectStats {
    fn get(&self, label: &str) -> u64 {
        self.stats.get(label).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn loose_count(&self) -> u64 {
        self.get("count")
    }

    #[must_use]
    pub fn loose_size_kb(&self) -> u64 {
        self.get("size")
    }

    #[must_use]
    pub fn garbage_count(&self) -> u64 {
        self.get("garbage")
    }

    #[must_use]
    pub fn garbage_size_kb(&self) -> u64 {
        self.get("size-garbage")
    }

    #[must_use]
    pub fn pack_count(&self) -> u64 {
        self.get("packs")
    }

    #[must_use]
    pub fn packed_objects(&self) -> u64 {
        self.get("in-pack")
    }

    #[must_use]
    pub fn pack_size_kb(&self) -> u64 {
        self.get("size-pack")
    }
}

/// One configured remote with its fetch URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub url: String,
}

impl fmt::Display for RemoteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.url)
    }
}

/// One linked worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeInfo {
    pub branch: String,
    pub hash: String,
    pub path: String,
    pub prunable: bool,
}

impl fmt::Display for WorktreeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.branch, self.hash, self.path)
    }
}

/// One entry found in the hooks directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEntry {
    /// A standard hook, installed and active.
    Active { name: String },
    /// A `.sample` file whose base name is not a standard hook.
    NonstandardSample { name: String },
    /// An active hook whose name is not a standard hook.
    Nonstandard { name: String },
    /// A subdirectory inside the hooks directory; an anomaly worth reporting.
    Directory { name: String },
}

impl fmt::Display for HookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active { name } => write!(f, "Hook {name}"),
            Self::NonstandardSample { name } => write!(f, "Nonstandard {name}.sample"),
            Self::Nonstandard { name } => write!(f, "Nonstandard hook {name}"),
            Self::Directory { name } => write!(f, "Hook dir {name}"),
        }
    }
}

/// Submodule status, or the reason it could not be read.
///
/// A failed `submodule status` query may legitimately mean "submodules
/// declared but not initialized"; it is informational, never a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmoduleState {
    Listed(Vec<String>),
    Unavailable { reason: String },
}

/// A parentless commit and the named refs that contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootCommit {
    pub hash: String,
    /// Empty when no local branch, remote branch, or tag reaches the root.
    pub owners: Vec<String>,
}

impl fmt::Display for RootCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hash, self.owners.join(" "))
    }
}

impl Repository<'_> {
    /// Local branch names, in listing order.
    ///
    /// # Errors
    ///
    /// Returns the query or parse failure.
    pub fn branches(&self) -> ScanResult<Vec<String>> {
        let lines = self.query(&["branch", "--list"])?;
        lines
            .iter()
            .map(|line| strip_list_marker(line).map(str::to_owned))
            .collect()
    }

    /// Tag names, in listing order.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn tags(&self) -> ScanResult<Vec<String>> {
        self.query(&["tag", "--list"])
    }

    /// Number of commits reachable from any ref.
    ///
    /// # Errors
    ///
    /// Returns the query or parse failure.
    pub fn commit_count(&self) -> ScanResult<u64> {
        let lines = self.query(&["rev-list", "--all", "--count"])?;
        parse_count(&lines)
    }

    /// Most recent commit date across all refs (ISO calendar date), `None`
    /// when the repository has no commits.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn last_commit_date(&self) -> ScanResult<Option<String>> {
        let lines = self.query(&["log", "--all", "-1", "--date-order", "--format=format:%cs"])?;
        Ok(lines.into_iter().next().filter(|line| !line.is_empty()))
    }

    /// Loose/packed object statistics.
    ///
    /// # Errors
    ///
    /// Returns the query or parse failure.
    pub fn object_stats(&self) -> ScanResult<ObjectStats> {
        let lines = self.query(&["count-objects", "-v"])?;
        Ok(ObjectStats {
            stats: parse_stats_lines(&lines)?,
        })
    }

    /// Configured remotes with their URLs. One `remote get-url` round trip
    /// per remote; there is no batch query at the backend level.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn remotes(&mut self) -> ScanResult<Vec<RemoteInfo>> {
        let names = self.remote_names()?;
        let mut remotes = Vec::with_capacity(names.len());
        for name in names {
            let lines = self.query(&["remote", "get-url", &name])?;
            if let Some(url) = lines.into_iter().next() {
                remotes.push(RemoteInfo { name, url });
            }
        }
        Ok(remotes)
    }

    /// Linked worktrees, excluding the entry for this handle's own root.
    ///
    /// # Errors
    ///
    /// Returns the query failure, or a parse failure if a listing line does
    /// not match the `path hash [branch]` shape.
    pub fn worktrees(&self) -> ScanResult<Vec<WorktreeInfo>> {
        let lines = self.query(&["worktree", "list"])?;
        let own_root = self.root().to_lowercase();

        let mut worktrees = Vec::new();
        for line in lines {
            let parsed = parse_worktree_line(&line)?;
            if parsed.path.to_lowercase() == own_root {
                continue;
            }
            worktrees.push(WorktreeInfo {
                branch: parsed.branch,
                hash: parsed.hash,
                path: parsed.path,
                prunable: parsed.prunable,
            });
        }
        Ok(worktrees)
    }

    /// Submodule status lines, or the reason they are unavailable.
    #[must_use]
    pub fn submodules(&self) -> SubmoduleState {
        match self.query(&["submodule", "status"]) {
            Ok(lines) => SubmoduleState::Listed(lines),
            Err(err) => SubmoduleState::Unavailable {
                reason: err.to_string(),
            },
        }
    }

    /// Stash entries, in listing order.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn stashes(&self) -> ScanResult<Vec<String>> {
        self.query(&["stash", "list"])
    }

    /// Parentless commits and the refs that contain them: local branches
    /// first, then remote branches, then tags; the first non-empty set wins.
    ///
    /// # Errors
    ///
    /// Returns the query or parse failure.
    pub fn roots(&self) -> ScanResult<Vec<RootCommit>> {
        let hashes = self.query(&["rev-list", "--all", "--max-parents=0"])?;
        let mut roots = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let owners = self.root_owners(&hash)?;
            roots.push(RootCommit { hash, owners });
        }
        Ok(roots)
    }

    fn root_owners(&self, hash: &str) -> ScanResult<Vec<String>> {
        let local = self.query(&["branch", "--contains", hash])?;
        if !local.is_empty() {
            return strip_all_markers(&local);
        }

        let remote = self.query(&["branch", "-r", "--contains", hash])?;
        if !remote.is_empty() {
            return strip_all_markers(&remote);
        }

        // tag --contains prints bare names, no marker column
        self.query(&["tag", "--contains", hash])
    }

    /// Enumerate the hooks directory (`.git/hooks`, or `hooks` for a bare
    /// repository). Standard `.sample` files are skipped; everything else is
    /// classified, including subdirectories, which should not be there.
    ///
    /// # Errors
    ///
    /// Returns an [`FsError`] if the directory cannot be read (a repository
    /// without a hooks directory yields an empty list).
    pub fn hooks(&self) -> ScanResult<Vec<HookEntry>> {
        let hooks_dir = if self.is_bare() {
            self.root_dir().join("hooks")
        } else {
            self.root_dir().join(".git").join("hooks")
        };
        if !hooks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = std::fs::read_dir(&hooks_dir).map_err(|source| FsError::IoError {
            path: hooks_dir.display().to_string(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| FsError::IoError {
                path: hooks_dir.display().to_string(),
                source,
            })?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            names.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }
        names.sort();

        let mut hooks = Vec::new();
        for (name, is_dir) in names {
            if is_dir {
                hooks.push(HookEntry::Directory { name });
                continue;
            }
            let lower = name.to_lowercase();
            if let Some(base) = lower.strip_suffix(".sample") {
                if !STANDARD_HOOKS.contains(&base) {
                    let name = name[..name.len() - ".sample".len()].to_string();
                    hooks.push(HookEntry::NonstandardSample { name });
                }
            } else if STANDARD_HOOKS.contains(&lower.as_str()) {
                hooks.push(HookEntry::Active { name });
            } else {
                hooks.push(HookEntry::Nonstandard { name });
            }
        }
        Ok(hooks)
    }
}

fn strip_all_markers(lines: &[String]) -> ScanResult<Vec<String>> {
    lines
        .iter()
        .map(|line| strip_list_marker(line).map(str::to_owned))
        .collect()
}
