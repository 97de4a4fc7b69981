// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Candidate repository discovery.
//!
//! ```text
//! root/
//!   project/.git/          (candidate, not descended into)
//!   mirrors/thing.git/     (candidate: bare markers)
//!     hooks/ info/ objects/ refs/ HEAD config
//!   node_modules/          (pruned via skip_dirs)
//!   misc/
//!     nested/repo/.git/    (candidate)
//! ```
//!
//! A directory is a candidate when it contains a `.git` directory, or the
//! full bare-repository marker set. Candidates are not descended into;
//! classification of what a candidate actually is happens later, against
//! the backend. Returns sorted paths for deterministic report ordering.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::warn;

use crate::error::Result;

/// Bare repository markers: these directories plus `HEAD` and `config`.
const BARE_MARKER_DIRS: &[&str] = &["hooks", "info", "objects", "refs"];
const BARE_MARKER_FILES: &[&str] = &["HEAD", "config"];

/// Walk `root` and collect candidate repository paths.
///
/// Unreadable directories below the root are logged and skipped; only an
/// unreadable root is an error.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn discover_repositories(root: &Path, skip_dirs: &[String]) -> Result<Vec<PathBuf>> {
    std::fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?;

    let mut found = Vec::new();
    visit(root, skip_dirs, &mut found);
    found.sort();
    Ok(found)
}

fn visit(dir: &Path, skip_dirs: &[String], found: &mut Vec<PathBuf>) {
    let entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "skipping unreadable directory");
            return;
        }
    };

    if is_candidate(&entries) {
        found.push(dir.to_path_buf());
        return;
    }

    for entry in entries {
        if !entry.is_dir || entry.is_symlink {
            continue;
        }
        if skip_dirs.iter().any(|skip| *skip == entry.name) {
            continue;
        }
        visit(&dir.join(&entry.name), skip_dirs, found);
    }
}

struct DirEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

fn read_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn is_candidate(entries: &[DirEntry]) -> bool {
    let has_gitdir = entries.iter().any(|e| e.is_dir && e.name == ".git");
    if has_gitdir {
        return true;
    }

    let dirs_present = BARE_MARKER_DIRS
        .iter()
        .all(|marker| entries.iter().any(|e| e.is_dir && e.name == *marker));
    let files_present = BARE_MARKER_FILES
        .iter()
        .all(|marker| entries.iter().any(|e| !e.is_dir && e.name == *marker));
    dirs_present && files_present
}
