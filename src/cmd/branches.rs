// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branches command: one summary per repository directly under a path.
//!
//! ```text
//! repos/a has 'main' branch only
//! repos/b has no branches
//! repos/c
//!   branches: main, wip
//!   tags: v1.0
//!   remotes: origin=git@example.com:c.git
//! ERROR: repos/d is not a Git repository
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::scan::BranchesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::GitRunner;
use crate::git::parse::strip_list_marker;

use super::make_runner;

/// Main handler for the branches command.
///
/// # Errors
///
/// Returns an error if the git binary cannot be located or the directory
/// cannot be read.
pub fn run_branches_command(args: &BranchesArgs, config: &Config) -> Result<()> {
    let runner = make_runner(config)?;
    let start = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(&start)
        .with_context(|| format!("failed to read {}", start.display()))?
    {
        let entry = entry.with_context(|| format!("failed to read entry in {}", start.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.starts_with('.')
        {
            continue;
        }
        subdirs.push(path);
    }
    subdirs.sort();

    for path in subdirs {
        for line in summarize_repository(&runner, &path) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Build the summary lines for one directory.
///
/// A failed branch listing means the directory is not a repository; that is
/// reported as a line, not an error, so the summary continues with the next
/// directory.
#[must_use]
pub fn summarize_repository(runner: &GitRunner, path: &Path) -> Vec<String> {
    let shown = path.display();

    let Ok(branch_lines) = runner.query(path, &["branch", "--list"]) else {
        return vec![format!("ERROR: {shown} is not a Git repository")];
    };
    let branches: Vec<String> = branch_lines
        .iter()
        .filter_map(|line| strip_list_marker(line).ok())
        .map(str::to_owned)
        .collect();

    let Ok(tags) = runner.query(path, &["tag", "--list"]) else {
        return vec![format!("ERROR: {shown} is not a Git repository")];
    };

    let Some(remotes) = remote_urls(runner, path) else {
        return vec![format!("ERROR: {shown} is not a Git repository")];
    };

    if branches.is_empty() && remotes.is_empty() {
        if tags.is_empty() {
            return vec![format!("{shown} has no branches")];
        }
        return vec![format!(
            "WARNING: {shown} has no branches but it has tags?? {}",
            tags.join(", ")
        )];
    }

    if branches.len() == 1
        && tags.is_empty()
        && remotes.is_empty()
        && (branches[0] == "master" || branches[0] == "main")
    {
        return vec![format!("{shown} has '{}' branch", branches[0])];
    }

    let mut lines = vec![shown.to_string()];
    lines.push(format!("  branches: {}", branches.join(", ")));
    if tags.len() < 10 {
        if !tags.is_empty() {
            lines.push(format!("  tags: {}", tags.join(", ")));
        }
    } else {
        lines.push(format!(
            "  {} tags: {}, ...",
            tags.len(),
            tags[..10].join(", ")
        ));
    }
    if !remotes.is_empty() {
        lines.push(format!("  remotes: {}", remotes.join(", ")));
    }
    lines
}

/// `name=url` for every configured remote, or `None` when any query fails.
fn remote_urls(runner: &GitRunner, path: &Path) -> Option<Vec<String>> {
    let names = runner.query(path, &["remote"]).ok()?;
    let mut remotes = Vec::with_capacity(names.len());
    for name in names {
        let lines = runner.query(path, &["remote", "get-url", &name]).ok()?;
        let url = lines.into_iter().next()?;
        remotes.push(format!("{name}={url}"));
    }
    Some(remotes)
}
