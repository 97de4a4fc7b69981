// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan command: discover repositories and report their state.
//!
//! ```text
//! discover_repositories(path)
//!     |
//!     v  per candidate
//! Repository::open --> classify
//!     |
//!     v
//! divergence pre-pass (uncommitted/unmerged/unpushed/unfetched)
//!     |  dirty-only filter
//!     v
//! inventory + report block --> stdout
//! ```
//!
//! Per-repository failures are logged and the scan continues; only an
//! environment failure (git binary missing) aborts the run.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cli::scan::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::divergence::UnpushedReport;
use crate::git::inventory::SubmoduleState;
use crate::git::{GitRunner, Repository};
use crate::report::RepoReport;
use crate::scan::discover_repositories;

use super::make_runner;

/// Effective scan options after merging CLI flags over configuration.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub dirty_only: bool,
    pub check_upstream: bool,
    pub verbose: bool,
    pub show_unfetched_with_unpushed: bool,
}

impl ScanOptions {
    #[must_use]
    pub fn from_cli(args: &ScanArgs, config: &Config) -> Self {
        Self {
            dirty_only: args.dirty_only || config.scan.dirty_only,
            check_upstream: args.check_upstream || config.scan.check_upstream,
            verbose: args.verbose || config.scan.verbose,
            show_unfetched_with_unpushed: config.report.show_unfetched_with_unpushed,
        }
    }
}

/// Main handler for the scan command.
///
/// # Errors
///
/// Returns an error if the git binary cannot be located or the scan root
/// cannot be read.
pub fn run_scan_command(args: &ScanArgs, config: &Config) -> Result<()> {
    let runner = make_runner(config)?;
    let opts = ScanOptions::from_cli(args, config);
    let start = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let candidates = discover_repositories(&start, &config.scan.skip_dirs)?;
    info!(count = candidates.len(), "candidate repositories discovered");

    let mut index = 0usize;
    for path in &candidates {
        match analyze_repository(&runner, path, &opts) {
            Ok(Some(report)) => {
                index += 1;
                println!("[repo-{index}]");
                print!("{report}");
                println!();
            }
            Ok(None) => {}
            Err(err) => {
                warn!(path = %path.display(), error = %err, "repository analysis failed");
            }
        }
    }

    Ok(())
}

/// Analyze one candidate repository and build its report block.
///
/// Returns `None` when the repository is clean and only dirty repositories
/// were requested.
///
/// # Errors
///
/// Returns an error when the path turns out not to be a repository after
/// all, or when a backend query or parse fails mid-analysis.
pub fn analyze_repository(
    runner: &GitRunner,
    path: &Path,
    opts: &ScanOptions,
) -> Result<Option<RepoReport>> {
    let mut repo = Repository::open(runner, path)?;

    let branches = repo.branches()?;
    repo.resolve_main_branch(&branches);
    let main_branch = repo.main_branch().map(str::to_owned);

    // Divergence pre-pass, so clean repositories can be filtered before any
    // inventory work happens.
    let uncommitted = if repo.is_worktree() {
        repo.uncommitted()?
    } else {
        Vec::new()
    };
    let unmerged = match &main_branch {
        Some(main) if !repo.is_bare() => repo.unmerged(main)?,
        _ => Vec::new(),
    };
    let unpushed = if repo.is_bare() {
        UnpushedReport::default()
    } else {
        repo.unpushed()?
    };
    let unfetched = if repo.is_worktree() && opts.check_upstream {
        repo.unfetched()?
    } else {
        Vec::new()
    };

    if opts.dirty_only
        && uncommitted.is_empty()
        && unmerged.is_empty()
        && unpushed.is_empty()
        && unfetched.is_empty()
    {
        return Ok(None);
    }

    if repo.is_bare() {
        info!(path = %repo.root(), "found bare repository");
    } else {
        info!(path = %repo.root(), "found repository");
    }

    let mut report = RepoReport::new();

    if opts.verbose {
        report.field("signature", repo.signature()?);
    }
    report.field("repo", repo.root());
    if repo.is_bare() {
        report.field("bare", "true");
    }

    let commits = repo.commit_count()?;
    report.field("commits", commits);
    if commits > 0
        && let Some(date) = repo.last_commit_date()?
    {
        report.field("last_commit", date);
    }

    if opts.verbose {
        let stats = repo.object_stats()?;
        if stats.loose_count() > 0 {
            report.field(
                "loose",
                format!("{} ({} KB)", stats.loose_count(), stats.loose_size_kb()),
            );
        }
        if stats.garbage_count() > 0 {
            report.field(
                "garbage",
                format!("{} ({} KB)", stats.garbage_count(), stats.garbage_size_kb()),
            );
        }
        if stats.pack_count() > 0 {
            report.field(
                "packs",
                format!(
                    "{}/{} ({} KB)",
                    stats.pack_count(),
                    stats.packed_objects(),
                    stats.pack_size_kb()
                ),
            );
        }
    }

    report.quoted_list("branches", &branches);

    let tags = repo.tags()?;
    if !tags.is_empty() {
        report.quoted_list("tags", &tags);
    }

    let remotes = repo.remotes()?;
    if !remotes.is_empty() {
        report.quoted_list("remotes", &display_all(&remotes));
    }

    if repo.is_worktree() {
        let worktrees = repo.worktrees()?;
        if !worktrees.is_empty() {
            report.quoted_list("worktrees", &display_all(&worktrees));
        }

        match repo.submodules() {
            SubmoduleState::Listed(lines) if !lines.is_empty() => {
                report.quoted_list("submodules", &lines);
            }
            SubmoduleState::Listed(_) => {}
            SubmoduleState::Unavailable { reason } => {
                info!(path = %repo.root(), reason = %reason, "submodule status unavailable");
            }
        }
    }

    if opts.verbose {
        let roots = repo.roots()?;
        report.quoted_list("roots", &display_all(&roots));
    }

    let hooks = repo.hooks()?;
    if !hooks.is_empty() {
        report.quoted_list("hooks", &display_all(&hooks));
    }

    // When unpushed commits exist too, the two views have truly diverged
    // and settling who is ahead would need a merge analysis this tool does
    // not attempt, so the unfetched detail is suppressed by default.
    if !unfetched.is_empty() && (unpushed.is_empty() || opts.show_unfetched_with_unpushed) {
        report.quoted_list("unfetched", &display_all(&unfetched));
    }

    if repo.is_worktree() && !uncommitted.is_empty() {
        report.quoted_list("uncommitted", &uncommitted);
    }

    if !unmerged.is_empty() {
        report.field("unmerged", format!("{} commits", unmerged.len()));
    }

    if !unpushed.is_empty() {
        report.field(
            "unpushed",
            format!(
                "{} branches with {} commits",
                unpushed.branches.len(),
                unpushed.commits.len()
            ),
        );
    }

    let stashes = repo.stashes()?;
    if !stashes.is_empty() {
        report.quoted_list("stashes", &stashes);
    }

    Ok(Some(report))
}

fn display_all<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
