// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan and branches command arguments.
//!
//! ```text
//! scan [PATH] --dirty-only      → only repos with pending work
//!             --check-upstream  → also query each remote (slow)
//!             --verbose         → signature, object stats, roots
//! branches [PATH]               → one-line summary per repo
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Path to scan for Git repositories (default: current directory).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Only show repositories with uncommitted, unmerged, unpushed or
    /// unfetched changes.
    #[arg(long = "dirty-only")]
    pub dirty_only: bool,

    /// Check each configured remote for refs the local repository has not
    /// fetched yet. One network round trip per remote; slow.
    #[arg(long = "check-upstream")]
    pub check_upstream: bool,

    /// Include signature, object statistics and root-commit sections.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Arguments for the `branches` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BranchesArgs {
    /// Directory whose immediate subdirectories are summarized
    /// (default: current directory).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}
