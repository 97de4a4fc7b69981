// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for reposcan using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! reposcan [global options] <command>
//! scan [PATH] [--dirty-only] [--check-upstream] [--verbose]
//! branches [PATH]
//! options
//! ```

pub mod global;
pub mod scan;


use crate::cli::global::GlobalOptions;
use crate::cli::scan::{BranchesArgs, ScanArgs};
use clap::{Parser, Subcommand};

/// Git Repository State Scanner
///
/// Finds Git repositories on disk and reports their structural and
/// synchronization state.
#[derive(Debug, Parser)]
#[command(
    name = "reposcan",
    author,
    version,
    about = "Git Repository State Scanner",
    long_about = "reposcan Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Walks a directory tree, finds Git repositories (working trees\n\
                  and bare), and reports branches, tags, remotes, worktrees,\n\
                  hooks, and divergence state: uncommitted, unmerged, unpushed\n\
                  and (on request) unfetched commits.",
    after_help = "CONFIG FILES:\n\n\
                  By default, reposcan loads `reposcan.toml` from the current\n\
                  directory if present. Additional TOML files can be given with\n\
                  --config; later files override earlier ones, and REPOSCAN_*\n\
                  environment variables override files. Command-line flags win\n\
                  over everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Finds repositories under a path and reports their state.
    Scan(ScanArgs),

    /// Summarizes branches/tags/remotes of each repository directly under a path.
    Branches(BranchesArgs),

    /// Lists all options and their effective values.
    Options,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
