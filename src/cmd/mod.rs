// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.

pub mod branches;
pub mod config;
pub mod scan;

use crate::config::Config;
use crate::error::Result;
use crate::git::GitRunner;

/// Build the git runner from configuration, resolving the binary from
/// `PATH` unless `[git] binary` pins it. Failure here aborts the run.
///
/// # Errors
///
/// Returns an error if the git binary cannot be located.
pub fn make_runner(config: &Config) -> Result<GitRunner> {
    if let Some(binary) = &config.git.binary {
        return Ok(GitRunner::with_binary(binary.clone()));
    }
    Ok(GitRunner::from_environment()?)
}
