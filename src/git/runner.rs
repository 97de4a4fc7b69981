// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command execution.
//!
//! ```text
//! runner.query(repo, args) --> git -C <repo> <args...> --> stdout lines
//! ```
//!
//! Every query is `<binary> -C <repo-path> <subcommand> [args...]`. Exit
//! status 0 with no stderr output is a success; anything else is a
//! [`GitError::QueryFailed`] for that single query, and the caller decides
//! what the failure means (not a repository, operation not applicable, or a
//! genuine error worth surfacing).

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::trace;

use crate::error::{GitError, ScanResult};

/// Outcome of one backend invocation. Consumed immediately; never stored.
struct CommandResult {
    stdout: Vec<String>,
    stderr: String,
    status: i32,
}

/// Runs git queries against repositories.
///
/// The binary location is resolved once at construction and carried by the
/// runner for its whole lifetime; a missing binary is an environment error
/// that aborts the run, not a per-repository condition.
#[derive(Debug, Clone)]
pub struct GitRunner {
    binary: PathBuf,
}

impl GitRunner {
    /// Resolve the git binary from `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BinaryNotFound`] if no git binary can be located.
    /// This is fatal for the whole run.
    pub fn from_environment() -> ScanResult<Self> {
        let binary = which::which("git").map_err(|source| GitError::BinaryNotFound { source })?;
        Ok(Self { binary })
    }

    /// Use an explicitly configured binary path.
    #[must_use]
    pub const fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// The resolved binary path.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run `git -C <repo> <args...>` and return captured stdout lines.
    ///
    /// Prompts are disabled (`GIT_TERMINAL_PROMPT=0`, `GCM_INTERACTIVE=never`)
    /// so a query against an authenticated remote fails instead of hanging on
    /// credential input.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::SpawnFailed`] if the process cannot be started and
    /// [`GitError::QueryFailed`] on a non-zero exit status or any stderr
    /// output.
    pub fn query(&self, repo: &Path, args: &[&str]) -> ScanResult<Vec<String>> {
        let command = self.describe(repo, args);
        trace!(command = %command, "running git query");

        let output = Command::new(&self.binary)
            .arg("-C")
            .arg(repo)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .output()
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        let result = CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::to_owned)
                .collect(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            status: output.status.code().unwrap_or(-1),
        };

        if result.status != 0 || !result.stderr.is_empty() {
            return Err(GitError::QueryFailed {
                command,
                exit_code: result.status,
                stderr: result.stderr,
            }
            .into());
        }

        Ok(result.stdout)
    }

    fn describe(&self, repo: &Path, args: &[&str]) -> String {
        format!("git -C {} {}", repo.display(), args.join(" "))
    }
}
