// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Buffered `key = value` report rendering.
//!
//! ```text
//! [repo-1]
//! repo = /home/user/project
//! commits = 42
//! branches = "main, dev"
//! ```
//!
//! One [`RepoReport`] is built per repository and flushed whole, so blocks
//! never interleave with log output or with each other even if analysis is
//! ever parallelized.

use std::fmt;

/// Line buffer for one repository's report block.
#[derive(Debug, Default)]
pub struct RepoReport {
    lines: Vec<String>,
}

impl RepoReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key = value`.
    pub fn field(&mut self, key: &str, value: impl fmt::Display) {
        self.lines.push(format!("{key} = {value}"));
    }

    /// Append `key = "a, b, c"`. Renders an empty list as `key = ""`;
    /// callers that only want non-empty lists gate before calling.
    pub fn quoted_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) {
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        self.lines.push(format!("{key} = \"{joined}\""));
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for RepoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
