// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Divergence analysis: where do two views of the history disagree.
//!
//! ```text
//! uncommitted   working tree vs index/HEAD      status -s
//! unmerged      refs vs main branch             log --all --not <main>
//! unpushed      branches vs remote-tracking     log --branches --not --remotes
//! unfetched     remote-tracking vs upstream     show-ref + ls-remote per remote
//! ```
//!
//! `unfetched` is the only operation with a network round trip (one per
//! configured remote) and is only run when explicitly requested.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use crate::error::ScanResult;

use super::parse::parse_ref_line;
use super::repo::Repository;

/// Local branches with commits absent from every remote-tracking branch,
/// plus the full set of those commits.
#[derive(Debug, Clone, Default)]
pub struct UnpushedReport {
    /// One decoration-simplified line per branch tip.
    pub branches: Vec<String>,
    /// Every unpushed commit hash.
    pub commits: Vec<String>,
}

impl UnpushedReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// A remote-tracking ref whose hash no longer matches the upstream ref it
/// tracks: the local view is behind (or has diverged from) upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefDivergence {
    /// Fully-qualified remote-tracking name (`refs/remotes/<remote>/<tip>`).
    pub name: String,
    pub local: String,
    pub remote: String,
}

impl fmt::Display for RefDivergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.local, self.remote)
    }
}

impl Repository<'_> {
    /// Working-tree status lines, verbatim (`status -s`). Only meaningful
    /// for working trees; the caller gates on classification.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn uncommitted(&self) -> ScanResult<Vec<String>> {
        self.query(&["status", "-s"])
    }

    /// Commits reachable from any ref but not from `main_branch`.
    ///
    /// Requires a resolved main branch; callers express "not applicable" by
    /// not calling this (see [`Repository::main_branch`]).
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn unmerged(&self, main_branch: &str) -> ScanResult<Vec<String>> {
        self.query(&["log", "--all", "--format=format:%H", "--not", main_branch])
    }

    /// Branches with commits not present on any remote-tracking branch, and
    /// those commits. The commit query is skipped when no branch qualifies.
    ///
    /// # Errors
    ///
    /// Returns the query failure.
    pub fn unpushed(&self) -> ScanResult<UnpushedReport> {
        let branches = self.query(&[
            "log",
            "--branches",
            "--not",
            "--remotes",
            "--simplify-by-decoration",
            "--format=format:%H %D",
        ])?;
        if branches.is_empty() {
            return Ok(UnpushedReport::default());
        }

        let commits = self.query(&["log", "--branches", "--not", "--remotes", "--format=format:%H"])?;
        Ok(UnpushedReport { branches, commits })
    }

    /// Remote-tracking refs that are stale relative to the actual upstream,
    /// determined without fetching:
    ///
    /// 1. collect local `refs/remotes/*` refs (everything else dropped),
    /// 2. per configured remote, list its advertised `refs/heads/*` and
    ///    translate each to the corresponding `refs/remotes/<remote>/<tip>`,
    /// 3. report one entry per hash mismatch. An upstream ref with no local
    ///    counterpart has simply never been fetched and is not reported.
    ///
    /// An unreachable remote is logged and skipped; the remaining remotes
    /// are still checked.
    ///
    /// # Errors
    ///
    /// Returns a ref-listing or parse failure.
    pub fn unfetched(&mut self) -> ScanResult<Vec<RefDivergence>> {
        let mut tracking: BTreeMap<String, String> = BTreeMap::new();
        for line in self.show_ref_lines()? {
            let parsed = parse_ref_line(&line)?;
            if parsed.name.starts_with("refs/remotes/") {
                tracking.insert(parsed.name, parsed.hash);
            }
        }
        if tracking.is_empty() {
            return Ok(Vec::new());
        }

        let mut stale = Vec::new();
        for remote in self.remote_names()? {
            let advertised = match self.query(&["ls-remote", &remote]) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!(remote = %remote, error = %err, "remote unreachable, skipping");
                    continue;
                }
            };
            for line in advertised {
                let parsed = parse_ref_line(&line)?;
                let Some(tip) = parsed.name.strip_prefix("refs/heads/") else {
                    continue;
                };
                let name = format!("refs/remotes/{remote}/{tip}");
                if let Some(local) = tracking.get(&name)
                    && *local != parsed.hash
                {
                    stale.push(RefDivergence {
                        name,
                        local: local.clone(),
                        remote: parsed.hash,
                    });
                }
            }
        }
        Ok(stale)
    }
}
