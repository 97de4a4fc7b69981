// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line grammars for backend output.
//!
//! ```text
//! "* main"                            --> strip_list_marker --> "main"
//! "/path  abc1234 [main] prunable"    --> parse_worktree_line
//! "abc123<TAB>refs/heads/main"        --> parse_ref_line
//! "count: 4356"                       --> parse_stats_lines
//! ```
//!
//! A line that does not match its grammar is a [`ParseError::Mismatch`]:
//! it means the backend's output format changed or is unsupported, and
//! skipping the line would silently drop data.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, ScanResult};

static WORKTREE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+) ([0-9a-fA-F]{7,}) \[([^\]]+)\]( prunable)?$").expect("worktree pattern")
});

static REF_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-fA-F]+)\s+(\S.*)$").expect("ref pattern"));

/// One entry of `git worktree list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeLine {
    pub path: String,
    pub hash: String,
    pub branch: String,
    pub prunable: bool,
}

/// One entry of `git show-ref` / `git ls-remote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefLine {
    pub hash: String,
    pub name: String,
}

/// Strip the fixed 2-character marker from a `git branch` / `git tag`
/// style listing line (`"* main"`, `"+ linked"`, `"  dev"`).
///
/// # Errors
///
/// Returns [`ParseError::Mismatch`] for lines shorter than the marker.
pub fn strip_list_marker(line: &str) -> ScanResult<&str> {
    line.get(2..).ok_or_else(|| {
        ParseError::Mismatch {
            grammar: "marker-list",
            line: line.to_string(),
        }
        .into()
    })
}

/// Parse one `git worktree list` line.
///
/// The path column is padded to align the hash column, so the captured path
/// is trimmed of trailing whitespace.
///
/// # Errors
///
/// Returns [`ParseError::Mismatch`] if the line does not match the
/// `path hash [branch]` shape (e.g. a bare or detached entry).
pub fn parse_worktree_line(line: &str) -> ScanResult<WorktreeLine> {
    let captures = WORKTREE_LINE.captures(line).ok_or_else(|| ParseError::Mismatch {
        grammar: "worktree-list",
        line: line.to_string(),
    })?;
    Ok(WorktreeLine {
        path: captures[1].trim_end().to_string(),
        hash: captures[2].to_string(),
        branch: captures[3].to_string(),
        prunable: captures.get(4).is_some(),
    })
}

/// Parse one `hash<whitespace>refname` line.
///
/// # Errors
///
/// Returns [`ParseError::Mismatch`] if the line does not match.
pub fn parse_ref_line(line: &str) -> ScanResult<RefLine> {
    let captures = REF_LINE.captures(line).ok_or_else(|| ParseError::Mismatch {
        grammar: "ref-list",
        line: line.to_string(),
    })?;
    Ok(RefLine {
        hash: captures[1].to_string(),
        name: captures[2].to_string(),
    })
}

/// Parse `label: value` lines (`git count-objects -v`) into a label map.
/// The first occurrence of a label wins.
///
/// # Errors
///
/// Returns [`ParseError::Mismatch`] for a line without a `label: ` split and
/// [`ParseError::InvalidInteger`] for a non-numeric value.
pub fn parse_stats_lines(lines: &[String]) -> ScanResult<BTreeMap<String, u64>> {
    let mut stats = BTreeMap::new();
    for line in lines {
        let (label, value) = line.split_once(": ").ok_or_else(|| ParseError::Mismatch {
            grammar: "count-objects",
            line: line.clone(),
        })?;
        let value: u64 = value.parse().map_err(|_| ParseError::InvalidInteger {
            grammar: "count-objects",
            value: value.to_string(),
        })?;
        stats.entry(label.to_string()).or_insert(value);
    }
    Ok(stats)
}

/// Parse the single numeric line of `git rev-list --count`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidInteger`] if the output is missing or not a
/// number.
pub fn parse_count(lines: &[String]) -> ScanResult<u64> {
    let value = lines.first().map(String::as_str).unwrap_or_default();
    value.trim().parse().map_err(|_| {
        ParseError::InvalidInteger {
            grammar: "rev-list-count",
            value: value.to_string(),
        }
        .into()
    })
}
