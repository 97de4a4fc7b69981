// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for reposcan.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitConfig, ScanConfig, ReportConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables the file layer.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// Git backend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Explicit path to the git binary. When unset the binary is resolved
    /// from `PATH` once at startup.
    pub binary: Option<PathBuf>,
}

/// Scan behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory names never descended into during discovery.
    pub skip_dirs: Vec<String>,
    /// Only report repositories with uncommitted/unmerged/unpushed/unfetched
    /// state.
    pub dirty_only: bool,
    /// Query each configured remote for its advertised refs (one network
    /// round trip per remote; the slow path).
    pub check_upstream: bool,
    /// Include signature, object statistics and root-commit sections.
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_dirs: vec!["node_modules".to_string(), "target".to_string()],
            dirty_only: false,
            check_upstream: false,
            verbose: false,
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Render the unfetched detail even when unpushed commits exist.
    ///
    /// When both sets are non-empty the two views have truly diverged and
    /// settling who is ahead would need a merge analysis this tool does not
    /// attempt, so the unfetched lines are suppressed unless this is set.
    pub show_unfetched_with_unpushed: bool,
}
