// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for reposcan.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. reposcan.toml (cwd)
//! 3. --config FILE (repeatable, in order)
//! 4. REPOSCAN_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPOSCAN_SCAN_DIRTY_ONLY=true  → scan.dirty_only = true
//! REPOSCAN_GIT_BINARY=/usr/bin/git → git.binary = "/usr/bin/git"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, ReportConfig, ScanConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git backend options.
    pub git: GitConfig,
    /// Scan behavior.
    pub scan: ScanConfig,
    /// Report rendering.
    pub report: ReportConfig,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration
    /// options, deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global.log_file.display().to_string(),
        );

        options.insert(
            "git.binary".to_string(),
            self.git
                .binary
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );

        options.insert("scan.skip_dirs".to_string(), self.scan.skip_dirs.join(", "));
        options.insert("scan.dirty_only".to_string(), self.scan.dirty_only.to_string());
        options.insert(
            "scan.check_upstream".to_string(),
            self.scan.check_upstream.to_string(),
        );
        options.insert("scan.verbose".to_string(), self.scan.verbose.to_string());

        options.insert(
            "report.show_unfetched_with_unpushed".to_string(),
            self.report.show_unfetched_with_unpushed.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
