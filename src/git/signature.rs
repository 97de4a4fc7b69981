// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ref-state fingerprinting.
//!
//! ```text
//! show-ref --head lines  \
//!                         >-- Sha256 --> hex digest
//! stash list lines       /
//! ```
//!
//! The signature detects "has this repository changed since last observed":
//! it covers everything visible through refs and stashes and deliberately
//! nothing else (uncommitted edits do not change it).

use sha2::{Digest, Sha256};

use crate::error::ScanResult;

use super::repo::Repository;

impl Repository<'_> {
    /// Content fingerprint of the observable ref state.
    ///
    /// Identical across observations with no ref or stash change in between;
    /// any ref addition, removal, or move changes it.
    ///
    /// # Errors
    ///
    /// Returns the underlying query failure.
    pub fn signature(&self) -> ScanResult<String> {
        let mut hasher = Sha256::new();
        for line in self.show_ref_lines()? {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        for line in self.stashes()? {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
