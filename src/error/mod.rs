// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             ScanError (~24 bytes)
//!                    |
//!        +------+----+----+------+
//!        |      |         |      |
//!        v      v         v      v
//!       Git   Parse     Config   Fs    Io/Other
//!       Box    Box       Box     Box   Box<..>
//!
//! Sub-errors (unboxed internally):
//!   Git     BinaryNotFound, QueryFailed, NotARepository
//!   Parse   Mismatch, InvalidInteger
//!   Config  InvalidValue, ParseError
//!   Fs      IoError, NotFound
//!
//! All variants boxed => ScanError fits in 24 bytes.
//! ```
//!
//! The variants map onto the failure classes of the scanner:
//! `GitError::BinaryNotFound` is an environment error that aborts the whole
//! run; `GitError::QueryFailed` is scoped to a single backend query and is
//! interpreted by the caller; `ParseError::Mismatch` aborts the analysis of
//! one repository (the backend's output format is not the one we support);
//! `GitError::NotARepository` means a candidate path is skipped.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ScanError`].
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Git backend error.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Backend output did not match an expected grammar.
    #[error("parse error: {0}")]
    Parse(#[from] Box<ParseError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ScanError {
                fn from(err: $error) -> Self {
                    ScanError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ParseError => Parse,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git backend errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be located. Fatal for the whole run.
    #[error("git binary not found: {source}")]
    BinaryNotFound {
        #[source]
        source: which::Error,
    },

    /// The git binary could not be spawned.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A single backend query failed (non-zero exit or stderr output).
    /// Interpretation is up to the caller: not a repository, operation not
    /// applicable, or a genuine failure to surface.
    #[error("git query failed: {command} (exit {exit_code}): {stderr}")]
    QueryFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The path is neither a working tree nor a bare repository.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },
}

// --- Parse Errors ---

/// Backend output parse errors.
///
/// A mismatch is fatal for the repository being analyzed: it means the
/// backend emitted a line shape we do not support, and silently skipping it
/// would drop data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line did not match its fixed grammar.
    #[error("line does not match {grammar} grammar: {line:?}")]
    Mismatch {
        grammar: &'static str,
        line: String,
    },

    /// A field expected to be an integer was not.
    #[error("expected integer in {grammar} output, got {value:?}")]
    InvalidInteger {
        grammar: &'static str,
        value: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
