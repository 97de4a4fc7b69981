// reposcan: Git Repository State Scanner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository handle and classification.
//!
//! ```text
//! Repository::open(runner, path)
//!     rev-parse --is-inside-work-tree   --> worktree?
//!     rev-parse --is-bare-repository    --> bare?      (only if not worktree)
//!     neither                           --> NotARepository
//! ```
//!
//! A handle is exactly one of working tree or bare; it is never constructed
//! for a path that is neither. Handles are short-lived (one scan pass) and
//! cache `main_branch` and the remote name list for their lifetime.

use std::path::{Path, PathBuf};

use crate::error::{FsError, GitError, ScanError, ScanResult};

use super::runner::GitRunner;

/// Handle for one repository on disk.
#[derive(Debug)]
pub struct Repository<'r> {
    runner: &'r GitRunner,
    /// Absolute root, forward-slash separators.
    root: String,
    root_dir: PathBuf,
    is_worktree: bool,
    is_bare: bool,
    main_branch: Option<String>,
    remote_names: Option<Vec<String>>,
}

impl<'r> Repository<'r> {
    /// Open and classify the repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] when the path is neither inside a
    /// working tree nor a bare repository; such a path must not be analyzed
    /// further.
    pub fn open(runner: &'r GitRunner, path: &Path) -> ScanResult<Self> {
        let root_dir = std::path::absolute(path).map_err(|source| FsError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let root = root_dir.to_string_lossy().replace('\\', "/");

        let is_worktree = bool_query(runner, &root_dir, &["rev-parse", "--is-inside-work-tree"]);
        let is_bare =
            !is_worktree && bool_query(runner, &root_dir, &["rev-parse", "--is-bare-repository"]);

        if !is_worktree && !is_bare {
            return Err(GitError::NotARepository { path: root }.into());
        }

        Ok(Self {
            runner,
            root,
            root_dir,
            is_worktree,
            is_bare,
            main_branch: None,
            remote_names: None,
        })
    }

    /// Absolute root path with forward-slash separators.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Root path as given to the filesystem.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    #[must_use]
    pub const fn is_worktree(&self) -> bool {
        self.is_worktree
    }

    #[must_use]
    pub const fn is_bare(&self) -> bool {
        self.is_bare
    }

    /// The resolved main branch, if any. `None` until
    /// [`resolve_main_branch`](Self::resolve_main_branch) has run, and stays
    /// `None` for a repository with zero branches; operations that need a
    /// main branch are simply not applicable then.
    #[must_use]
    pub fn main_branch(&self) -> Option<&str> {
        self.main_branch.as_deref()
    }

    /// Decide which branch to treat as "main": a branch literally named
    /// `main` wins, then `master`, then the first branch in listing order.
    pub fn resolve_main_branch(&mut self, branches: &[String]) {
        self.main_branch = if branches.iter().any(|b| b == "main") {
            Some("main".to_string())
        } else if branches.iter().any(|b| b == "master") {
            Some("master".to_string())
        } else {
            branches.first().cloned()
        };
    }

    /// Configured remote names, in listing order. Fetched once per handle.
    ///
    /// # Errors
    ///
    /// Returns the underlying query failure if `git remote` fails.
    pub fn remote_names(&mut self) -> ScanResult<Vec<String>> {
        if self.remote_names.is_none() {
            self.remote_names = Some(self.query(&["remote"])?);
        }
        Ok(self.remote_names.clone().unwrap_or_default())
    }

    /// Run a query against this repository.
    pub(crate) fn query(&self, args: &[&str]) -> ScanResult<Vec<String>> {
        self.runner.query(&self.root_dir, args)
    }

    /// All refs (`show-ref --head`), one `hash name` line per ref.
    ///
    /// A repository without a single ref makes `show-ref` exit 1 with no
    /// output; that is an empty listing, not a failure.
    ///
    /// # Errors
    ///
    /// Returns any other query failure unchanged.
    pub(crate) fn show_ref_lines(&self) -> ScanResult<Vec<String>> {
        match self.query(&["show-ref", "--head"]) {
            Ok(lines) => Ok(lines),
            Err(ScanError::Git(err))
                if matches!(
                    &*err,
                    GitError::QueryFailed {
                        exit_code: 1,
                        stderr,
                        ..
                    } if stderr.is_empty()
                ) =>
            {
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

fn bool_query(runner: &GitRunner, dir: &Path, args: &[&str]) -> bool {
    runner
        .query(dir, args)
        .is_ok_and(|lines| lines.first().is_some_and(|line| line == "true"))
}
