//! Running the `git` executable
//!
//! All local version-control work goes through [`CommandRunner`] so the
//! operations can be exercised without a real git binary.

#[cfg(any(test, feature = "test-support"))]
use std::cell::RefCell;
use std::path::Path;
#[cfg(any(test, feature = "test-support"))]
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::CommandError;

/// Hidden directory marking the root of a working copy
pub const MARKER_DIR: &str = ".git";

/// Message used for automatic commits before pushing
pub const AUTO_COMMIT_MESSAGE: &str = "Auto commit";

pub trait CommandRunner {
    /// Run `git <args>` inside `cwd`. Output is discarded; only the exit
    /// status matters.
    fn run(&self, args: &[&str], cwd: &Path) -> Result<(), CommandError>;
}

/// Invokes the `git` found on `PATH`
#[derive(Debug, Default, Clone)]
pub struct GitCli;

impl CommandRunner for GitCli {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<(), CommandError> {
        let command = args.join(" ");
        debug!(%command, cwd = %cwd.display(), "running git");

        let status = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CommandError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            debug!(%command, code = ?status.code(), "git failed");
            Err(CommandError::Failed {
                command,
                code: status.code(),
            })
        }
    }
}

/// Whether `dir` is the root of a working copy
pub fn is_repository_root(dir: &Path) -> bool {
    dir.join(MARKER_DIR).is_dir()
}

#[cfg(any(test, feature = "test-support"))]
/// Stands in for git: remembers every invocation and fails the ones it is
/// told to. A successful `clone` can create the folder git would have made.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Vec<String>>>,
    failing: Vec<String>,
    clone_creates: Option<PathBuf>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `git <command>` exit with status 1
    pub fn failing(mut self, command: &str) -> Self {
        self.failing.push(command.to_string());
        self
    }

    /// On a successful clone, create `folder` inside the working directory
    pub fn clone_creates(mut self, folder: impl Into<PathBuf>) -> Self {
        self.clone_creates = Some(folder.into());
        self
    }

    /// Every invocation so far, each as `git` arguments joined by spaces
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.join(" ")).collect()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CommandRunner for RecordingRunner {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<(), CommandError> {
        let command = args.join(" ");
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| a.to_string()).collect());

        if self.failing.iter().any(|f| *f == command) {
            return Err(CommandError::Failed {
                command,
                code: Some(1),
            });
        }

        if args.first() == Some(&"clone") {
            if let Some(folder) = &self.clone_creates {
                std::fs::create_dir_all(cwd.join(folder)).map_err(|e| CommandError::Spawn {
                    command,
                    message: e.to_string(),
                })?;
            }
        }

        Ok(())
    }
}
