//! The user-facing repository operations
//!
//! Each operation runs a fixed sequence: validate the input, make sure we
//! are logged in, talk to GitHub, then touch the local working directory.
//! Operations never print and never exit; they return an [`Outcome`] or an
//! [`OpError`] and leave presentation to [`crate::report`].

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::{GitHubClient, Visibility};
use crate::config::Config;
use crate::credentials::{Credential, Session};
use crate::error::{CommandError, OpError, PromptError};
use crate::git::{self, CommandRunner, AUTO_COMMIT_MESSAGE};
use crate::util::Prompter;
use crate::validate::{validate_delete_name, validate_repo_name};

/// What happened locally after a repository was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalState {
    /// Cloned into this folder
    Cloned(PathBuf),
    /// Remote exists but the clone did not produce a folder
    CloneFailed(String),
    /// A folder with that name was already there; it has to be linked by hand
    ExistingFolder { remote_url: String },
}

/// What happened to the local folder after a remote deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalRemoval {
    Removed,
    NotPresent,
    NotADirectory,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { name: String, local: LocalState },
    CreationDeclined,
    Deleted { name: String, local: LocalRemoval },
    VisibilityChanged { name: String, visibility: Visibility },
    NothingToCommit,
    /// Committed; `failures` holds the steps that failed without aborting
    Pushed { failures: Vec<CommandError> },
    Cloned(PathBuf),
}

impl Outcome {
    /// Folder the caller should move into before stopping the menu
    pub fn enter_directory(&self) -> Option<&Path> {
        match self {
            Outcome::Created {
                local: LocalState::Cloned(path),
                ..
            }
            | Outcome::Cloned(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

pub struct Workflow<'a> {
    config: &'a Config,
    session: &'a mut Session,
    client: &'a GitHubClient,
    runner: &'a dyn CommandRunner,
    prompter: &'a mut dyn Prompter,
    workdir: PathBuf,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a Config,
        session: &'a mut Session,
        client: &'a GitHubClient,
        runner: &'a dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Workflow {
            config,
            session,
            client,
            runner,
            prompter,
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Ask the user something through the injected prompter
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompter.ask(prompt)
    }

    fn login(&mut self) -> Result<Credential, OpError> {
        let credential = self.session.ensure_logged_in(&mut *self.prompter)?;
        Ok(credential.clone())
    }

    /// Create `<user>/<name>` on GitHub and clone it next to us
    pub async fn create(&mut self, name: &str, visibility: Visibility) -> Result<Outcome, OpError> {
        validate_repo_name(name)?;

        let folder = self.workdir.join(name);
        let folder_exists = folder.exists();
        let credential = self.login()?;

        if self.client.repo_exists(&credential, name).await? {
            return Err(OpError::RemoteExists(name.to_string()));
        }

        if folder_exists {
            let prompt = format!(
                "Folder '{}' already exists locally. Create remote repository anyway?",
                name
            );
            if !self.prompter.confirm(&prompt)? {
                return Ok(Outcome::CreationDeclined);
            }
        }

        self.client
            .create_repo(&credential, name, visibility)
            .await?;
        info!(%name, %visibility, "created repository");

        let remote_url = self.config.clone_url(&credential.username, name);
        let local = if folder.exists() {
            LocalState::ExistingFolder { remote_url }
        } else {
            match self.clone_into(&remote_url, name) {
                Ok(path) => LocalState::Cloned(path),
                Err(e) => LocalState::CloneFailed(e.to_string()),
            }
        };

        Ok(Outcome::Created {
            name: name.to_string(),
            local,
        })
    }

    /// Delete `<user>/<name>` on GitHub, then the local folder of that name
    pub async fn delete(&mut self, name: &str) -> Result<Outcome, OpError> {
        validate_delete_name(name)?;
        let credential = self.login()?;

        self.client.delete_repo(&credential, name).await?;
        info!(%name, "deleted repository");

        Ok(Outcome::Deleted {
            name: name.to_string(),
            local: remove_local_folder(&self.workdir.join(name)),
        })
    }

    pub async fn set_visibility(
        &mut self,
        name: &str,
        visibility: Visibility,
    ) -> Result<Outcome, OpError> {
        validate_repo_name(name)?;
        let credential = self.login()?;

        self.client
            .set_visibility(&credential, name, visibility)
            .await?;

        Ok(Outcome::VisibilityChanged {
            name: name.to_string(),
            visibility,
        })
    }

    /// Stage everything, commit and push the working directory
    pub fn push(&mut self) -> Result<Outcome, OpError> {
        let dir = self.workdir.as_path();
        if !git::is_repository_root(dir) {
            return Err(OpError::NotARepository);
        }

        // A failing diff check means "there are changes", not an error
        let clean = self.runner.run(&["diff", "--quiet"], dir).is_ok()
            && self.runner.run(&["diff", "--cached", "--quiet"], dir).is_ok();
        if clean {
            return Ok(Outcome::NothingToCommit);
        }

        let staging = self.runner.run(&["add", "."], dir).err();
        if let Some(e) = &staging {
            warn!(error = %e, "staging failed");
        }

        if let Err(source) = self.runner.run(&["commit", "-m", AUTO_COMMIT_MESSAGE], dir) {
            return Err(OpError::CommitFailed { source, staging });
        }

        let mut failures: Vec<CommandError> = staging.into_iter().collect();

        if let Err(e) = self.runner.run(&["push"], dir) {
            warn!(error = %e, "push failed");
            failures.push(e);
        }

        Ok(Outcome::Pushed { failures })
    }

    /// Clone any repository by URL into the working directory
    pub fn clone_url(&mut self, url: &str) -> Result<Outcome, OpError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(OpError::InvalidUrl);
        }
        let folder = folder_from_url(url).ok_or(OpError::InvalidUrl)?;

        let path = self.clone_into(url, &folder)?;
        Ok(Outcome::Cloned(path))
    }

    fn clone_into(&self, url: &str, folder: &str) -> Result<PathBuf, OpError> {
        info!(%url, "cloning");
        self.runner.run(&["clone", url], &self.workdir)?;

        let path = self.workdir.join(folder);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(OpError::CloneFailed)
        }
    }
}

/// Folder git creates for `url`: the last path segment without `.git`
pub fn folder_from_url(url: &str) -> Option<String> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

fn remove_local_folder(path: &Path) -> LocalRemoval {
    // Symlinks are not followed so a link can never take its target with it
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return LocalRemoval::NotPresent,
    };
    if !metadata.is_dir() {
        return LocalRemoval::NotADirectory;
    }

    match fs::remove_dir_all(path) {
        Ok(()) => LocalRemoval::Removed,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not remove local folder");
            LocalRemoval::Failed(e.to_string())
        }
    }
}
