//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

/// A repository name rejected before any network or filesystem work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Repository name contains invalid characters. Use letters, numbers, ., -, or _.")]
    InvalidCharacters,

    #[error("Repository name cannot start with a hyphen.")]
    LeadingHyphen,

    #[error("Repository name is too long (max {max} characters).")]
    TooLong { max: usize },

    #[error("Repository name cannot be empty.")]
    Empty,

    #[error("Invalid repository name.")]
    UnsafePath,
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Could not access credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode credentials: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine the home directory")]
    NoHome,

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// A failed exchange with the hosting API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{status} {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBase(String),
}

/// A git invocation that could not be started or exited non-zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Could not run `git {command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Command `git {command}` failed with {}", exit_label(.code))]
    Failed { command: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

#[derive(Error, Debug)]
#[error("Could not read input: {0}")]
pub struct PromptError(#[from] pub dialoguer::Error);

/// Everything an operation can fail with; each variant is rendered for the
/// user and the menu keeps running.
#[derive(Error, Debug)]
pub enum OpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("GitHub repository '{0}' already exists!")]
    RemoteExists(String),

    #[error("This is not a Git repository!")]
    NotARepository,

    /// `staging` holds the `add` failure seen before the commit, if any
    #[error("Commit failed (no changes or other error): {source}")]
    CommitFailed {
        source: CommandError,
        staging: Option<CommandError>,
    },

    #[error("Clone failed!")]
    CloneFailed,

    #[error("Invalid URL!")]
    InvalidUrl,
}
