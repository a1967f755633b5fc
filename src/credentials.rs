//! Persisted GitHub login
//!
//! A single username/token pair lives in a plaintext JSON file. The
//! [`Session`] loads it once and hands it to every operation that talks to
//! the API; the user is only asked for it when nothing has been saved yet.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::CredentialError;
use crate::util::Prompter;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    // Personal access token
    pub token: String,
}

impl Credential {
    pub fn new(username: &str, token: &str) -> Credential {
        Credential {
            username: username.to_string(),
            token: token.to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.token.is_empty()
    }
}

// Keep the token out of logs and panic messages
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved credential, or `None` when the file is missing, unreadable,
    /// not valid JSON, or has an empty field
    pub fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no saved credentials");
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&raw) {
            Ok(credential) if credential.is_complete() => Some(credential),
            Ok(_) => {
                warn!(path = %self.path.display(), "saved credentials have an empty field");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed credential file");
                None
            }
        }
    }

    /// Overwrite the credential file with `credential`
    pub fn save(&self, credential: &Credential) -> Result<(), CredentialError> {
        let json = serde_json::to_string(credential)?;
        let io_err = |source: std::io::Error| CredentialError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = open_private(&self.path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;

        info!(path = %self.path.display(), "saved credentials");
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten files left by older versions too
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// The login for one run of the program
pub struct Session {
    store: CredentialStore,
    credential: Option<Credential>,
    loaded: bool,
}

impl Session {
    pub fn new(store: CredentialStore) -> Self {
        Session {
            store,
            credential: None,
            loaded: false,
        }
    }

    /// Session that starts out logged in, without touching the store
    pub fn with_credential(store: CredentialStore, credential: Credential) -> Self {
        Session {
            store,
            credential: Some(credential),
            loaded: true,
        }
    }

    /// The cached credential, reading the store on first use
    pub fn current(&mut self) -> Option<&Credential> {
        if !self.loaded {
            self.credential = self.store.load();
            self.loaded = true;
        }
        self.credential.as_ref()
    }

    /// Return the saved credential, or ask for one and persist it
    pub fn ensure_logged_in(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<&Credential, CredentialError> {
        let credential = match self.current() {
            Some(saved) => saved.clone(),
            None => {
                let entered = prompt_for_credential(prompter)?;
                self.store.save(&entered)?;
                prompter.tell("GitHub credentials saved!");
                entered
            }
        };

        debug!(username = %credential.username, "logged in");
        Ok(self.credential.insert(credential))
    }
}

fn prompt_for_credential(prompter: &mut dyn Prompter) -> Result<Credential, CredentialError> {
    let username = prompter.ask("Enter GitHub username")?.trim().to_string();
    if username.is_empty() {
        return Err(CredentialError::EmptyField("username"));
    }

    let token = prompter
        .ask("Enter GitHub Personal Access Token (PAT)")?
        .trim()
        .to_string();
    if token.is_empty() {
        return Err(CredentialError::EmptyField("token"));
    }

    Ok(Credential { username, token })
}
