use std::path::PathBuf;

use crate::error::CredentialError;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Credential file name, relative to the home directory
pub const CREDENTIALS_FILE_NAME: &str = ".git_credentials.json";

/// Runtime configuration. Everything has a fixed default; the bases only
/// change when pointing the client at a mock server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash
    pub api_base: String,
    /// Base URL used to build clone and remote URLs
    pub web_base: String,
    pub credentials_path: PathBuf,
}

impl Config {
    /// Default configuration with the credential file under the home directory
    pub fn load(credentials_override: Option<PathBuf>) -> Result<Config, CredentialError> {
        let credentials_path = match credentials_override {
            Some(path) => path,
            None => default_credentials_path().ok_or(CredentialError::NoHome)?,
        };

        Ok(Config {
            api_base: GITHUB_API_BASE.to_string(),
            web_base: GITHUB_WEB_BASE.to_string(),
            credentials_path,
        })
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = trim_base(base.into());
        self
    }

    pub fn with_web_base(mut self, base: impl Into<String>) -> Self {
        self.web_base = trim_base(base.into());
        self
    }

    /// `https://github.com/<owner>/<name>.git`
    pub fn clone_url(&self, owner: &str, name: &str) -> String {
        format!("{}/{}/{}.git", self.web_base, owner, name)
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

pub fn default_credentials_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CREDENTIALS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_override_path() {
        let config = Config::load(Some(PathBuf::from("/tmp/creds.json"))).unwrap();
        assert_eq!(config.credentials_path, PathBuf::from("/tmp/creds.json"));
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.web_base, "https://github.com");
    }

    #[test]
    fn test_default_path_is_in_home() {
        if let Some(path) = default_credentials_path() {
            assert!(path.ends_with(".git_credentials.json"));
        }
    }

    #[test]
    fn test_with_api_base_strips_trailing_slash() {
        let config = Config::load(Some(PathBuf::from("c.json")))
            .unwrap()
            .with_api_base("http://127.0.0.1:1234/");
        assert_eq!(config.api_base, "http://127.0.0.1:1234");
    }

    #[test]
    fn test_clone_url() {
        let config = Config::load(Some(PathBuf::from("c.json"))).unwrap();
        assert_eq!(
            config.clone_url("alice", "my-repo"),
            "https://github.com/alice/my-repo.git"
        );
    }
}
