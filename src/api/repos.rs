//! Repository endpoints: lookup, create, delete and visibility update
//!
//! Each call succeeds on exactly one status code. Anything else comes back
//! as [`ApiError::Status`] with the response body untouched, so the user
//! sees what GitHub said.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::fmt;

use super::{unexpected, GitHubClient};
use crate::credentials::Credential;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn from_private(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Private => write!(f, "Private"),
            Visibility::Public => write!(f, "Public"),
        }
    }
}

/// Request body for creating a repository
#[derive(Serialize, Debug)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    private: bool,
}

/// Request body for changing visibility
#[derive(Serialize, Debug)]
struct UpdateVisibilityRequest {
    private: bool,
}

impl GitHubClient {
    /// Whether `<owner>/<name>` exists for the logged-in user.
    ///
    /// 200 means yes and 404 means no. Any other status (bad token, rate
    /// limit, server error) is returned as an error rather than being read
    /// as "not found".
    pub async fn repo_exists(&self, credential: &Credential, name: &str) -> Result<bool, ApiError> {
        let request = self.request(
            Method::GET,
            &["repos", credential.username.as_str(), name],
            credential,
        )?;
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(unexpected(response).await),
        }
    }

    /// `POST /user/repos`; succeeds only on 201
    pub async fn create_repo(
        &self,
        credential: &Credential,
        name: &str,
        visibility: Visibility,
    ) -> Result<(), ApiError> {
        let body = CreateRepoRequest {
            name,
            private: visibility.is_private(),
        };
        let request = self
            .request(Method::POST, &["user", "repos"], credential)?
            .json(&body);
        let response = self.send(request).await?;

        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(unexpected(response).await)
        }
    }

    /// `DELETE /repos/<owner>/<name>`; succeeds only on 204
    pub async fn delete_repo(&self, credential: &Credential, name: &str) -> Result<(), ApiError> {
        let request = self.request(
            Method::DELETE,
            &["repos", credential.username.as_str(), name],
            credential,
        )?;
        let response = self.send(request).await?;

        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(unexpected(response).await)
        }
    }

    /// `PATCH /repos/<owner>/<name>`; succeeds only on 200
    pub async fn set_visibility(
        &self,
        credential: &Credential,
        name: &str,
        visibility: Visibility,
    ) -> Result<(), ApiError> {
        let body = UpdateVisibilityRequest {
            private: visibility.is_private(),
        };
        let request = self
            .request(
                Method::PATCH,
                &["repos", credential.username.as_str(), name],
                credential,
            )?
            .json(&body);
        let response = self.send(request).await?;

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(unexpected(response).await)
        }
    }
}
