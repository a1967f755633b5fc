use reqwest::{Client, Method, RequestBuilder, Response, Url};
use tracing::debug;

use crate::credentials::Credential;
use crate::error::ApiError;

pub mod repos;

pub use repos::Visibility;

const USER_AGENT: &str = "gh-repokit";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Thin wrapper over the GitHub REST API. Requests are sent one at a time
/// with the client's default timeout and are never retried.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base: String,
}

impl GitHubClient {
    /// `base` is the API root, e.g. `https://api.github.com`
    pub fn new(base: &str) -> Self {
        GitHubClient {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Join `segments` onto the API root, escaping each one so `#`, `?` or
    /// `%` in a name cannot end the path early
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidBase(self.base.clone());
        let mut url = Url::parse(&self.base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        credential: &Credential,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        Ok(base_request(&self.client, method, url.as_str(), credential))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        debug!(url = %response.url(), status = %response.status(), "github response");
        Ok(response)
    }
}

pub fn base_request(
    client: &Client,
    method: Method,
    url: &str,
    credential: &Credential,
) -> RequestBuilder {
    client
        .request(method, url)
        .header("Authorization", format!("token {}", credential.token))
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
}

/// Turn an unexpected response into an error carrying its status and body
async fn unexpected(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_request_sets_auth_header() {
        let client = Client::new();
        let creds = Credential::new("alice", "test-token-123");
        let request = base_request(&client, Method::GET, "https://api.github.com/test", &creds);

        let built = request.build().unwrap();
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "token test-token-123"
        );
    }

    #[test]
    fn test_base_request_sets_user_agent_and_accept() {
        let client = Client::new();
        let creds = Credential::new("alice", "test-token");
        let request = base_request(&client, Method::DELETE, "https://api.github.com/test", &creds);

        let built = request.build().unwrap();
        assert_eq!(built.method(), &Method::DELETE);
        assert_eq!(built.headers().get("User-Agent").unwrap(), "gh-repokit");
        assert_eq!(
            built.headers().get("Accept").unwrap(),
            "application/vnd.github.v3+json"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        assert_eq!(GitHubClient::new("http://localhost:1234/").base(), "http://localhost:1234");
    }

    #[test]
    fn test_endpoint_escapes_each_segment() {
        let client = GitHubClient::new("https://api.github.com");
        let url = client.endpoint(&["repos", "alice", "foo#bar"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/alice/foo%23bar");

        let url = client.endpoint(&["repos", "alice", "foo?x=1"]).unwrap();
        assert_eq!(url.path(), "/repos/alice/foo%3Fx=1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/");
        let url = client.endpoint(&["user", "repos"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/user/repos");
    }

    #[test]
    fn test_endpoint_rejects_unparseable_base() {
        let client = GitHubClient::new("not a url");
        assert!(matches!(
            client.endpoint(&["user"]),
            Err(ApiError::InvalidBase(_))
        ));
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 422,
            body: r#"{"message": "Validation Failed"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"422 {"message": "Validation Failed"}"#);
    }
}
