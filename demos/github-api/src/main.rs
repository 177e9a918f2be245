//! GitHub API Example
//!
//! Demonstrates building an API client on top of courier's route handler.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use chrono::{DateTime, Utc};
use courier::Bytes;
use courier::prelude::*;

// ============================================================================
// Data Types
// ============================================================================

/// A GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: Option<String>,
    pub full_name: Option<String>,
    #[serde(default, with = "iso8601::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to create a GitHub issue.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssue {
    pub title: String,
    pub body: Option<String>,
}

/// A GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u32,
    pub title: String,
    pub state: String,
}

// ============================================================================
// Client
// ============================================================================

const USER_AGENT: &str = "courier-github-example/0.1.0";

/// GitHub API client.
pub struct GitHubClient {
    api: ApiClient,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against `base_url`, e.g. `https://api.github.com`.
    pub fn new(base_url: impl Into<String>) -> std::io::Result<Self> {
        let api = ApiClient::builder(base_url).build()?;
        Ok(Self { api, token: None })
    }

    /// Authenticate subsequent calls with a personal access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// User endpoints.
    #[must_use]
    pub fn users(&self) -> UserRoutes<'_> {
        UserRoutes { client: self }
    }

    /// Issue endpoints of one repository.
    #[must_use]
    pub fn issues<'a>(&'a self, owner: &'a str, repo: &'a str) -> IssueRoutes<'a> {
        IssueRoutes {
            client: self,
            owner,
            repo,
        }
    }

    fn headers(&self) -> Headers {
        self.api
            .headers_with_token_and(self.token.as_deref(), [("User-Agent", USER_AGENT)])
    }
}

/// `/users/...` endpoints.
pub struct UserRoutes<'a> {
    client: &'a GitHubClient,
}

impl UserRoutes<'_> {
    /// Public repositories of `owner`.
    pub fn repositories(&self, owner: &str) -> ResponseFuture<Vec<Repository>> {
        self.client
            .api
            .get(&format!("/users/{owner}/repos"), Some(self.client.headers()))
    }

    /// Avatar image of `owner`, fetched from the avatar CDN.
    pub fn avatar(&self, avatar_base_url: &str, owner: &str) -> ResponseFuture<Bytes> {
        self.client
            .api
            .get_data(Some(avatar_base_url), &format!("/{owner}.png"))
    }
}

/// `/repos/{owner}/{repo}/issues` endpoints.
pub struct IssueRoutes<'a> {
    client: &'a GitHubClient,
    owner: &'a str,
    repo: &'a str,
}

impl IssueRoutes<'_> {
    /// Open an issue.
    pub fn create(&self, issue: &CreateIssue) -> ResponseFuture<Issue> {
        let path = format!("/repos/{}/{}/issues", self.owner, self.repo);
        self.client
            .api
            .post_with_body(&path, Some(self.client.headers()), issue)
    }

    /// Lock the conversation on an issue.
    pub fn lock(&self, number: u32) -> ResponseFuture<()> {
        let path = format!("/repos/{}/{}/issues/{number}/lock", self.owner, self.repo);
        self.client.api.put_void(&path, Some(self.client.headers()))
    }
}

// ============================================================================
// Main: Demonstrate usage
// ============================================================================

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let github = GitHubClient::new("https://api.github.com")?;

    println!("GitHub API Client created!");
    println!("Base URL: {}", github.api.base_url());

    let repos = github.users().repositories("octocat").await?;
    for repo in &repos {
        let name = repo.full_name.as_deref().unwrap_or("<unnamed>");
        match repo.created_at {
            Some(created_at) => println!("{name} (created {})", iso8601::format(&created_at)),
            None => println!("{name}"),
        }
    }

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================
