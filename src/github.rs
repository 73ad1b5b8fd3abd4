use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::error::{ReposcopeError, Result};
use crate::source::IssueSource;
use crate::types::{Account, IssueSummary, RepositorySummary, StateFilter};

/// Issues per page. The view is built around this fixed size.
const PER_PAGE: u8 = 5;

pub struct GitHub {
    client: Octocrab,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub").finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for ReposcopeError {
    fn from(err: octocrab::Error) -> Self {
        ReposcopeError::Api(err.to_string())
    }
}

impl GitHub {
    /// Build a client. Without a token, requests go out unauthenticated
    /// (public repositories only, tighter rate limits).
    pub fn new(token: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let client = builder
            .build()
            .map_err(|e| ReposcopeError::Auth(e.to_string()))?;

        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct AccountPayload {
    login: String,
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    full_name: String,
    description: Option<String>,
    html_url: String,
    stargazers_count: Option<u32>,
    owner: AccountPayload,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
    title: String,
    html_url: String,
    user: AccountPayload,
    #[serde(default)]
    labels: Vec<LabelPayload>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct IssueQuery {
    state: StateFilter,
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

impl From<AccountPayload> for Account {
    fn from(payload: AccountPayload) -> Self {
        Account {
            login: payload.login,
            avatar_url: payload.avatar_url,
        }
    }
}

impl From<RepoPayload> for RepositorySummary {
    fn from(payload: RepoPayload) -> Self {
        RepositorySummary {
            name: payload.name,
            full_name: payload.full_name,
            description: payload.description,
            url: payload.html_url,
            stars: payload.stargazers_count.unwrap_or(0),
            owner: payload.owner.into(),
        }
    }
}

impl From<IssuePayload> for IssueSummary {
    fn from(payload: IssuePayload) -> Self {
        IssueSummary {
            number: payload.number,
            title: payload.title,
            url: payload.html_url,
            author: payload.user.into(),
            labels: payload.labels.into_iter().map(|l| l.name).collect(),
            updated_at: payload.updated_at,
        }
    }
}

#[async_trait]
impl IssueSource for GitHub {
    async fn get_repository(&self, repo: &str) -> Result<RepositorySummary> {
        let route = format!("/repos/{}", repo);
        let payload: RepoPayload = self.client.get(route, None::<&()>).await?;
        Ok(payload.into())
    }

    async fn list_issues(
        &self,
        repo: &str,
        state: StateFilter,
        page: Option<u32>,
    ) -> Result<Vec<IssueSummary>> {
        tracing::debug!(repo, state = state.as_query_str(), ?page, "fetching issues");

        let route = format!("/repos/{}/issues", repo);
        let query = IssueQuery {
            state,
            per_page: PER_PAGE,
            page,
        };
        let payloads: Vec<IssuePayload> = self.client.get(route, Some(&query)).await?;

        Ok(payloads.into_iter().map(IssueSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_payload_maps_to_summary() {
        let payload: IssuePayload = serde_json::from_value(json!({
            "id": 2100000000_u64,
            "number": 7,
            "title": "Segfault on resize",
            "html_url": "https://github.com/owner/repo/issues/7",
            "user": { "login": "alice", "avatar_url": "https://avatars.example/alice" },
            "labels": [
                { "id": 1, "name": "bug" },
                { "id": 2, "name": "help wanted" }
            ],
            "updated_at": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        let issue = IssueSummary::from(payload);
        assert_eq!(issue.number, 7);
        assert_eq!(issue.title, "Segfault on resize");
        assert_eq!(issue.url, "https://github.com/owner/repo/issues/7");
        assert_eq!(issue.author.login, "alice");
        assert_eq!(
            issue.labels,
            vec!["bug".to_string(), "help wanted".to_string()]
        );
    }

    #[test]
    fn issue_payload_tolerates_missing_labels() {
        let payload: IssuePayload = serde_json::from_value(json!({
            "number": 1,
            "title": "No labels here",
            "html_url": "https://github.com/owner/repo/issues/1",
            "user": { "login": "bob", "avatar_url": "https://avatars.example/bob" },
            "updated_at": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        let issue = IssueSummary::from(payload);
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn repo_payload_maps_to_summary() {
        let payload: RepoPayload = serde_json::from_value(json!({
            "name": "react",
            "full_name": "facebook/react",
            "description": "The library for web and native user interfaces.",
            "html_url": "https://github.com/facebook/react",
            "stargazers_count": 230000,
            "owner": { "login": "facebook", "avatar_url": "https://avatars.example/facebook" }
        }))
        .unwrap();

        let repo = RepositorySummary::from(payload);
        assert_eq!(repo.name, "react");
        assert_eq!(repo.full_name, "facebook/react");
        assert_eq!(repo.stars, 230000);
        assert_eq!(repo.owner.login, "facebook");
    }

    #[test]
    fn repo_payload_tolerates_missing_optionals() {
        let payload: RepoPayload = serde_json::from_value(json!({
            "name": "scratch",
            "full_name": "alice/scratch",
            "description": null,
            "html_url": "https://github.com/alice/scratch",
            "stargazers_count": null,
            "owner": { "login": "alice", "avatar_url": "https://avatars.example/alice" }
        }))
        .unwrap();

        let repo = RepositorySummary::from(payload);
        assert!(repo.description.is_none());
        assert_eq!(repo.stars, 0);
    }

    #[test]
    fn issue_query_omits_page_when_unset() {
        let query = IssueQuery {
            state: StateFilter::Open,
            per_page: PER_PAGE,
            page: None,
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({ "state": "open", "per_page": 5 }));
    }

    #[test]
    fn issue_query_sends_explicit_page() {
        let query = IssueQuery {
            state: StateFilter::Closed,
            per_page: PER_PAGE,
            page: Some(3),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({ "state": "closed", "per_page": 5, "page": 3 })
        );
    }
}
