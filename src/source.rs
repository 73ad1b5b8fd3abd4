use async_trait::async_trait;

use crate::error::Result;
use crate::types::{IssueSummary, RepositorySummary, StateFilter};

/// Remote backend the repository view fetches from.
///
/// `repo` is the slash-separated `owner/name` path segment. For
/// `list_issues`, `page: None` leaves the page parameter off the request
/// (server default, page 1); `Some(n)` sends it explicitly.
#[async_trait]
pub trait IssueSource: Send + Sync + std::fmt::Debug {
    async fn get_repository(&self, repo: &str) -> Result<RepositorySummary>;

    async fn list_issues(
        &self,
        repo: &str,
        state: StateFilter,
        page: Option<u32>,
    ) -> Result<Vec<IssueSummary>>;
}
