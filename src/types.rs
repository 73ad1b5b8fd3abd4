use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::{ReposcopeError, Result};

/// Repository identifier in `owner/name` form, validated at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Parse an `owner/name` identifier. Both segments must be non-empty
    /// and the name must not contain further slashes.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let Some((owner, name)) = trimmed.split_once('/') else {
            return Err(ReposcopeError::InvalidRepo(input.to_string()));
        };
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(ReposcopeError::InvalidRepo(input.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Issue state filter. The set is fixed; there is no runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub const VALUES: [StateFilter; 3] = [StateFilter::Open, StateFilter::Closed, StateFilter::All];

    pub fn as_query_str(&self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StateFilter::Open => "Open",
            StateFilter::Closed => "Closed",
            StateFilter::All => "All",
        }
    }

    /// Next filter in display order, wrapping around.
    pub fn next(&self) -> StateFilter {
        match self {
            StateFilter::Open => StateFilter::Closed,
            StateFilter::Closed => StateFilter::All,
            StateFilter::All => StateFilter::Open,
        }
    }
}

/// Owner or author account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub login: String,
    #[allow(dead_code)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub owner: Account,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: Account,
    pub labels: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
