use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issues fetched per page.
pub const PER_PAGE: u32 = 5;

/// A locally saved repository, identified by its `owner/repo` full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Issue state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    All,
    #[default]
    Open,
    Closed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Open, Filter::Closed];

    pub fn as_api_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Open => "open",
            Filter::Closed => "closed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "All"),
            Filter::Open => write!(f, "Open"),
            Filter::Closed => write!(f, "Closed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
    pub avatar_url: String,
}

/// The repository fields the browser header needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueUser {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
}

/// GitHub Issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[allow(dead_code)]
    pub id: u64,
    pub html_url: String,
    pub user: IssueUser,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
