use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Filter, Issue, RepositorySummary, PER_PAGE};

/// Read-only access to a REST API rooted at a fixed base URL.
#[async_trait]
pub trait Gateway: Send + Sync + std::fmt::Debug {
    /// GET `path` (relative to the base URL) with optional query pairs.
    /// Non-success statuses are returned as errors.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value>;
}

pub fn repository_path(name: &str) -> String {
    format!("/repos/{}", name)
}

pub fn issues_path(name: &str) -> String {
    format!("/repos/{}/issues", name)
}

pub fn issues_query(filter: Filter, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("state", filter.as_api_str().to_string()),
        ("per_page", PER_PAGE.to_string()),
        ("page", page.to_string()),
    ]
}

pub async fn fetch_repository(gateway: &dyn Gateway, name: &str) -> Result<RepositorySummary> {
    let value = gateway.get(&repository_path(name), &[]).await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn fetch_issues(
    gateway: &dyn Gateway,
    name: &str,
    filter: Filter,
    page: u32,
) -> Result<Vec<Issue>> {
    let value = gateway
        .get(&issues_path(name), &issues_query(filter, page))
        .await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{issue_json, repo_json, MockGateway};

    #[test]
    fn issues_query_uses_fixed_page_size() {
        assert_eq!(
            issues_query(Filter::Closed, 3),
            vec![
                ("state", "closed".to_string()),
                ("per_page", "5".to_string()),
                ("page", "3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_repository_hits_repo_path() {
        let gateway = MockGateway::new().respond("/repos/facebook/react", repo_json("facebook/react"));

        let repo = fetch_repository(&gateway, "facebook/react").await.unwrap();
        assert_eq!(repo.name, "react");
        assert_eq!(gateway.calls(), vec!["/repos/facebook/react".to_string()]);
    }

    #[tokio::test]
    async fn fetch_issues_sends_state_and_page() {
        let gateway = MockGateway::new().respond(
            "/repos/o/r/issues?state=all&per_page=5&page=2",
            serde_json::json!([issue_json(1), issue_json(2)]),
        );

        let issues = fetch_issues(&gateway, "o/r", Filter::All, 2).await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            gateway.calls(),
            vec!["/repos/o/r/issues?state=all&per_page=5&page=2".to_string()]
        );
    }

    #[tokio::test]
    async fn fetch_repository_propagates_failure() {
        let gateway = MockGateway::new();
        let err = fetch_repository(&gateway, "nobody/nothing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fetch_issues_rejects_wrong_shape() {
        let gateway = MockGateway::new().respond(
            "/repos/o/r/issues?state=open&per_page=5&page=1",
            serde_json::json!({ "message": "not a list" }),
        );
        let err = fetch_issues(&gateway, "o/r", Filter::Open, 1).await.unwrap_err();
        assert!(matches!(err, crate::error::GhmarkError::Decode(_)));
    }
}
