use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{GhmarkError, Result};
use crate::gateway::Gateway;

/// Canned-response gateway that records every request as `path?query`.
/// Unknown requests answer 404.
#[derive(Debug, Default)]
pub struct MockGateway {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, request: &str, body: Value) -> Self {
        self.responses.insert(request.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let request = if query.is_empty() {
            path.to_string()
        } else {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}", path, pairs.join("&"))
        };
        self.calls.lock().unwrap().push(request.clone());

        self.responses
            .get(&request)
            .cloned()
            .ok_or(GhmarkError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
    }
}

pub fn repo_json(full_name: &str) -> Value {
    let (owner, name) = full_name.split_once('/').unwrap_or(("", full_name));
    json!({
        "full_name": full_name,
        "name": name,
        "description": format!("{} description", name),
        "owner": { "login": owner, "avatar_url": format!("https://avatars.example/{}", owner) }
    })
}

pub fn issue_json(id: u64) -> Value {
    json!({
        "id": id,
        "number": id,
        "title": format!("Issue {}", id),
        "html_url": format!("https://github.com/o/r/issues/{}", id),
        "user": { "login": "octocat", "avatar_url": "https://avatars.example/octocat" },
        "labels": [{ "id": id * 10, "name": "bug" }],
        "created_at": "2024-01-01T00:00:00Z"
    })
}

pub fn issues_json(ids: std::ops::RangeInclusive<u64>) -> Value {
    Value::Array(ids.map(issue_json).collect())
}
