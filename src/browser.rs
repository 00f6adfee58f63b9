//! Per-repository issue browsing: metadata header, state filter and
//! fixed-size pagination.
//!
//! Every fetch gets a `load_id` from a process-wide counter. Results carry the
//! id back and are applied only if it is still the browser's latest, so a slow
//! response can never overwrite a newer one, including responses addressed to
//! a browser that has since been replaced.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::gateway::{self, Gateway};
use crate::types::{Filter, Issue, RepositorySummary};

static NEXT_LOAD_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// An issues fetch the caller should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    pub filter: Filter,
    pub page: u32,
    pub load_id: u64,
}

#[derive(Debug)]
pub struct IssueBrowser {
    pub repo_name: String,
    pub status: Status,
    pub repository: Option<RepositorySummary>,
    pub filter: Filter,
    pub page: u32,
    pub issues: Vec<Issue>,
    pub issue_index: usize,
    /// Filter or page fetch in flight.
    pub pending: Option<IssueQuery>,
    /// Non-fatal failure of the last filter/page fetch.
    pub notice: Option<String>,
    /// (filter, page) the current `issues` were fetched with.
    shown: (Filter, u32),
    load_id: u64,
}

impl IssueBrowser {
    pub fn new(repo_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            status: Status::Idle,
            repository: None,
            filter: Filter::Open,
            page: 1,
            issues: Vec::new(),
            issue_index: 0,
            pending: None,
            notice: None,
            shown: (Filter::Open, 1),
            load_id: 0,
        }
    }

    fn next_load_id(&mut self) -> u64 {
        self.load_id = NEXT_LOAD_ID.fetch_add(1, Ordering::Relaxed);
        self.load_id
    }

    pub fn is_current(&self, load_id: u64) -> bool {
        load_id == self.load_id
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading || self.pending.is_some()
    }

    /// Enter Loading for the joined metadata + first page fetch.
    pub fn mount(&mut self) -> u64 {
        self.status = Status::Loading;
        self.filter = Filter::Open;
        self.page = 1;
        self.pending = None;
        self.notice = None;
        let load_id = self.next_load_id();
        tracing::debug!(repo = %self.repo_name, load_id, "mounting issue browser");
        load_id
    }

    pub fn mount_loaded(
        &mut self,
        repository: RepositorySummary,
        issues: Vec<Issue>,
        load_id: u64,
    ) -> bool {
        if !self.is_current(load_id) {
            tracing::debug!(load_id, latest = self.load_id, "dropping stale mount result");
            return false;
        }
        self.repository = Some(repository);
        self.show(issues, Filter::Open, 1);
        self.status = Status::Ready;
        true
    }

    pub fn mount_failed(&mut self, message: String, load_id: u64) -> bool {
        if !self.is_current(load_id) {
            return false;
        }
        tracing::warn!(repo = %self.repo_name, error = %message, "issue browser failed to load");
        self.status = Status::Failed(message);
        true
    }

    /// Refetch page 1 with `filter`. Metadata is kept.
    pub fn select_filter(&mut self, filter: Filter) -> Option<IssueQuery> {
        if self.status != Status::Ready {
            return None;
        }
        self.filter = filter;
        self.page = 1;
        Some(self.request())
    }

    pub fn can_go_previous(&self) -> bool {
        self.status == Status::Ready && self.page > 1
    }

    /// An empty page means there is nothing after it.
    pub fn can_go_next(&self) -> bool {
        self.status == Status::Ready && !self.issues.is_empty()
    }

    pub fn previous_page(&mut self) -> Option<IssueQuery> {
        if !self.can_go_previous() {
            return None;
        }
        self.page -= 1;
        Some(self.request())
    }

    pub fn next_page(&mut self) -> Option<IssueQuery> {
        if !self.can_go_next() {
            return None;
        }
        self.page += 1;
        Some(self.request())
    }

    fn request(&mut self) -> IssueQuery {
        let query = IssueQuery {
            filter: self.filter,
            page: self.page,
            load_id: self.next_load_id(),
        };
        self.pending = Some(query);
        self.notice = None;
        tracing::debug!(
            repo = %self.repo_name,
            filter = %query.filter,
            page = query.page,
            load_id = query.load_id,
            "requesting issues"
        );
        query
    }

    pub fn issues_loaded(&mut self, issues: Vec<Issue>, load_id: u64) -> bool {
        let Some(query) = self.pending.filter(|q| q.load_id == load_id) else {
            tracing::debug!(load_id, latest = self.load_id, "dropping stale issues result");
            return false;
        };
        self.pending = None;
        self.show(issues, query.filter, query.page);
        true
    }

    /// Keep the issues on screen and return to the (filter, page) they came from.
    pub fn issues_failed(&mut self, message: String, load_id: u64) -> bool {
        if self.pending.map(|q| q.load_id) != Some(load_id) {
            return false;
        }
        tracing::warn!(repo = %self.repo_name, error = %message, "issue fetch failed");
        self.pending = None;
        (self.filter, self.page) = self.shown;
        self.notice = Some(message);
        true
    }

    fn show(&mut self, issues: Vec<Issue>, filter: Filter, page: u32) {
        self.issues = issues;
        self.filter = filter;
        self.page = page;
        self.shown = (filter, page);
        self.issue_index = 0;
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issues.get(self.issue_index)
    }

    pub fn select_previous(&mut self) {
        self.issue_index = self.issue_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.issues.is_empty() && self.issue_index < self.issues.len() - 1 {
            self.issue_index += 1;
        }
    }
}

/// Fetch repository metadata and the first page of open issues together.
/// Both requests always run to completion; the first error wins.
pub async fn load_repository(
    gateway: &dyn Gateway,
    name: &str,
) -> Result<(RepositorySummary, Vec<Issue>)> {
    let (repository, issues) = tokio::join!(
        gateway::fetch_repository(gateway, name),
        gateway::fetch_issues(gateway, name, Filter::Open, 1)
    );
    Ok((repository?, issues?))
}

pub async fn load_issues(
    gateway: &dyn Gateway,
    name: &str,
    query: IssueQuery,
) -> Result<Vec<Issue>> {
    gateway::fetch_issues(gateway, name, query.filter, query.page).await
}
