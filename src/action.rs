use crate::route::Route;
use crate::types::{Filter, Issue, RepositorySummary};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    ScrollUp,
    ScrollDown,
    Select,

    // Navigation
    Navigate(Route),

    // Bookmark list
    InputChar(char),
    InputBackspace,
    Submit,
    RepoAdded(Box<RepositorySummary>),
    AddFailed(String),

    // Issue browser
    SetFilter(Filter),
    PrevPage,
    NextPage,
    Refresh,
    BrowserLoaded {
        repository: Box<RepositorySummary>,
        issues: Vec<Issue>,
        load_id: u64,
    },
    BrowserFailed {
        message: String,
        load_id: u64,
    },
    IssuesLoaded(Vec<Issue>, u64),
    IssuesFailed(String, u64),

    // Issue links
    OpenInBrowser,
    YankUrl,

    None,
}
