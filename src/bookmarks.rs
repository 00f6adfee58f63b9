use crate::error::{GhmarkError, Result};
use crate::gateway::{self, Gateway};
use crate::store::BookmarkStore;
use crate::types::{Bookmark, RepositorySummary};

/// Bookmark list screen state: the input field, the saved repositories and
/// the add-repository workflow.
pub struct BookmarkList {
    pub input: String,
    pub bookmarks: Vec<Bookmark>,
    pub submitting: bool,
    pub error: Option<String>,
    pub selected: usize,
    store: Box<dyn BookmarkStore>,
    saved: Vec<Bookmark>,
}

impl BookmarkList {
    pub fn new(store: Box<dyn BookmarkStore>) -> Self {
        let bookmarks = store.load();
        tracing::debug!(count = bookmarks.len(), "bookmarks loaded");

        Self {
            input: String::new(),
            saved: bookmarks.clone(),
            bookmarks,
            submitting: false,
            error: None,
            selected: 0,
            store,
        }
    }

    pub fn on_input_change(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn selected_bookmark(&self) -> Option<&Bookmark> {
        self.bookmarks.get(self.selected)
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.bookmarks.is_empty() && self.selected < self.bookmarks.len() - 1 {
            self.selected += 1;
        }
    }

    /// Start an add. Returns the name to look up, or None while another add
    /// is pending or the input is blank.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.submitting {
            return None;
        }
        let name = self.input.trim();
        if name.is_empty() {
            self.error = Some("Enter a repository as owner/repo".to_string());
            return None;
        }

        self.submitting = true;
        self.error = None;
        Some(name.to_string())
    }

    /// Record the canonical name returned by the API. Returns false when the
    /// repository was already bookmarked.
    pub fn submit_succeeded(&mut self, repo: &RepositorySummary) -> bool {
        self.submitting = false;
        self.input.clear();

        let exists = self
            .bookmarks
            .iter()
            .any(|b| b.name.eq_ignore_ascii_case(&repo.full_name));
        if exists {
            tracing::info!(name = %repo.full_name, "already bookmarked");
            self.error = Some(format!("{} is already bookmarked", repo.full_name));
            return false;
        }

        self.bookmarks.push(Bookmark::new(repo.full_name.clone()));
        self.selected = self.bookmarks.len() - 1;
        self.persist();
        true
    }

    pub fn submit_failed(&mut self, message: String) {
        tracing::warn!(input = %self.input, error = %message, "add repository failed");
        self.submitting = false;
        self.error = Some(message);
    }

    /// Look up the typed name and bookmark it.
    pub async fn submit(&mut self, gateway: &dyn Gateway) -> Result<bool> {
        let Some(name) = self.begin_submit() else {
            return Ok(false);
        };

        match gateway::fetch_repository(gateway, &name).await {
            Ok(repo) => Ok(self.submit_succeeded(&repo)),
            Err(e) => {
                self.submit_failed(add_failure_message(&name, &e));
                Err(e)
            }
        }
    }

    /// Write the list through to the store unless it matches what was last written.
    fn persist(&mut self) {
        if self.bookmarks == self.saved {
            return;
        }
        match self.store.save(&self.bookmarks) {
            Ok(()) => self.saved = self.bookmarks.clone(),
            Err(e) => {
                tracing::error!(error = %e, "failed to save bookmarks");
                self.error = Some(format!("Could not save bookmarks: {}", e));
            }
        }
    }
}

pub fn add_failure_message(name: &str, err: &GhmarkError) -> String {
    if err.is_not_found() {
        format!("Repository {} not found", name)
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::{repo_json, MockGateway};

    /// Counts saves on top of a MemoryStore.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: Arc<MemoryStore>,
        saves: Arc<AtomicUsize>,
    }

    impl BookmarkStore for CountingStore {
        fn load(&self) -> Vec<Bookmark> {
            self.inner.load()
        }

        fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(bookmarks)
        }
    }

    fn repo(full_name: &str) -> RepositorySummary {
        serde_json::from_value(repo_json(full_name)).unwrap()
    }

    #[test]
    fn loads_existing_bookmarks() {
        let store = MemoryStore::with_raw(r#"[{"name":"a/b"},{"name":"c/d"}]"#);
        let list = BookmarkList::new(Box::new(store));
        assert_eq!(
            list.bookmarks,
            vec![Bookmark::new("a/b"), Bookmark::new("c/d")]
        );
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let list = BookmarkList::new(Box::new(MemoryStore::with_raw("[{")));
        assert!(list.bookmarks.is_empty());
        assert!(list.error.is_none());
    }

    #[test]
    fn input_change_is_verbatim() {
        let mut list = BookmarkList::new(Box::new(MemoryStore::new()));
        list.on_input_change("  Weird Input ");
        assert_eq!(list.input, "  Weird Input ");
        list.backspace();
        list.push_char('!');
        assert_eq!(list.input, "  Weird Input!");
    }

    #[tokio::test]
    async fn submit_appends_canonical_name_and_clears_input() {
        let store = CountingStore::default();
        let mut list = BookmarkList::new(Box::new(store.clone()));
        let gateway = MockGateway::new().respond("/repos/Facebook/React", repo_json("facebook/react"));

        list.on_input_change("Facebook/React");
        assert!(list.submit(&gateway).await.unwrap());

        assert_eq!(list.bookmarks, vec![Bookmark::new("facebook/react")]);
        assert_eq!(list.input, "");
        assert!(!list.submitting);
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(store.load(), list.bookmarks);
    }

    #[tokio::test]
    async fn submit_failure_resets_pending_and_keeps_input() {
        let store = CountingStore::default();
        let mut list = BookmarkList::new(Box::new(store.clone()));
        let gateway = MockGateway::new();

        list.on_input_change("ghost/repo");
        let err = list.submit(&gateway).await.unwrap_err();

        assert!(matches!(err, GhmarkError::Api { status: 404, .. }));
        assert!(!list.submitting);
        assert_eq!(list.input, "ghost/repo");
        assert_eq!(list.error.as_deref(), Some("Repository ghost/repo not found"));
        assert!(list.bookmarks.is_empty());
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failure_message_reads_not_found_only_for_404() {
        let missing = GhmarkError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(add_failure_message("a/b", &missing), "Repository a/b not found");

        let down = GhmarkError::Transport("connection refused".to_string());
        assert_eq!(add_failure_message("a/b", &down), down.to_string());
    }

    #[test]
    fn duplicate_is_not_appended_or_saved() {
        let store = CountingStore::default();
        store.inner.save(&[Bookmark::new("facebook/react")]).unwrap();
        let mut list = BookmarkList::new(Box::new(store.clone()));

        list.on_input_change("facebook/react");
        assert!(list.begin_submit().is_some());
        assert!(!list.submit_succeeded(&repo("facebook/react")));

        assert_eq!(list.bookmarks.len(), 1);
        assert_eq!(list.input, "");
        assert!(list.error.is_some());
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_input_is_not_submitted() {
        let mut list = BookmarkList::new(Box::new(MemoryStore::new()));
        list.on_input_change("   ");
        assert_eq!(list.begin_submit(), None);
        assert!(!list.submitting);
        assert!(list.error.is_some());
    }

    #[test]
    fn second_submit_waits_for_first() {
        let mut list = BookmarkList::new(Box::new(MemoryStore::new()));
        list.on_input_change("a/b");
        assert_eq!(list.begin_submit().as_deref(), Some("a/b"));
        assert_eq!(list.begin_submit(), None);
        assert!(list.submitting);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut list = BookmarkList::new(Box::new(MemoryStore::new()));
        for name in ["z/z", "a/a", "m/m"] {
            list.on_input_change(name);
            list.begin_submit();
            list.submit_succeeded(&repo(name));
        }
        let names: Vec<&str> = list.bookmarks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["z/z", "a/a", "m/m"]);
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let store = MemoryStore::with_raw(r#"[{"name":"a/b"},{"name":"c/d"}]"#);
        let mut list = BookmarkList::new(Box::new(store));
        list.select_previous();
        assert_eq!(list.selected, 0);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, 1);
        assert_eq!(list.selected_bookmark(), Some(&Bookmark::new("c/d")));
    }
}
