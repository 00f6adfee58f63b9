use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::bookmarks::{self, BookmarkList};
use crate::browser::{self, IssueBrowser, IssueQuery};
use crate::event::Event;
use crate::gateway::{self, Gateway};
use crate::route::Route;
use crate::types::Filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Bookmarks,  // Saved repositories + add form
    Repository, // Issue browser for one repository
}

pub struct App {
    pub route: Route,
    pub bookmarks: BookmarkList,
    pub browser: Option<IssueBrowser>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub should_quit: bool,
    start: Route,
    gateway: Arc<dyn Gateway>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        bookmarks: BookmarkList,
        gateway: Arc<dyn Gateway>,
        start: Route,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            route: Route::Bookmarks,
            bookmarks,
            browser: None,
            error: None,
            message: None,
            should_quit: false,
            start,
            gateway,
            action_tx,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.route {
            Route::Bookmarks => Screen::Bookmarks,
            Route::Repository(_) => Screen::Repository,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.screen() {
            Screen::Bookmarks => self.bookmarks.submitting,
            Screen::Repository => self.browser.as_ref().is_some_and(IssueBrowser::is_loading),
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Navigate(self.start.clone()),
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        match self.screen() {
            Screen::Bookmarks => self.handle_bookmarks_key(key),
            Screen::Repository => handle_repository_key(key),
        }
    }

    /// Printable keys type into the add field; arrows move the selection.
    fn handle_bookmarks_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => {
                if self.bookmarks.input.trim().is_empty() {
                    Action::Select
                } else {
                    Action::Submit
                }
            }
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Backspace => Action::InputBackspace,
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                Action::InputChar(c)
            }
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if (self.error.is_some() || self.message.is_some())
            && !matches!(action, Action::Quit | Action::Back)
        {
            self.error = None;
            self.message = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => match self.screen() {
                Screen::Bookmarks => {
                    self.should_quit = true;
                }
                Screen::Repository => {
                    self.navigate(Route::Bookmarks);
                }
            },
            Action::ScrollUp => match self.screen() {
                Screen::Bookmarks => self.bookmarks.select_previous(),
                Screen::Repository => {
                    if let Some(browser) = self.browser.as_mut() {
                        browser.select_previous();
                    }
                }
            },
            Action::ScrollDown => match self.screen() {
                Screen::Bookmarks => self.bookmarks.select_next(),
                Screen::Repository => {
                    if let Some(browser) = self.browser.as_mut() {
                        browser.select_next();
                    }
                }
            },
            Action::Select => {
                if self.screen() == Screen::Bookmarks {
                    if let Some(bookmark) = self.bookmarks.selected_bookmark() {
                        let route = Route::Repository(bookmark.name.clone());
                        self.navigate(route);
                    }
                }
            }

            Action::Navigate(route) => self.navigate(route),

            // Bookmark list
            Action::InputChar(c) => self.bookmarks.push_char(c),
            Action::InputBackspace => self.bookmarks.backspace(),
            Action::Submit => {
                if let Some(name) = self.bookmarks.begin_submit() {
                    self.spawn_add_repository(name);
                }
            }
            Action::RepoAdded(repo) => {
                if self.bookmarks.submit_succeeded(&repo) {
                    self.message = Some(format!("Added {}", repo.full_name));
                }
            }
            Action::AddFailed(message) => self.bookmarks.submit_failed(message),

            // Issue browser
            Action::SetFilter(filter) => {
                let query = self.browser.as_mut().and_then(|b| b.select_filter(filter));
                self.spawn_query(query);
            }
            Action::PrevPage => {
                let query = self.browser.as_mut().and_then(IssueBrowser::previous_page);
                self.spawn_query(query);
            }
            Action::NextPage => {
                let query = self.browser.as_mut().and_then(IssueBrowser::next_page);
                self.spawn_query(query);
            }
            Action::Refresh => {
                if let Some(browser) = self.browser.as_mut() {
                    let load_id = browser.mount();
                    let name = browser.repo_name.clone();
                    self.spawn_load_repository(name, load_id);
                }
            }
            Action::BrowserLoaded {
                repository,
                issues,
                load_id,
            } => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.mount_loaded(*repository, issues, load_id);
                }
            }
            Action::BrowserFailed { message, load_id } => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.mount_failed(message, load_id);
                }
            }
            Action::IssuesLoaded(issues, load_id) => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.issues_loaded(issues, load_id);
                }
            }
            Action::IssuesFailed(message, load_id) => {
                if let Some(browser) = self.browser.as_mut() {
                    browser.issues_failed(message, load_id);
                }
            }

            Action::OpenInBrowser => {
                if let Some(url) = self.selected_issue_url() {
                    if let Err(e) = open::that(&url) {
                        self.error = Some(format!("Failed to open browser: {}", e));
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_issue_url() {
                    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone())) {
                        Ok(()) => self.message = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard error: {}", e)),
                    }
                }
            }

            Action::None => {}
        }
    }

    fn navigate(&mut self, route: Route) {
        tracing::info!(route = %route, "navigate");
        match &route {
            Route::Bookmarks => {
                self.browser = None;
            }
            Route::Repository(name) => {
                let mut browser = IssueBrowser::new(name.clone());
                let load_id = browser.mount();
                self.browser = Some(browser);
                self.spawn_load_repository(name.clone(), load_id);
            }
        }
        self.route = route;
    }

    fn selected_issue_url(&self) -> Option<String> {
        self.browser
            .as_ref()?
            .selected_issue()
            .map(|issue| issue.html_url.clone())
    }

    fn spawn_query(&self, query: Option<IssueQuery>) {
        if let (Some(query), Some(browser)) = (query, self.browser.as_ref()) {
            self.spawn_load_issues(browser.repo_name.clone(), query);
        }
    }

    fn spawn_add_repository(&self, name: String) {
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            match gateway::fetch_repository(gateway.as_ref(), &name).await {
                Ok(repo) => {
                    tx.send(Action::RepoAdded(Box::new(repo))).ok();
                }
                Err(e) => {
                    let message = bookmarks::add_failure_message(&name, &e);
                    tx.send(Action::AddFailed(message)).ok();
                }
            }
        });
    }

    fn spawn_load_repository(&self, name: String, load_id: u64) {
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            match browser::load_repository(gateway.as_ref(), &name).await {
                Ok((repository, issues)) => {
                    tx.send(Action::BrowserLoaded {
                        repository: Box::new(repository),
                        issues,
                        load_id,
                    })
                    .ok();
                }
                Err(e) => {
                    tx.send(Action::BrowserFailed {
                        message: e.to_string(),
                        load_id,
                    })
                    .ok();
                }
            }
        });
    }

    fn spawn_load_issues(&self, name: String, query: IssueQuery) {
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            match browser::load_issues(gateway.as_ref(), &name, query).await {
                Ok(issues) => {
                    tx.send(Action::IssuesLoaded(issues, query.load_id)).ok();
                }
                Err(e) => {
                    tx.send(Action::IssuesFailed(e.to_string(), query.load_id)).ok();
                }
            }
        });
    }
}

fn handle_repository_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Back,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
        KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
        KeyCode::Char('a') => Action::SetFilter(Filter::All),
        KeyCode::Char('o') => Action::SetFilter(Filter::Open),
        KeyCode::Char('c') => Action::SetFilter(Filter::Closed),
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('y') => Action::YankUrl,
        KeyCode::Enter => Action::OpenInBrowser,
        _ => Action::None,
    }
}
