mod bookmarks;
mod issues;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.screen() {
        Screen::Bookmarks => bookmarks::render(frame, app, chunks[1]),
        Screen::Repository => issues::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen() {
        Screen::Bookmarks => "ghmark - Repositories".to_string(),
        Screen::Repository => match &app.browser {
            Some(browser) => format!("ghmark - {}", browser.repo_name),
            None => "ghmark - Repository".to_string(),
        },
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let notice = app
        .browser
        .as_ref()
        .and_then(|b| b.notice.as_deref())
        .filter(|_| app.screen() == Screen::Repository);

    let status = if let Some(error) = app.error.as_deref().or(notice) {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if app.is_loading() {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else if let Some(message) = &app.message {
        Line::from(vec![Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )])
    } else {
        let help = match app.screen() {
            Screen::Bookmarks => "type owner/repo + Enter: add | ↑/↓: nav | Enter: open | Esc: quit",
            Screen::Repository => {
                "a/o/c: filter | h/l: page | j/k: nav | Enter: open | y: yank | r: refresh | q: back"
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Cut `s` to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    use super::*;
    use crate::bookmarks::BookmarkList;
    use crate::route::Route;
    use crate::store::MemoryStore;
    use crate::testing::{issues_json, repo_json, MockGateway};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
        assert_eq!(truncate("日本語のテキスト", 5), "日本...");
    }

    #[test]
    fn bookmark_screen_lists_names() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = MemoryStore::with_raw(r#"[{"name":"rust-lang/rust"},{"name":"tokio-rs/tokio"}]"#);
        let app = App::new(
            BookmarkList::new(Box::new(store)),
            Arc::new(MockGateway::new()),
            Route::Bookmarks,
            tx,
        );

        let screen = draw(&app);
        assert!(screen.contains("ghmark - Repositories"));
        assert!(screen.contains("rust-lang/rust"));
        assert!(screen.contains("tokio-rs/tokio"));
    }

    #[tokio::test]
    async fn failed_browser_shows_message_and_way_back() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(
            BookmarkList::new(Box::new(MemoryStore::new())),
            Arc::new(MockGateway::new()),
            Route::Bookmarks,
            tx,
        );
        app.update(crate::action::Action::Navigate(Route::Repository(
            "ghost/none".to_string(),
        )));
        assert!(draw(&app).contains("Loading..."));

        let action = rx.recv().await.unwrap();
        app.update(action);

        let screen = draw(&app);
        assert!(screen.contains("Not Found"));
        assert!(screen.contains("go back to repositories"));
    }

    #[tokio::test]
    async fn issue_rows_show_author_and_avatar() {
        let gateway = MockGateway::new()
            .respond("/repos/o/r", repo_json("o/r"))
            .respond("/repos/o/r/issues?state=open&per_page=5&page=1", issues_json(1..=2));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(
            BookmarkList::new(Box::new(MemoryStore::new())),
            Arc::new(gateway),
            Route::Bookmarks,
            tx,
        );
        app.update(crate::action::Action::Navigate(Route::Repository("o/r".to_string())));
        let action = rx.recv().await.unwrap();
        app.update(action);

        let screen = draw(&app);
        assert!(screen.contains("@octocat"));
        assert!(screen.contains("https://avatars.example/octocat"));
        assert!(screen.contains("https://github.com/o/r/issues/1"));
    }
}
