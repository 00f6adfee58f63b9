use chrono::Utc;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::browser::{IssueBrowser, Status};
use crate::types::{Filter, RepositorySummary};

use super::truncate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(browser) = &app.browser else {
        return;
    };

    match &browser.status {
        Status::Failed(message) => render_failed(frame, message, area),
        Status::Idle | Status::Loading => render_loading(frame, area),
        Status::Ready => render_ready(frame, browser, area),
    }
}

fn render_failed(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press q or Esc to go back to repositories",
            Style::default().fg(Color::Gray),
        )),
    ];

    let error = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Error "))
        .wrap(Wrap { trim: true });
    frame.render_widget(error, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(loading, area);
}

fn render_ready(frame: &mut Frame, browser: &IssueBrowser, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    if let Some(repo) = &browser.repository {
        render_owner(frame, repo, chunks[0]);
    }
    render_filters(frame, browser, chunks[1]);
    render_issues(frame, browser, chunks[2]);
    render_pagination(frame, browser, chunks[3]);
}

fn render_owner(frame: &mut Frame, repo: &RepositorySummary, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            repo.name.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(
            repo.description.as_deref().unwrap_or("No description"),
        )),
        Line::from(vec![
            Span::styled(
                format!("@{} ", repo.owner.login),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                repo.owner.avatar_url.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", repo.full_name)),
    );
    frame.render_widget(header, area);
}

fn render_filters(frame: &mut Frame, browser: &IssueBrowser, area: Rect) {
    let titles: Vec<String> = Filter::ALL
        .iter()
        .map(|f| {
            let key = f.as_api_str().chars().next().unwrap_or(' ').to_ascii_uppercase();
            format!("[{}] {}", key, f)
        })
        .collect();

    let selected = Filter::ALL
        .iter()
        .position(|f| *f == browser.filter)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Filter "))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_issues(frame: &mut Frame, browser: &IssueBrowser, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Issues - {} ", browser.filter));

    if browser.issues.is_empty() {
        let empty = Paragraph::new("No issues on this page")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 43; // #num(7) + space(1) + labels(18) + space(1) + @author(16)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = browser
        .issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            let style = if i == browser.issue_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let title = if issue.title.is_empty() {
                issue.html_url.as_str()
            } else {
                issue.title.as_str()
            };

            let labels = if issue.labels.is_empty() {
                String::new()
            } else {
                let joined: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
                format!("[{}]", truncate(&joined.join(", "), 16))
            };

            let age = issue.created_at.map(format_age).unwrap_or_default();

            let title_line = Line::from(vec![
                Span::styled(
                    format!("#{:<6}", issue.number),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(format!("{:<flex$}", truncate(title, flex)), style),
                Span::raw(" "),
                Span::styled(
                    format!("{:<18}", labels),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("@{:<15}", truncate(&issue.user.login, 15)),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            let url_line = Line::from(vec![
                Span::raw("        "),
                Span::styled(issue.html_url.as_str(), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(age, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(
                    issue.user.avatar_url.as_str(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(vec![title_line, url_line])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(browser.issue_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_pagination(frame: &mut Frame, browser: &IssueBrowser, area: Rect) {
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(
            "◀ prev (h)",
            if browser.can_go_previous() { enabled } else { disabled },
        ),
        Span::raw("   "),
        Span::styled(
            format!("Page {}", browser.page),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            "(l) next ▶",
            if browser.can_go_next() { enabled } else { disabled },
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn format_age(dt: chrono::DateTime<chrono::Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}
