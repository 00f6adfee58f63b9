use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::route::Route;

use super::truncate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_input(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let list = &app.bookmarks;

    let (title, border) = if list.submitting {
        (" Adding... ".to_string(), Color::Yellow)
    } else if let Some(error) = &list.error {
        (format!(" {} ", error), Color::Red)
    } else {
        (" Add repository ".to_string(), Color::Cyan)
    };

    let content = if list.input.is_empty() && !list.submitting {
        Line::from(Span::styled(
            "owner/repo",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(list.input.as_str()),
            Span::styled("▏", Style::default().fg(Color::Gray)),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, Style::default().fg(border)))
            .border_style(Style::default().fg(border)),
    );

    frame.render_widget(input, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let list = &app.bookmarks;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Repositories ({}) ", list.bookmarks.len()));

    if list.bookmarks.is_empty() {
        let empty = Paragraph::new("No repositories yet - type owner/repo above and press Enter")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let name_width = w.saturating_sub(4).clamp(10, 50);

    let items: Vec<ListItem> = list
        .bookmarks
        .iter()
        .enumerate()
        .map(|(i, bookmark)| {
            let style = if i == list.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let route = Route::Repository(bookmark.name.clone());
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<name_width$}", truncate(&bookmark.name, name_width)),
                    style,
                ),
                Span::raw("  "),
                Span::styled(route.path(), Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(list.selected));

    frame.render_stateful_widget(list_widget, area, &mut state);
}
