use chrono::Utc;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::App;
use crate::types::{RepositorySummary, StateFilter};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(repository) = &app.repository else {
        let placeholder = Paragraph::new("Loading repository...")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_repository(frame, repository, chunks[0]);
    render_filter(frame, app, chunks[1]);
    render_issues(frame, app, chunks[2]);
    render_pagination(frame, app, chunks[3]);
}

fn render_repository(frame: &mut Frame, repository: &RepositorySummary, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", repository.full_name),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    let description = repository
        .description
        .as_deref()
        .unwrap_or("No description");

    let lines = vec![
        Line::from(vec![
            Span::styled(
                repository.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("★ {}", repository.stars),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(
                format!("@{}", repository.owner.login),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )]),
    ];

    let info = Paragraph::new(lines).block(block);
    frame.render_widget(info, area);
}

fn render_filter(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = StateFilter::VALUES
        .iter()
        .enumerate()
        .map(|(i, filter)| format!("[{}] {}", i + 1, filter.label()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Filter "))
        .select(match app.filter {
            StateFilter::Open => 0,
            StateFilter::Closed => 1,
            StateFilter::All => 2,
        })
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_issues(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Issues ({}) ", app.issues.len()));

    if app.issues.is_empty() && !app.loading {
        let empty = Paragraph::new("No issues found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 47; // #num(6) + space(1) + space(1) + labels(18) + space(1) + @author(16) + space(1) + age(3)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = app
        .issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            let is_selected = i == app.issue_index;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let title = truncate(&issue.title, flex);

            let labels = if issue.labels.is_empty() {
                String::new()
            } else {
                format!("[{}]", truncate(&issue.labels.join(", "), 15))
            };

            let author = truncate(&issue.author.login, 15);

            let age = format_age(issue.updated_at);

            let line = Line::from(vec![
                Span::styled(
                    format!("#{:<5}", issue.number),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(format!("{:<flex$}", title), style),
                Span::raw(" "),
                Span::styled(
                    format!("{:<18}", labels),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" "),
                Span::styled(format!("@{:<15}", author), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::styled(format!("{:>3}", age), Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !app.issues.is_empty() {
        state.select(Some(app.issue_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let prev_style = if app.prev_page_enabled() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("[h] prev", prev_style),
        Span::styled(
            format!("  Page {}  ", app.page),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("[l] next", Style::default().fg(Color::Gray)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
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

/// Truncate to at most `max` characters, appending "..." when cut. Counts
/// characters, not bytes; titles and labels are arbitrary UTF-8.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text_unchanged() {
        assert_eq!(truncate("bug", 15), "bug");
        assert_eq!(truncate("exactly fifteen", 15), "exactly fifteen");
    }

    #[test]
    fn truncate_cuts_long_ascii() {
        assert_eq!(truncate("a rather long issue title", 10), "a rathe...");
    }

    #[test]
    fn truncate_cuts_multibyte_on_character_boundaries() {
        let title = "修".repeat(40);
        let cut = truncate(&title, 28);
        assert_eq!(cut.chars().count(), 28);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncate_handles_multibyte_label_joins() {
        let joined = "xとても長い日本語のラベルの名前です";
        let cut = truncate(joined, 15);
        assert_eq!(cut.chars().count(), 15);
        assert!(cut.starts_with('x'));
        assert!(cut.ends_with("..."));
    }
}
