mod repo_view;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

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
    repo_view::render(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.repository {
        Some(repository) => format!("reposcope - {}", repository.full_name),
        None => format!("reposcope - {}", app.repo_id),
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
    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if app.loading {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = "Tab/1-3: filter | h/l: page | j/k/g/G: nav | o: open | y: yank | r: refresh | q: quit";
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    use crate::action::Action;
    use crate::error::Result;
    use crate::source::IssueSource;
    use crate::types::{Account, IssueSummary, RepoId, RepositorySummary, StateFilter};

    /// Rendering never fetches; the source only satisfies `App::new`.
    #[derive(Debug)]
    struct NoopSource;

    #[async_trait]
    impl IssueSource for NoopSource {
        async fn get_repository(&self, _repo: &str) -> Result<RepositorySummary> {
            unreachable!("render tests never fetch")
        }

        async fn list_issues(
            &self,
            _repo: &str,
            _state: StateFilter,
            _page: Option<u32>,
        ) -> Result<Vec<IssueSummary>> {
            unreachable!("render tests never fetch")
        }
    }

    fn account(login: &str) -> Account {
        Account {
            login: login.to_string(),
            avatar_url: format!("https://avatars.example/{}", login),
        }
    }

    fn mounted_app(issues: Vec<IssueSummary>) -> App {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let repo_id = RepoId::parse("owner/repo").unwrap();
        let mut app = App::new(repo_id, Arc::new(NoopSource), action_tx);
        app.update(Action::ViewLoaded {
            repository: RepositorySummary {
                name: "repo".to_string(),
                full_name: "owner/repo".to_string(),
                description: Some("a repository".to_string()),
                url: "https://github.com/owner/repo".to_string(),
                stars: 1,
                owner: account("owner"),
            },
            issues,
        });
        app
    }

    #[test]
    fn render_truncates_multibyte_titles_without_panicking() {
        let issue = IssueSummary {
            number: 1,
            title: "修".repeat(40),
            url: "https://github.com/owner/repo/issues/1".to_string(),
            author: account("alice"),
            labels: vec!["xとても長い日本語のラベルの名前です".to_string()],
            updated_at: Utc::now(),
        };
        let app = mounted_app(vec![issue]);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains('修'));
        assert!(text.contains("Page 1"));
    }
}
