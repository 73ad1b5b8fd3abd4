use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::event::Event;
use crate::source::IssueSource;
use crate::types::{IssueSummary, RepoId, RepositorySummary, StateFilter};

pub struct App {
    // View state
    pub repository: Option<RepositorySummary>,
    pub issues: Vec<IssueSummary>,
    pub loading: bool,
    pub filter: StateFilter,
    pub page: u32,

    // UI state
    pub issue_index: usize,
    pub error: Option<String>,
    pub should_quit: bool,
    pub repo_id: RepoId,

    reload_seq: u64,
    source: Arc<dyn IssueSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        repo_id: RepoId,
        source: Arc<dyn IssueSource>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            repository: None,
            issues: Vec::new(),
            loading: false,
            filter: StateFilter::default(),
            page: 1,

            issue_index: 0,
            error: None,
            should_quit: false,
            repo_id,

            reload_seq: 0,
            source,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadView,
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::Char('g') => Action::GoToTop,
            KeyCode::Char('G') => Action::GoToBottom,
            KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
            KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
            KeyCode::Tab => Action::SetFilter(self.filter.next()),
            KeyCode::Char('1') => Action::SetFilter(StateFilter::Open),
            KeyCode::Char('2') => Action::SetFilter(StateFilter::Closed),
            KeyCode::Char('3') => Action::SetFilter(StateFilter::All),
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('o') | KeyCode::Enter => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            _ => Action::None,
        }
    }

    /// Whether the previous-page affordance is active. Pure function of
    /// state; the renderer dims the hint when this is false.
    pub fn prev_page_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn update(&mut self, action: Action) {
        if self.error.is_some() && !matches!(action, Action::Quit) {
            self.error = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::CursorUp => {
                if self.issue_index > 0 {
                    self.issue_index -= 1;
                }
            }
            Action::CursorDown => {
                if !self.issues.is_empty() && self.issue_index < self.issues.len() - 1 {
                    self.issue_index += 1;
                }
            }
            Action::GoToTop => {
                self.issue_index = 0;
            }
            Action::GoToBottom => {
                if !self.issues.is_empty() {
                    self.issue_index = self.issues.len() - 1;
                }
            }

            Action::LoadView => {
                self.loading = true;
                self.spawn_load_view();
            }
            Action::ViewLoaded { repository, issues } => {
                // A retried load can complete twice; only the first commit
                // counts.
                if self.repository.is_none() {
                    self.loading = false;
                    self.repository = Some(repository);
                    self.issues = issues;
                    self.issue_index = 0;
                }
            }

            // Filter and page transitions only exist on a mounted view;
            // keys pressed while the initial load is in flight are dropped.
            Action::SetFilter(filter) => {
                if self.repository.is_some() {
                    self.filter = filter;
                    self.page = 1;
                    self.spawn_reload_issues();
                }
            }
            Action::NextPage => {
                if self.repository.is_some() {
                    self.page += 1;
                    self.spawn_reload_issues();
                }
            }
            Action::PrevPage => {
                if self.repository.is_some() && self.page > 1 {
                    self.page -= 1;
                    self.spawn_reload_issues();
                }
            }
            Action::IssuesLoaded(issues, seq) => {
                if seq == self.reload_seq {
                    self.issues = issues;
                    self.issue_index = 0;
                } else {
                    tracing::debug!(seq, current = self.reload_seq, "discarding superseded reload");
                }
            }

            Action::Refresh => {
                if self.repository.is_some() {
                    self.spawn_reload_issues();
                } else {
                    // The initial load failed or is still in flight; run it
                    // again.
                    self.loading = true;
                    self.spawn_load_view();
                }
            }
            Action::OpenInBrowser => {
                if let Some(url) = self.selected_url() {
                    if let Err(e) = open::that_detached(url) {
                        self.error = Some(format!("Failed to open browser: {}", e));
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_url() {
                    let copied = arboard::Clipboard::new()
                        .and_then(|mut clipboard| clipboard.set_text(url));
                    if let Err(e) = copied {
                        self.error = Some(format!("Clipboard error: {}", e));
                    }
                }
            }

            Action::Error(msg) => {
                // `loading` is left as-is: a failed initial load keeps the
                // loading screen, with the failure shown in the status bar.
                self.error = Some(msg);
            }
            Action::None => {}
        }
    }

    /// URL of the selected issue, falling back to the repository page.
    fn selected_url(&self) -> Option<String> {
        self.issues
            .get(self.issue_index)
            .map(|issue| issue.url.clone())
            .or_else(|| self.repository.as_ref().map(|repo| repo.url.clone()))
    }

    fn spawn_load_view(&self) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let repo = self.repo_id.full_name();
        let filter = self.filter;
        tokio::spawn(async move {
            // Fetch metadata and the first page of issues in parallel;
            // commit only when both are in.
            let (repo_result, issues_result) = tokio::join!(
                source.get_repository(&repo),
                source.list_issues(&repo, filter, None)
            );

            match (repo_result, issues_result) {
                (Ok(repository), Ok(issues)) => {
                    tx.send(Action::ViewLoaded { repository, issues }).ok();
                }
                (Err(e), _) | (_, Err(e)) => {
                    tx.send(Action::Error(e.to_string())).ok();
                }
            }
        });
    }

    /// Issue a reload for the current `(filter, page)`. Every reload gets a
    /// fresh generation number; `update` discards completions from older
    /// generations, so rapid successive changes can never commit a stale
    /// result over a newer one.
    fn spawn_reload_issues(&mut self) {
        let Some(repository) = &self.repository else {
            return;
        };
        self.reload_seq += 1;
        let seq = self.reload_seq;
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let repo = repository.full_name.clone();
        let filter = self.filter;
        let page = self.page;
        tokio::spawn(async move {
            match source.list_issues(&repo, filter, Some(page)).await {
                Ok(issues) => {
                    tx.send(Action::IssuesLoaded(issues, seq)).ok();
                }
                Err(e) => {
                    tx.send(Action::Error(e.to_string())).ok();
                }
            }
        });
    }
}
