use crate::types::{IssueSummary, RepositorySummary, StateFilter};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    CursorUp,
    CursorDown,
    GoToTop,
    GoToBottom,

    // Initial load: repository metadata + first page of open issues,
    // committed together.
    LoadView,
    ViewLoaded {
        repository: RepositorySummary,
        issues: Vec<IssueSummary>,
    },

    // Filter and pagination. IssuesLoaded carries the reload generation
    // that produced it; completions from superseded reloads are discarded.
    SetFilter(StateFilter),
    NextPage,
    PrevPage,
    IssuesLoaded(Vec<IssueSummary>, u64),

    // Polish
    Refresh,
    OpenInBrowser,
    YankUrl,

    Error(String),
    None,
}
