use crate::data::Dashboard;
use crate::services::DashboardReport;

/// Result of re-reading the snapshot in the background
pub enum ReloadResult {
    Success(Box<DashboardReport>),
    Error(String),
}

/// Command to be executed after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reload,
    OpenUrl(String),
}

/// All possible messages/events in the application
pub enum Message {
    // Navigation
    NextItem,
    PreviousItem,
    GoToTop,
    GoToBottom,

    // Tab switching
    SwitchTab(Dashboard),
    NextTab,
    PreviousTab,

    // Actions
    OpenSelected,
    Reload,

    // Search
    EnterSearchMode,
    ExitSearchMode { clear: bool },
    SearchInput(char),
    SearchBackspace,

    // Popups
    ToggleHelp,
    ToggleStatistics,
    ToggleDiagnostics,
    ToggleChecklist,
    DismissPopup,
    DismissError,
    ShowUrl(String),

    // Background results
    ReloadComplete(ReloadResult),

    // System
    Tick,
    Quit,
}
