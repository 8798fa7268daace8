use crate::data::Dashboard;

use super::message::{Command, Message, ReloadResult};
use super::model::App;

/// Update the application state based on a message.
/// Returns an optional command to be executed by the main loop.
pub fn update(app: &mut App, msg: Message) -> Option<Command> {
    match msg {
        // Navigation
        Message::NextItem => {
            next_item(app);
            None
        }
        Message::PreviousItem => {
            previous_item(app);
            None
        }
        Message::GoToTop => {
            if !app.filtered_indices.is_empty() {
                app.table_state.select(Some(0));
            }
            None
        }
        Message::GoToBottom => {
            if !app.filtered_indices.is_empty() {
                app.table_state.select(Some(app.filtered_indices.len() - 1));
            }
            None
        }

        // Tab switching
        Message::SwitchTab(dashboard) => {
            switch_dashboard(app, dashboard);
            None
        }
        Message::NextTab => {
            let next = (app.tab_index() + 1) % Dashboard::ALL.len();
            switch_dashboard(app, Dashboard::ALL[next]);
            None
        }
        Message::PreviousTab => {
            let len = Dashboard::ALL.len();
            let previous = (app.tab_index() + len - 1) % len;
            switch_dashboard(app, Dashboard::ALL[previous]);
            None
        }

        // Actions
        Message::OpenSelected => app
            .selected_pr()
            .map(|pr| Command::OpenUrl(pr.url.clone())),
        Message::Reload => {
            if app.loading {
                return None;
            }
            app.loading = true;
            app.error = None;
            app.show_error_popup = false;
            Some(Command::Reload)
        }

        // Search
        Message::EnterSearchMode => {
            app.search_mode = true;
            None
        }
        Message::ExitSearchMode { clear } => {
            app.search_mode = false;
            if clear {
                app.search_query.clear();
                app.refilter();
            }
            None
        }
        Message::SearchInput(c) => {
            app.search_query.push(c);
            app.refilter();
            None
        }
        Message::SearchBackspace => {
            app.search_query.pop();
            app.refilter();
            None
        }

        // Popups
        Message::ToggleHelp => {
            app.show_help_popup = !app.show_help_popup;
            None
        }
        Message::ToggleStatistics => {
            app.show_statistics_popup = !app.show_statistics_popup;
            None
        }
        Message::ToggleDiagnostics => {
            app.show_diagnostics_popup = !app.show_diagnostics_popup;
            None
        }
        Message::ToggleChecklist => {
            app.show_checklist_popup = !app.show_checklist_popup && app.selected_pr().is_some();
            None
        }
        Message::DismissPopup => {
            app.show_help_popup = false;
            app.show_statistics_popup = false;
            app.show_diagnostics_popup = false;
            app.show_checklist_popup = false;
            app.show_url_popup = None;
            None
        }
        Message::DismissError => {
            app.show_error_popup = false;
            None
        }
        Message::ShowUrl(url) => {
            app.show_url_popup = Some(url);
            None
        }

        // Background results
        Message::ReloadComplete(result) => {
            handle_reload_result(app, result);
            None
        }

        // System
        Message::Tick => {
            if app.loading {
                app.update_spinner();
            }
            None
        }
        Message::Quit => Some(Command::Quit),
    }
}

// Helper functions

fn next_item(app: &mut App) {
    if app.filtered_indices.is_empty() {
        return;
    }
    let i = match app.table_state.selected() {
        Some(i) if i + 1 < app.filtered_indices.len() => i + 1,
        Some(i) => i,
        None => 0,
    };
    app.table_state.select(Some(i));
}

fn previous_item(app: &mut App) {
    if app.filtered_indices.is_empty() {
        return;
    }
    let i = app.table_state.selected().map_or(0, |i| i.saturating_sub(1));
    app.table_state.select(Some(i));
}

fn switch_dashboard(app: &mut App, dashboard: Dashboard) {
    if app.dashboard != dashboard {
        app.dashboard = dashboard;
        // Clear search when switching tabs
        app.search_mode = false;
        app.search_query.clear();
        app.show_checklist_popup = false;
        app.refilter();
    }
}

fn handle_reload_result(app: &mut App, result: ReloadResult) {
    app.loading = false;
    match result {
        ReloadResult::Success(report) => {
            let selected = app.selected_pr().map(|pr| pr.number);
            app.report = *report;
            app.refilter();
            // Keep the cursor on the same PR if it is still listed
            if let Some(number) = selected {
                let pos = app.visible_prs().iter().position(|pr| pr.number == number);
                if pos.is_some() {
                    app.table_state.select(pos);
                }
            }
        }
        ReloadResult::Error(e) => {
            app.error = Some(e);
            app.show_error_popup = true;
        }
    }
}
