use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::icons;

use super::components::{
    render_board_header, render_checklist_popup, render_diagnostics_popup, render_error_popup,
    render_help_popup, render_legend, render_search_bar, render_statistics_popup, render_table,
    render_tabs, render_url_popup,
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let show_search = app.search_mode || !app.search_query.is_empty();
    let chunks = Layout::vertical([
        Constraint::Length(1), // Tabs
        Constraint::Length(1), // Board title
        Constraint::Length(1), // Separator
        Constraint::Min(0),    // Table
        Constraint::Length(u16::from(show_search)), // Search bar
        Constraint::Length(1), // Key legend
    ])
    .split(f.area());

    render_tabs(f, app, chunks[0]);
    render_board_header(f, app, chunks[1]);

    let separator = icons::SEPARATOR_CHAR.repeat(chunks[2].width as usize);
    f.render_widget(
        Paragraph::new(separator).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    render_table(f, app, chunks[3]);

    if show_search {
        render_search_bar(f, app, chunks[4]);
    }
    render_legend(f, chunks[5]);

    // Render popups (order matters for layering)
    if app.show_statistics_popup {
        render_statistics_popup(f, &app.report.statistics);
    }

    if app.show_diagnostics_popup {
        render_diagnostics_popup(f, &app.report.diagnostics);
    }

    if app.show_checklist_popup {
        if let (Some(pr), Some(checklist)) = (app.selected_pr(), app.selected_checklist()) {
            render_checklist_popup(f, pr, &checklist);
        }
    }

    if app.show_help_popup {
        render_help_popup(f);
    }

    if let Some(ref url) = app.show_url_popup {
        render_url_popup(f, url);
    }

    if app.show_error_popup {
        if let Some(ref error) = app.error {
            render_error_popup(f, error);
        }
    }
}
