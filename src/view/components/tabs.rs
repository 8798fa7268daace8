use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    Frame,
};

use crate::app::App;
use crate::data::Dashboard;
use crate::icons;
use crate::utils::format_relative;

/// Render the tab bar: one tab per board, scrolled so the active one is visible
pub fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let current = app.tab_index();

    let loading_indicator = if app.loading {
        format!("{} ", app.spinner())
    } else {
        String::new()
    };
    let diagnostics = app.report.diagnostics.len();
    let mut right_spans = vec![Span::styled(
        loading_indicator,
        Style::default().fg(Color::Yellow),
    )];
    if diagnostics > 0 {
        right_spans.push(Span::styled(
            format!("{} {} ", icons::WARNING, diagnostics),
            Style::default().fg(Color::Yellow),
        ));
    }
    right_spans.push(Span::styled(
        format!(
            "computed {} ",
            format_relative(app.report.generated_at, Utc::now())
        ),
        Style::default().fg(Color::DarkGray),
    ));
    let right = Line::from(right_spans);

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);

    // Start a couple of tabs before the active one so its neighbours stay in sight
    let first = current.saturating_sub(2);
    let mut spans = Vec::new();
    if first > 0 {
        spans.push(Span::styled(
            icons::TAB_OVERFLOW_LEFT,
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (idx, kind) in Dashboard::ALL.iter().enumerate().skip(first) {
        let (id, _) = kind.id_title();
        let label = format!(" {} ({}) ", id, app.report.boards.len(*kind));
        let style = if idx == current {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }

    f.render_widget(Line::from(spans), chunks[0]);
    f.render_widget(right, chunks[1]);
}

/// Render the title and description of the active board
pub fn render_board_header(f: &mut Frame, app: &App, area: Rect) {
    let (_, title) = app.dashboard.id_title();
    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(Color::White).bold()),
        Span::styled(
            format!(": {}", app.dashboard.long_description()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(line, area);
}
