use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{PrMetrics, PullRequest};
use crate::icons;
use crate::utils::format_relative;

use super::colors::{label_style, status_color};
use super::popups::truncate_string;

fn label_line(pr: &PullRequest) -> Line<'static> {
    let mut spans = Vec::with_capacity(pr.labels.len() * 2);
    for label in &pr.labels {
        spans.push(Span::styled(format!(" {} ", label.name), label_style(label)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// `+a/-d`, `files` and `comments` cells; missing metrics show as -1.
fn metrics_cells(metrics: PrMetrics) -> [Cell<'static>; 3] {
    let style = if metrics.is_missing() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    [
        Cell::from(Line::from(vec![
            Span::styled(format!("+{}", metrics.additions), Style::default().fg(Color::Green)),
            Span::raw("/"),
            Span::styled(format!("-{}", metrics.deletions), Style::default().fg(Color::Red)),
        ]))
        .style(style),
        Cell::from(metrics.changed_files.to_string()).style(style),
        Cell::from(metrics.total_comments().to_string()).style(style),
    ]
}

/// Render the PR table of the active board
pub fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let visible_prs = app.visible_prs();

    if app.current_prs().is_empty() {
        let notice = format!("There are currently no {}.", app.dashboard.short_description());
        f.render_widget(
            Paragraph::new(notice).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let header_style = Style::default().fg(Color::Yellow).bold();
    let header = Row::new(
        [
            "PR#", "Author", "Title", "Labels", "Status", "CI", "+/-", "Files", "Comments",
            "Updated",
        ]
        .map(|title| Cell::from(title).style(header_style)),
    )
    .height(1)
    .bottom_margin(1);

    let now = app.report.generated_at;
    let rows: Vec<Row> = visible_prs
        .iter()
        .map(|pr| {
            let status = app.status_of(pr);
            let (ci_text, ci_color) = pr.ci_status.display();
            let [changes, files, comments] = metrics_cells(app.metrics_of(pr));
            Row::new(vec![
                Cell::from(format!("#{}", pr.number)),
                Cell::from(truncate_string(&pr.author.login, 15))
                    .style(Style::default().fg(Color::Magenta)),
                Cell::from(truncate_string(&pr.title, 50)),
                Cell::from(label_line(pr)),
                Cell::from(status.name()).style(Style::default().fg(status_color(status))),
                Cell::from(ci_text).style(Style::default().fg(ci_color)),
                changes,
                files,
                comments,
                Cell::from(format_relative(pr.updated_at, now))
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Min(30),
        Constraint::Length(30),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(icons::SELECTOR);

    f.render_stateful_widget(table, area, &mut app.table_state.clone());
}
