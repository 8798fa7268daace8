use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::data::PullRequest;
use crate::icons;
use crate::services::{Diagnostic, QueueChecklist};

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("/    ", "Fuzzy search"),
    ("Tab  ", "Next board"),
    ("S-Tab", "Previous board"),
    ("1-9  ", "Jump to board"),
    ("j/↓  ", "Move down"),
    ("k/↑  ", "Move up"),
    ("g/G  ", "Go to top/bottom"),
    ("o/⏎  ", "Open PR in browser"),
    ("c    ", "Why is this PR (not) on the queue?"),
    ("s    ", "Statistics"),
    ("d    ", "Diagnostics"),
    ("r    ", "Reload snapshot"),
    ("q    ", "Quit"),
];

fn popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(color).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Render the help popup
pub fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(48, KEY_BINDINGS.len() as u16 + 4, area);

    f.render_widget(Clear, popup_area);

    let mut help_lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key} "), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::raw(""));
    help_lines.push(Line::from("Press any key to close").centered());

    f.render_widget(
        Paragraph::new(help_lines).block(popup_block(" Help ", Color::Cyan)),
        popup_area,
    );
}

/// Render the error popup
pub fn render_error_popup(f: &mut Frame, error: &str) {
    let area = f.area();
    let popup_width = (area.width * 60 / 100).max(40).min(area.width.saturating_sub(4));
    let popup_height = 7u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .style(Style::default().fg(Color::White))
        .block(popup_block(" Error ", Color::Red))
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height,
        width: popup_area.width,
        height: 1,
    };

    if hint_area.y < area.height {
        let hint = Line::from(vec![
            Span::raw("Press "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to dismiss"),
        ])
        .centered();
        f.render_widget(hint, hint_area);
    }
}

/// Render the URL of a PR that could not be opened in a browser
pub fn render_url_popup(f: &mut Frame, url: &str) {
    let area = f.area();
    let popup_width = (url.chars().count() as u16 + 4)
        .max(40)
        .min(area.width.saturating_sub(4));
    let popup_area = centered_rect(popup_width, 6, area);

    f.render_widget(Clear, popup_area);

    let content = vec![
        Line::from("Could not open a browser. The PR is at:"),
        Line::raw(""),
        Line::styled(url, Style::default().fg(Color::Cyan)),
    ];
    f.render_widget(
        Paragraph::new(content)
            .block(popup_block(" Open PR ", Color::Yellow))
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

/// Render the diagnostics collected while computing the dashboard
pub fn render_diagnostics_popup(f: &mut Frame, diagnostics: &[Diagnostic]) {
    let area = f.area();
    let popup_width = area.width.saturating_sub(4).min(100);
    let popup_height = (diagnostics.len() as u16 + 4).clamp(6, area.height);
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = if diagnostics.is_empty() {
        vec![Line::styled(
            "No problems found in the snapshot.",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        diagnostics
            .iter()
            .map(|d| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", icons::WARNING),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(d.to_string()),
                ])
            })
            .collect()
    };
    lines.push(Line::raw(""));
    lines.push(Line::from("Press any key to close").centered());

    f.render_widget(
        Paragraph::new(lines)
            .block(popup_block(" Diagnostics ", Color::Yellow))
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

/// Render the queue checklist of one PR
pub fn render_checklist_popup(f: &mut Frame, pr: &PullRequest, checklist: &QueueChecklist) {
    let area = f.area();
    let items = checklist.items();
    let popup_area = centered_rect(64, items.len() as u16 + 7, area);

    f.render_widget(Clear, popup_area);

    let verdict = if checklist.on_queue() {
        Line::styled("This PR is on the review queue.", Style::default().fg(Color::Green))
    } else {
        Line::styled(
            "This PR is not on the review queue.",
            Style::default().fg(Color::Red),
        )
    };

    let mut lines = vec![
        Line::from(truncate_string(&pr.title, 60)).bold(),
        Line::raw(""),
    ];
    lines.extend(items.iter().map(|(description, passed)| {
        let (mark, color) = if *passed {
            (icons::CHECK_PASSED, Color::Green)
        } else {
            (icons::CHECK_FAILED, Color::Red)
        };
        Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::raw(*description),
        ])
    }));
    lines.push(Line::raw(""));
    lines.push(verdict);

    let title = format!(" #{} ", pr.number);
    f.render_widget(
        Paragraph::new(lines).block(popup_block(&title, Color::Cyan)),
        popup_area,
    );
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);

    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Truncate a string to at most `max_len` characters, with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Render the bottom legend with keyboard shortcuts
pub fn render_legend(f: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (key, action) in [
        ("j/k", "nav"),
        ("tab", "board"),
        ("o", "open"),
        ("c", "checklist"),
        ("/", "search"),
        ("s", "stats"),
        ("d", "diagnostics"),
        ("r", "reload"),
        ("?", "help"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {action}  ")));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_string("ééééé", 3), "éé…");
    }
}
