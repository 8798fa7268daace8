use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::data::PrStatus;
use crate::icons;
use crate::services::PrStatistics;

use super::colors::status_color;
use super::popups::centered_rect;

/// Cells of each row in a bar `width` cells wide, by largest remainder so
/// they always add up to the full width.
pub fn bar_segments(counts: &[usize], width: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let mut cells: Vec<usize> = counts.iter().map(|c| c * width / total).collect();
    let mut remainders: Vec<(usize, usize)> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| (c * width % total, i))
        .collect();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    let missing = width - cells.iter().sum::<usize>();
    for (_, i) in remainders.into_iter().take(missing) {
        cells[i] += 1;
    }
    cells
}

fn legend_line(stats: &PrStatistics, idx: usize) -> Line<'static> {
    let row = &stats.rows[idx];
    let angle = stats.chart_angles.get(idx).copied().unwrap_or(0);
    let mut spans = vec![
        Span::styled(
            format!("{} ", icons::LEGEND_SWATCH),
            Style::default().fg(status_color(row.status)),
        ),
        Span::styled(format!("{:>4}", row.count), Style::default().bold()),
        Span::raw(format!(" ({:>5.1}%) {}", row.percent, row.description)),
    ];
    if row.status == PrStatus::MergeConflict {
        spans.push(Span::raw(format!(
            "; {} would be on the queue otherwise",
            stats.just_merge_conflict
        )));
    }
    spans.push(Span::styled(
        format!("  ≤{angle}°"),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Render the statistics popup: legend, proportional bar and chart angles
pub fn render_statistics_popup(f: &mut Frame, stats: &PrStatistics) {
    let area = f.area();
    let popup_width = area.width.saturating_sub(4).min(100);
    let popup_height = (stats.rows.len() as u16 + 8).min(area.height);
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let bar_width = popup_width.saturating_sub(2) as usize;
    let counts: Vec<usize> = stats.rows.iter().map(|r| r.count).collect();
    let bar: Vec<Span> = bar_segments(&counts, bar_width)
        .into_iter()
        .zip(&stats.rows)
        .filter(|(cells, _)| *cells > 0)
        .map(|(cells, row)| {
            Span::styled(
                icons::BAR_BLOCK.repeat(cells),
                Style::default().fg(status_color(row.status)),
            )
        })
        .collect();

    let mut lines = vec![
        Line::from(format!(
            "There are currently {} open PRs, {} of which are drafts.",
            stats.total(),
            stats.draft
        )),
        Line::raw(""),
        Line::from(bar),
        Line::raw(""),
    ];
    lines.extend((0..stats.rows.len()).map(|idx| legend_line(stats, idx)));
    lines.push(Line::raw(""));
    lines.push(Line::from("Press any key to close").centered());

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, popup_area);
}
