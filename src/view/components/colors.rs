use ratatui::style::{Color, Style};

use crate::data::{Label, PrStatus};
use crate::services::statistics::legend;

/// Parse a `#rrggbb` or `rrggbb` colour.
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Label chip style: the label's own background with readable text on top.
pub fn label_style(label: &Label) -> Style {
    let fg = if label.is_light() {
        Color::Black
    } else {
        Color::White
    };
    match label.rgb() {
        Some((r, g, b)) => Style::default().bg(Color::Rgb(r, g, b)).fg(fg),
        None => Style::default().fg(Color::Gray),
    }
}

/// Foreground colour of a status on a dark terminal.
pub fn status_color(status: PrStatus) -> Color {
    match legend(status).and_then(|(hex, _)| hex_color(hex)) {
        // black is unreadable on the usual dark background
        Some(Color::Rgb(0, 0, 0)) | None => Color::Gray,
        Some(color) => color,
    }
}
