pub mod colors;
pub mod popups;
pub mod search;
pub mod statistics;
pub mod table;
pub mod tabs;

pub use popups::{
    centered_rect, render_checklist_popup, render_diagnostics_popup, render_error_popup,
    render_help_popup, render_legend, render_url_popup, truncate_string,
};
pub use search::render_search_bar;
pub use statistics::render_statistics_popup;
pub use table::render_table;
pub use tabs::{render_board_header, render_tabs};
