// Spinner animation frames (braille characters)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// CI Status display strings (icon + text)
pub const CI_PENDING_DISPLAY: &str = "● Pending";
pub const CI_SUCCESS_DISPLAY: &str = "✓ Passing";
pub const CI_FAILURE_DISPLAY: &str = "✗ Failing";

// Queue checklist marks
pub const CHECK_PASSED: &str = "✓";
pub const CHECK_FAILED: &str = "✗";

// Selection/Navigation indicators
pub const SELECTOR: &str = "▶ ";
pub const TAB_OVERFLOW_LEFT: &str = "‹ ";

// Cursor
pub const CURSOR: &str = "█";

// Statistics bar
pub const BAR_BLOCK: &str = "█";
pub const LEGEND_SWATCH: &str = "■";

// List/UI elements
pub const SEPARATOR_CHAR: &str = "─";
pub const WARNING: &str = "⚠";
