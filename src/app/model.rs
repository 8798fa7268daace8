use ratatui::widgets::TableState;
use std::time::{Duration, Instant};

use crate::config::DashboardConfig;
use crate::data::{Dashboard, PrMetrics, PrStatus, PullRequest};
use crate::icons::SPINNER_FRAMES;
use crate::services::{filter_prs, DashboardReport, QueueChecklist};

pub struct App {
    // Data state
    pub report: DashboardReport,
    pub config: DashboardConfig,

    // View state
    pub dashboard: Dashboard,
    pub table_state: TableState,
    pub filtered_indices: Vec<usize>,

    // Search state
    pub search_mode: bool,
    pub search_query: String,

    // Loading state
    pub loading: bool,

    // Popup state
    pub show_help_popup: bool,
    pub show_statistics_popup: bool,
    pub show_diagnostics_popup: bool,
    pub show_checklist_popup: bool,
    pub show_error_popup: bool,
    /// URL that could not be opened in a browser, shown for copying.
    pub show_url_popup: Option<String>,

    // Error state
    pub error: Option<String>,

    // Spinner state
    pub spinner_idx: usize,
    pub last_spinner_update: Instant,
}

impl App {
    pub fn new(report: DashboardReport, config: DashboardConfig) -> Self {
        let mut app = Self {
            report,
            config,
            dashboard: Dashboard::Queue,
            table_state: TableState::default(),
            filtered_indices: Vec::new(),
            search_mode: false,
            search_query: String::new(),
            loading: false,
            show_help_popup: false,
            show_statistics_popup: false,
            show_diagnostics_popup: false,
            show_checklist_popup: false,
            show_error_popup: false,
            show_url_popup: None,
            error: None,
            spinner_idx: 0,
            last_spinner_update: Instant::now(),
        };
        app.refilter();
        app
    }

    // Getters

    pub fn current_prs(&self) -> &[PullRequest] {
        self.report.boards.get(self.dashboard)
    }

    pub fn visible_prs(&self) -> Vec<&PullRequest> {
        let prs = self.current_prs();
        self.filtered_indices
            .iter()
            .filter_map(|&idx| prs.get(idx))
            .collect()
    }

    pub fn selected_pr(&self) -> Option<&PullRequest> {
        let prs = self.current_prs();
        self.table_state
            .selected()
            .and_then(|sel| self.filtered_indices.get(sel))
            .and_then(|&idx| prs.get(idx))
    }

    pub fn status_of(&self, pr: &PullRequest) -> PrStatus {
        self.report.status_of(pr)
    }

    pub fn metrics_of(&self, pr: &PullRequest) -> PrMetrics {
        self.report.metrics_of(pr.number)
    }

    pub fn selected_checklist(&self) -> Option<QueueChecklist> {
        self.selected_pr()
            .map(|pr| QueueChecklist::for_pr(pr, &self.config))
    }

    pub fn tab_index(&self) -> usize {
        Dashboard::ALL
            .iter()
            .position(|d| *d == self.dashboard)
            .unwrap_or(0)
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_idx]
    }

    pub fn update_spinner(&mut self) {
        if self.last_spinner_update.elapsed() >= Duration::from_millis(80) {
            self.spinner_idx = (self.spinner_idx + 1) % SPINNER_FRAMES.len();
            self.last_spinner_update = Instant::now();
        }
    }

    /// Recompute the visible rows from the search query and reset the selection.
    pub fn refilter(&mut self) {
        let report = &self.report;
        self.filtered_indices = filter_prs(self.current_prs(), &self.search_query, |pr| {
            report.status_of(pr)
        });
        self.table_state = TableState::default();
        if !self.filtered_indices.is_empty() {
            self.table_state.select(Some(0));
        }
    }
}
