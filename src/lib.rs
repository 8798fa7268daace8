pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod icons;
pub mod services;
pub mod utils;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{update, App, Command, Message, ReloadResult, Reloader};
pub use config::DashboardConfig;
pub use data::{Dashboard, PrStatus, PullRequest};
pub use error::{Error, Result};
pub use services::{DashboardReport, Diagnostic, Snapshot, SnapshotPaths};
pub use view::ui;
