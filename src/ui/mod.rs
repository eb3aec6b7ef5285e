//! Derived views over the task collection and their HTML rendering.
//!
//! - `model`: filter, search, days-left and status classification
//! - `summary`: stats, timeline and chart aggregates
//! - `view`: the bundled dashboard projection
//! - `editor`: the single-record edit session
//! - `chart`: chart specs and their create/destroy lifecycle
//! - `render`: HTML markup

pub mod chart;
pub mod editor;
pub mod model;
pub mod render;
pub mod summary;
pub mod view;

pub use editor::EditSession;
pub use model::{Filter, TaskStatus, ViewQuery};
pub use view::{DashboardView, TaskCard};

/// Current local calendar day; every days-left computation is relative to it.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
