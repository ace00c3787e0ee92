//! Screener Core
//!
//! Coordination layer for the stock screening dashboard. Rust owns all
//! state; the frontend renders snapshots and sends commands back.

pub mod commands;
mod config;
mod dashboard;
mod error;

pub use config::{Config, BASE_URL_ENV, TIMEOUT_ENV};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::CoreError;

// Re-export components
pub use screener_client::{
    FilterBackend, FilterError, FilterRun, FilterType, HttpFilterBackend, ResultSet, RunLedger,
    RunState, StockResult,
};
pub use screener_view::{
    render, ControlState, Element, ElementKind, FilterSection, Messages, ResultsContainer,
    SectionState, TabControl, TabController, TabError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. Later calls keep the first subscriber.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
