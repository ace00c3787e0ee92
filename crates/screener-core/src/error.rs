//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] screener_view::TabError),

    #[error("Filter error: {0}")]
    Filter(#[from] screener_client::FilterError),

    #[error("Configuration error: {0}")]
    Config(String),
}
