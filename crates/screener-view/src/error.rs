//! View error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Filter section not found: {0}")]
    SectionNotFound(String),

    #[error("Tab control not found: {0}")]
    ControlNotFound(String),

    #[error("Duplicate id: {0}")]
    Duplicate(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),
}
