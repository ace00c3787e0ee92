//! Screener View State
//!
//! The dashboard's visible state, owned by Rust and projected by whatever
//! paints it:
//! - Filter sections and tab controls, exactly one of each active
//! - The results container and the elements rendered into it

mod controller;
mod error;
mod messages;
mod render;
mod section;
mod state;

pub use controller::TabController;
pub use error::TabError;
pub use messages::Messages;
pub use render::{render, Element, ElementKind, ResultsContainer};
pub use section::{FilterSection, TabControl};
pub use state::{ControlState, SectionState};

pub type Result<T> = std::result::Result<T, TabError>;
