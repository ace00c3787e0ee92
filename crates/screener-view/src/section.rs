//! Filter sections and the tab controls that select them

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::state::{ControlState, SectionState};
use crate::Result;

/// A panel grouping one filter's presentation, shown or hidden as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSection {
    /// Element id the markup addresses the panel by
    pub id: String,
    /// Human-readable heading
    pub label: String,
    pub state: SectionState,
}

impl FilterSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        let id = validate_id(id.into())?;

        Ok(Self {
            id,
            label: label.into(),
            state: SectionState::Hidden,
        })
    }

    pub fn show(&mut self) {
        if self.state != SectionState::Active {
            tracing::debug!(section = %self.id, from = %self.state, "Showing filter section");
            self.state = SectionState::Active;
        }
    }

    pub fn hide(&mut self) {
        self.state = SectionState::Hidden;
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// A clickable control selecting which filter section is visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabControl {
    pub id: String,
    /// Section this control usually opens
    pub section_id: String,
    pub label: String,
    pub state: ControlState,
}

impl TabControl {
    pub fn new(
        id: impl Into<String>,
        section_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self> {
        let id = validate_id(id.into())?;
        let section_id = validate_id(section_id.into())?;

        Ok(Self {
            id,
            section_id,
            label: label.into(),
            state: ControlState::Inactive,
        })
    }

    pub fn activate(&mut self) {
        self.state = ControlState::Active;
    }

    pub fn deactivate(&mut self) {
        self.state = ControlState::Inactive;
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

fn validate_id(id: String) -> Result<String> {
    if id.trim().is_empty() {
        return Err(TabError::InvalidId("id cannot be empty".to_string()));
    }
    Ok(id)
}
