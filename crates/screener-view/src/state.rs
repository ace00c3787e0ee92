//! Selection states
//!
//! ```text
//! FilterSection: Hidden <-> Active
//! TabControl:    Inactive <-> Active
//! ```
//!
//! Both are two-state toggles. The controller guarantees that exactly one
//! section and one control are `Active` at any time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionState {
    /// Section is visible
    Active,
    /// Section is not rendered
    #[default]
    Hidden,
}

impl SectionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SectionState::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionState::Active => "active",
            SectionState::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for SectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SectionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(SectionState::Active),
            "hidden" => Ok(SectionState::Hidden),
            _ => Err(format!("Unknown section state: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    /// Control is highlighted as the current tab
    Active,
    /// Default styling
    #[default]
    Inactive,
}

impl ControlState {
    pub fn is_active(&self) -> bool {
        matches!(self, ControlState::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlState::Active => "active",
            ControlState::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for ControlState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ControlState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ControlState::Active),
            "inactive" => Ok(ControlState::Inactive),
            _ => Err(format!("Unknown control state: {}", s)),
        }
    }
}
