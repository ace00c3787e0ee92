//! Filter run record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::FilterType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Request in flight, loading indicator shown
    Loading,
    /// Results rendered
    Completed,
    /// Backend call failed; the error message is rendered unless the
    /// body was malformed
    Failed,
    /// A newer run started before this one resolved; nothing rendered
    Superseded,
    /// Caller stopped waiting before the backend answered
    Cancelled,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Loading => "loading",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
            RunState::Superseded => "superseded",
            RunState::Cancelled => "cancelled",
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, RunState::Loading)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loading" => Ok(RunState::Loading),
            "completed" => Ok(RunState::Completed),
            "failed" => Ok(RunState::Failed),
            "superseded" => Ok(RunState::Superseded),
            "cancelled" => Ok(RunState::Cancelled),
            _ => Err(format!("Unknown run state: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRun {
    pub id: String,
    pub filter: FilterType,
    /// Position in invocation order; higher is newer
    pub generation: u64,
    pub state: RunState,
    /// Number of stocks rendered, once completed
    pub result_count: Option<usize>,
    /// Logged failure reason, never shown to the user
    pub failure: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl FilterRun {
    pub fn new(filter: FilterType, generation: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filter,
            generation,
            state: RunState::Loading,
            result_count: None,
            failure: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Wall time from start to finish, if finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    pub(crate) fn finish(&mut self, state: RunState) {
        self.state = state;
        self.finished_at = Some(Utc::now());
    }
}
