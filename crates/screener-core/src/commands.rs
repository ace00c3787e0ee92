//! Frontend command surface
//!
//! Each command returns a `CommandResult` the frontend can deserialize
//! without knowing Rust error types. Recoverable filter failures are not
//! command failures: the snapshot already carries the error message.

use serde::{Deserialize, Serialize};

use screener_client::FilterRun;

use crate::dashboard::{Dashboard, DashboardSnapshot};

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> From<crate::Result<T>> for CommandResult<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

pub fn activate_tab(
    dashboard: &Dashboard,
    tab_id: String,
    control_id: String,
) -> CommandResult<DashboardSnapshot> {
    dashboard
        .activate_tab(&tab_id, &control_id)
        .map(|()| dashboard.snapshot())
        .into()
}

pub async fn run_filter(
    dashboard: &Dashboard,
    filter_type: String,
) -> CommandResult<DashboardSnapshot> {
    dashboard
        .run_filter(filter_type)
        .await
        .map(|_| dashboard.snapshot())
        .into()
}

pub fn get_snapshot(dashboard: &Dashboard) -> CommandResult<DashboardSnapshot> {
    CommandResult::ok(dashboard.snapshot())
}

pub fn list_runs(dashboard: &Dashboard) -> CommandResult<Vec<FilterRun>> {
    CommandResult::ok(dashboard.runs())
}
