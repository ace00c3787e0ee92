//! Screener Filter Client
//!
//! Talks to the screening backend's filter endpoint:
//! - `GET /api/filter?type=<filter>` returning a JSON array of tickers
//! - Any non-2xx status is a failure, whatever the body says
//! - Every invocation is tracked as a run with a generation number, so
//!   a response that arrives after a newer run started can be dropped

mod backend;
mod error;
mod filter;
mod ledger;
mod run;

pub use backend::{FilterBackend, HttpFilterBackend, FILTER_PATH};
pub use error::FilterError;
pub use filter::{FilterType, ResultSet, StockResult};
pub use ledger::RunLedger;
pub use run::{FilterRun, RunState};

pub type Result<T> = std::result::Result<T, FilterError>;
