//! Dashboard state container
//!
//! Owns the tab selection and the results container. Whatever paints the
//! dashboard reads snapshots from here and holds no state of its own.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use screener_client::{
    FilterBackend, FilterError, FilterRun, FilterType, HttpFilterBackend, ResultSet, RunLedger,
    RunState,
};
use screener_view::{render, Element, FilterSection, ResultsContainer, TabControl, TabController};

use crate::config::Config;
use crate::Result;

#[derive(Debug, Clone)]
struct ViewState {
    tabs: TabController,
    results: ResultsContainer,
}

/// Serializable view of everything the dashboard shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub sections: Vec<FilterSection>,
    pub controls: Vec<TabControl>,
    pub active_section: Option<String>,
    pub results: Vec<Element>,
    pub latest_run: Option<FilterRun>,
    pub taken_at: DateTime<Utc>,
}

/// Cancels its run if dropped while the backend call is still pending
struct PendingRun<'a> {
    ledger: &'a RunLedger,
    id: String,
    armed: bool,
}

impl<'a> PendingRun<'a> {
    fn new(ledger: &'a RunLedger, id: &str) -> Self {
        Self {
            ledger,
            id: id.to_string(),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingRun<'_> {
    fn drop(&mut self) {
        if self.armed {
            // Already evicted from history is fine
            let _ = self.ledger.cancel_run(&self.id);
        }
    }
}

pub struct Dashboard {
    config: Arc<Config>,
    backend: Arc<dyn FilterBackend>,
    view: Arc<RwLock<ViewState>>,
    ledger: RunLedger,
}

impl Dashboard {
    /// Dashboard talking to the HTTP filter endpoint at `config.base_url`
    pub fn new(config: Config) -> Result<Self> {
        let backend = HttpFilterBackend::new(
            &config.base_url,
            config.request_timeout(),
            &config.user_agent,
        )?;

        tracing::info!(base_url = %backend.base_url(), "Dashboard using HTTP filter backend");

        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn FilterBackend>) -> Result<Self> {
        let tabs = TabController::with_tabs(
            config
                .filters
                .iter()
                .map(|f| (f.as_str().to_string(), f.label().to_string())),
        )?;

        Ok(Self {
            config: Arc::new(config),
            backend,
            view: Arc::new(RwLock::new(ViewState {
                tabs,
                results: ResultsContainer::new(),
            })),
            ledger: RunLedger::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Show section `tab_id` and highlight `control_id`
    pub fn activate_tab(&self, tab_id: &str, control_id: &str) -> Result<()> {
        self.view.write().tabs.activate_tab(tab_id, control_id)?;
        Ok(())
    }

    /// Show the section belonging to `filter` through its own tab control
    pub fn select_filter(&self, filter: &FilterType) -> Result<()> {
        self.view.write().tabs.select_section(filter.as_str())?;
        Ok(())
    }

    /// Run a filter and render whatever comes back.
    ///
    /// The loading indicator is shown before the request goes out. Status
    /// and network failures render the error message and still return
    /// `Ok` with a failed run. A malformed body renders nothing and is
    /// returned as an error. If a newer run started while this one was
    /// waiting, its response is dropped and the run comes back superseded.
    /// Dropping the future before the backend answers marks the run
    /// cancelled.
    pub async fn run_filter(&self, filter: impl Into<FilterType>) -> Result<FilterRun> {
        let run = self.begin_run(filter.into());
        let pending = PendingRun::new(&self.ledger, &run.id);
        let outcome = self.backend.fetch(&run.filter).await;
        pending.disarm();
        self.finish_run(&run, outcome)
    }

    fn begin_run(&self, filter: FilterType) -> FilterRun {
        let mut view = self.view.write();
        let run = self.ledger.start_run(filter);
        view.results.show_loading(&self.config.messages);
        run
    }

    fn finish_run(
        &self,
        run: &FilterRun,
        outcome: screener_client::Result<ResultSet>,
    ) -> Result<FilterRun> {
        let mut view = self.view.write();

        if !self.ledger.is_current(run) {
            return match self.ledger.supersede_run(&run.id) {
                Ok(run) => Ok(run),
                // Evicted from history while waiting
                Err(FilterError::RunNotFound(_)) => {
                    let mut run = run.clone();
                    run.state = RunState::Superseded;
                    run.finished_at = Some(Utc::now());
                    Ok(run)
                }
                Err(err) => Err(err.into()),
            };
        }

        match outcome {
            Ok(results) => {
                render(&mut view.results, &results, &self.config.messages);
                Ok(self.ledger.complete_run(&run.id, results.len())?)
            }
            Err(err) if err.is_recoverable() => {
                view.results.show_error(&self.config.messages);
                Ok(self.ledger.fail_run(&run.id, &err.to_string())?)
            }
            Err(err) => {
                tracing::error!(
                    run_id = %run.id,
                    filter = %run.filter,
                    error = %err,
                    "Unusable response from filter backend"
                );
                self.ledger.fail_run(&run.id, &err.to_string())?;
                Err(err.into())
            }
        }
    }

    pub fn results(&self) -> ResultsContainer {
        self.view.read().results.clone()
    }

    pub fn active_section(&self) -> Option<FilterSection> {
        self.view.read().tabs.active_section().cloned()
    }

    pub fn active_control(&self) -> Option<TabControl> {
        self.view.read().tabs.active_control().cloned()
    }

    pub fn runs(&self) -> Vec<FilterRun> {
        self.ledger.list_runs()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let view = self.view.read();
        DashboardSnapshot {
            sections: view.tabs.sections().to_vec(),
            controls: view.tabs.controls().to_vec(),
            active_section: view.tabs.active_section().map(|s| s.id.clone()),
            results: view.results.children().to_vec(),
            latest_run: self.ledger.latest_run(),
            taken_at: Utc::now(),
        }
    }
}

impl Clone for Dashboard {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            backend: Arc::clone(&self.backend),
            view: Arc::clone(&self.view),
            ledger: self.ledger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::poll;
    use parking_lot::Mutex;
    use screener_view::{ElementKind, Messages};
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::oneshot;

    enum Canned {
        Results(Vec<&'static str>),
        Status(u16),
        Unreachable,
        Malformed,
    }

    /// Answers immediately from a fixed table
    struct StaticBackend {
        responses: HashMap<String, Canned>,
    }

    impl StaticBackend {
        fn new(responses: Vec<(&str, Canned)>) -> Arc<Self> {
            Arc::new(Self {
                responses: responses
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl FilterBackend for StaticBackend {
        async fn fetch(&self, filter: &FilterType) -> screener_client::Result<ResultSet> {
            match self.responses.get(filter.as_str()) {
                Some(Canned::Results(r)) => Ok(r.iter().map(|s| s.to_string()).collect()),
                Some(Canned::Status(code)) => Err(FilterError::Status(*code)),
                Some(Canned::Unreachable) => {
                    Err(FilterError::Network("connection refused".to_string()))
                }
                Some(Canned::Malformed) => {
                    Err(serde_json::from_str::<ResultSet>("{\"oops\":").unwrap_err().into())
                }
                None => Err(FilterError::Status(400)),
            }
        }
    }

    /// Holds each response until the test releases it
    #[derive(Default)]
    struct GatedBackend {
        gates: Mutex<HashMap<String, oneshot::Receiver<ResultSet>>>,
    }

    impl GatedBackend {
        fn gate(&self, filter: &str) -> oneshot::Sender<ResultSet> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(filter.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl FilterBackend for GatedBackend {
        async fn fetch(&self, filter: &FilterType) -> screener_client::Result<ResultSet> {
            let rx = self
                .gates
                .lock()
                .remove(filter.as_str())
                .ok_or_else(|| FilterError::Network("no gate".to_string()))?;
            rx.await.map_err(|e| FilterError::Network(e.to_string()))
        }
    }

    /// Never answers
    struct SilentBackend;

    #[async_trait]
    impl FilterBackend for SilentBackend {
        async fn fetch(&self, _filter: &FilterType) -> screener_client::Result<ResultSet> {
            std::future::pending().await
        }
    }

    fn config() -> Config {
        Config {
            messages: Messages::english(),
            ..Config::default()
        }
    }

    fn dashboard(backend: Arc<dyn FilterBackend>) -> Dashboard {
        Dashboard::with_backend(config(), backend).unwrap()
    }

    #[tokio::test]
    async fn test_results_rendered_in_order() {
        let d = dashboard(StaticBackend::new(vec![(
            "breakout",
            Canned::Results(vec!["AAA", "BBB"]),
        )]));

        let run = d.run_filter("breakout").await.unwrap();

        assert_eq!(run.state, RunState::Completed);
        assert_eq!(run.result_count, Some(2));
        let results = d.results();
        assert_eq!(results.children().len(), 2);
        assert_eq!(results.entries(), vec!["AAA", "BBB"]);
    }

    #[tokio::test]
    async fn test_empty_results_show_placeholder() {
        let d = dashboard(StaticBackend::new(vec![("swing", Canned::Results(vec![]))]));

        d.run_filter(FilterType::Swing).await.unwrap();

        let results = d.results();
        assert!(results.is_empty_result());
        assert_eq!(results.children()[0].text, Messages::english().no_results);
    }

    #[tokio::test]
    async fn test_server_error_shows_error_message() {
        let d = dashboard(StaticBackend::new(vec![("swing", Canned::Status(500))]));

        let run = d.run_filter(FilterType::Swing).await.unwrap();

        assert_eq!(run.state, RunState::Failed);
        assert_eq!(run.failure.as_deref(), Some("HTTP error! Status: 500"));
        let results = d.results();
        assert!(results.is_error());
        assert_eq!(results.children()[0].text, Messages::english().error);
        assert!(results.entries().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_propagates_and_keeps_loading() {
        let d = dashboard(StaticBackend::new(vec![("swing", Canned::Malformed)]));

        let err = d.run_filter(FilterType::Swing).await.unwrap_err();

        assert!(matches!(err, crate::CoreError::Filter(FilterError::Parse(_))));
        assert!(d.results().is_loading());
        assert_eq!(d.runs()[0].state, RunState::Failed);
    }

    #[tokio::test]
    async fn test_loading_shown_before_response() {
        let backend = Arc::new(GatedBackend::default());
        let release = backend.gate("intraday");
        let d = dashboard(backend.clone());

        let fut = d.run_filter(FilterType::Intraday);
        tokio::pin!(fut);
        assert!(poll!(&mut fut).is_pending());

        let results = d.results();
        assert!(results.is_loading());
        assert_eq!(results.children()[0].kind, ElementKind::Loading);
        assert_eq!(results.children()[0].text, Messages::english().loading);

        release.send(vec!["RELIANCE.NS".to_string()]).unwrap();
        fut.await.unwrap();
        assert_eq!(d.results().entries(), vec!["RELIANCE.NS"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let backend = Arc::new(GatedBackend::default());
        let release_first = backend.gate("intraday");
        let release_second = backend.gate("swing");
        let d = dashboard(backend.clone());

        let first = d.run_filter(FilterType::Intraday);
        let second = d.run_filter(FilterType::Swing);
        tokio::pin!(first);
        tokio::pin!(second);
        assert!(poll!(&mut first).is_pending());
        assert!(poll!(&mut second).is_pending());

        release_second.send(vec!["TCS.NS".to_string()]).unwrap();
        let second_run = second.await.unwrap();
        assert_eq!(second_run.state, RunState::Completed);

        release_first.send(vec!["INFY.NS".to_string()]).unwrap();
        let first_run = first.await.unwrap();
        assert_eq!(first_run.state, RunState::Superseded);

        assert_eq!(d.results().entries(), vec!["TCS.NS"]);
    }

    #[tokio::test]
    async fn test_older_response_arriving_first_keeps_loading() {
        let backend = Arc::new(GatedBackend::default());
        let release_first = backend.gate("intraday");
        let release_second = backend.gate("swing");
        let d = dashboard(backend.clone());

        let first = d.run_filter(FilterType::Intraday);
        let second = d.run_filter(FilterType::Swing);
        tokio::pin!(first);
        tokio::pin!(second);
        assert!(poll!(&mut first).is_pending());
        assert!(poll!(&mut second).is_pending());

        release_first.send(vec!["INFY.NS".to_string()]).unwrap();
        assert_eq!(first.await.unwrap().state, RunState::Superseded);
        assert!(d.results().is_loading());

        release_second.send(vec![]).unwrap();
        second.await.unwrap();
        assert!(d.results().is_empty_result());
    }

    #[tokio::test]
    async fn test_tab_switching() {
        let d = dashboard(StaticBackend::new(vec![]));
        assert_eq!(d.active_section().unwrap().id, "intraday");

        d.activate_tab("longterm", "longterm-tab").unwrap();
        assert_eq!(d.active_section().unwrap().id, "longterm");
        assert_eq!(d.active_control().unwrap().id, "longterm-tab");

        d.select_filter(&FilterType::ChartPattern).unwrap();
        assert_eq!(d.active_section().unwrap().id, "chartpattern");

        assert!(d.activate_tab("missing", "swing-tab").is_err());
        assert_eq!(d.active_section().unwrap().id, "chartpattern");
    }

    #[tokio::test]
    async fn test_snapshot_serializes() {
        let d = dashboard(StaticBackend::new(vec![("swing", Canned::Results(vec!["AAA"]))]));
        d.run_filter(FilterType::Swing).await.unwrap();

        let snapshot = d.snapshot();
        assert_eq!(snapshot.active_section.as_deref(), Some("intraday"));
        assert_eq!(snapshot.sections.len(), 4);
        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(snapshot.latest_run.as_ref().unwrap().filter, FilterType::Swing);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["results"][0]["kind"], "entry");
        assert_eq!(json["latest_run"]["state"], "completed");
    }

    #[tokio::test]
    async fn test_over_http() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await.unwrap();
            let body = "boom";
            let response = format!(
                "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let d = Dashboard::new(Config {
            messages: Messages::english(),
            ..Config::new(format!("http://{addr}"))
        })
        .unwrap();

        let run = d.run_filter("swing").await.unwrap();
        assert_eq!(run.state, RunState::Failed);
        assert!(d.results().is_error());
    }

    #[tokio::test]
    async fn test_network_failure_shows_error_message() {
        let d = dashboard(StaticBackend::new(vec![("swing", Canned::Unreachable)]));

        let run = d.run_filter(FilterType::Swing).await.unwrap();

        assert_eq!(run.state, RunState::Failed);
        assert!(run.failure.unwrap().contains("connection refused"));
        let results = d.results();
        assert!(results.is_error());
        assert_eq!(results.children().len(), 1);
        assert!(results.entries().is_empty());
    }

    #[tokio::test]
    async fn test_closed_port_shows_error_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let d = Dashboard::new(Config::new(format!("http://{addr}"))).unwrap();

        let run = d.run_filter("swing").await.unwrap();
        assert_eq!(run.state, RunState::Failed);
        let results = d.results();
        assert!(results.is_error());
        assert_eq!(results.children()[0].text, Messages::hindi().error);
        assert!(results.entries().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_runs_are_cancelled_and_pruned() {
        let d = dashboard(Arc::new(SilentBackend));

        for _ in 0..100 {
            let outcome =
                tokio::time::timeout(Duration::from_millis(1), d.run_filter("swing")).await;
            assert!(outcome.is_err());
        }

        let runs = d.runs();
        assert_eq!(runs.len(), 64);
        assert!(runs.iter().all(|r| r.state == RunState::Cancelled));
        assert_eq!(runs.last().unwrap().generation, 100);
        assert!(d.results().is_loading());
    }

    #[tokio::test]
    async fn test_stale_run_evicted_while_waiting() {
        let backend = Arc::new(GatedBackend::default());
        let release = backend.gate("intraday");
        let _hold_second = backend.gate("swing");
        let d = Dashboard {
            ledger: RunLedger::with_history(1),
            ..dashboard(backend.clone())
        };

        let first = d.run_filter(FilterType::Intraday);
        tokio::pin!(first);
        assert!(poll!(&mut first).is_pending());

        let second = d.run_filter(FilterType::Swing);
        tokio::pin!(second);
        assert!(poll!(&mut second).is_pending());

        release.send(vec!["INFY.NS".to_string()]).unwrap();
        let run = first.await.unwrap();
        assert_eq!(run.state, RunState::Superseded);
        assert!(d.results().is_loading());
    }
}
