//! Solution detail controller
//!
//! Polls one solution's status and tails its log incrementally. Every
//! fetch carries the activation epoch it was issued under and re-checks it
//! before applying results, so completions that outlive their view are
//! discarded instead of corrupting the next one.

use std::sync::{Arc, Mutex};

use tokio::time::Duration;
use tracing::{debug, warn};

use solwatch_client::SolutionBackend;
use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::{SolutionId, SolutionStatus};

use crate::config::EndpointConfig;
use crate::scheduler::{Channel, PollingScheduler};
use crate::view::DetailView;

/// Marker line appended locally when a kill request is accepted. Not a
/// server log line; termination is only claimed once a status snapshot
/// observes it.
const KILLED_MARKER: &str = "Killed by user.";

struct DetailState {
    selected: Option<SolutionId>,
    log_kind: LogKind,
    /// Latest observed status; control decisions read this, never the view.
    last_status: Option<SolutionStatus>,
    /// Count of log lines currently held; every tail request starts here.
    received_lines: usize,
    /// Activation ownership token; bumped on activate and deactivate.
    epoch: u64,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            selected: None,
            log_kind: LogKind::Runtime,
            last_status: None,
            received_lines: 0,
            epoch: 0,
        }
    }
}

/// Owns the single-solution view.
pub struct SolutionDetailController {
    backend: Arc<dyn SolutionBackend>,
    config: EndpointConfig,
    scheduler: Arc<PollingScheduler>,
    view: Arc<dyn DetailView>,
    period: Duration,
    state: Mutex<DetailState>,
}

impl SolutionDetailController {
    pub fn new(
        backend: Arc<dyn SolutionBackend>,
        config: EndpointConfig,
        scheduler: Arc<PollingScheduler>,
        view: Arc<dyn DetailView>,
        period: Duration,
    ) -> Self {
        Self {
            backend,
            config,
            scheduler,
            view,
            period,
            state: Mutex::new(DetailState::default()),
        }
    }

    /// Select a solution: reset transient state, clear the rendered log,
    /// fetch one status snapshot and one log tail immediately, then arm
    /// the two pollers only if the observed status is non-terminal or
    /// still unknown. A solution that finished before the user opened it
    /// gets a static view with no timers.
    pub async fn activate(self: &Arc<Self>, id: SolutionId, kind: LogKind) {
        let epoch = {
            let mut st = self.state.lock().unwrap();
            st.epoch += 1;
            st.selected = Some(id.clone());
            st.log_kind = kind;
            st.last_status = None;
            st.received_lines = 0;
            st.epoch
        };
        self.view.reset(&id, kind);

        self.fetch_status(epoch).await;
        self.fetch_log_tail(epoch).await;

        let live = {
            let st = self.state.lock().unwrap();
            st.epoch == epoch && st.last_status.is_none_or(|s| !s.is_terminal())
        };
        if !live {
            return;
        }

        let ctrl = Arc::clone(self);
        self.scheduler
            .start_after(Channel::DetailStatus, self.period, move || {
                let ctrl = Arc::clone(&ctrl);
                async move { ctrl.fetch_status(epoch).await }
            });
        let ctrl = Arc::clone(self);
        self.scheduler
            .start_after(Channel::DetailLog, self.period, move || {
                let ctrl = Arc::clone(&ctrl);
                async move { ctrl.fetch_log_tail(epoch).await }
            });
    }

    /// Stop both pollers and drop the selection. In-flight fetches see the
    /// epoch bump and discard themselves.
    pub fn deactivate(&self) {
        {
            let mut st = self.state.lock().unwrap();
            st.epoch += 1;
            st.selected = None;
        }
        self.scheduler.stop(Channel::DetailStatus);
        self.scheduler.stop(Channel::DetailLog);
    }

    /// Fetch a status snapshot and render it.
    ///
    /// Observing a terminal status stops both detail channels: the backend
    /// produces nothing further for a finished solution. (The reference
    /// console only consulted the status at activation time and could poll
    /// a finished solution forever.)
    async fn fetch_status(&self, epoch: u64) {
        let Some(id) = self.selected_for(epoch) else {
            return;
        };

        match self.backend.status_of(&self.config.server_url, &id).await {
            Ok(solution) => {
                {
                    let mut st = self.state.lock().unwrap();
                    if st.epoch != epoch || st.selected.as_ref() != Some(&solution.id) {
                        return; // stale completion
                    }
                    st.last_status = Some(solution.status);
                }
                let terminal = solution.status.is_terminal();
                self.view.render_summary(&solution, !terminal);
                if terminal {
                    self.scheduler.stop(Channel::DetailStatus);
                    self.scheduler.stop(Channel::DetailLog);
                }
            }
            Err(e) => {
                debug!("status poll for {id} failed, retrying next tick: {e}");
            }
        }
    }

    /// Fetch log lines from the current offset and append them.
    ///
    /// The backend returns exactly the suffix from the requested offset, so
    /// appending and advancing by the returned count never duplicates or
    /// drops a line. An empty result changes nothing.
    async fn fetch_log_tail(&self, epoch: u64) {
        let (id, kind, from) = {
            let st = self.state.lock().unwrap();
            if st.epoch != epoch {
                return;
            }
            match &st.selected {
                Some(id) => (id.clone(), st.log_kind, st.received_lines),
                None => return,
            }
        };

        match self
            .backend
            .log_tail(&self.config.server_url, &id, kind, from)
            .await
        {
            Ok(lines) => {
                if lines.is_empty() {
                    return;
                }
                {
                    let mut st = self.state.lock().unwrap();
                    if st.epoch != epoch || st.received_lines != from {
                        // Stale, or an overlapping fetch advanced the offset
                        // first; this suffix no longer lines up.
                        return;
                    }
                    st.received_lines += lines.len();
                }
                self.view.append_log_lines(&lines);
            }
            Err(e) => {
                debug!("log poll for {id} failed, retrying next tick: {e}");
            }
        }
    }

    /// Request cancellation of the selected solution.
    ///
    /// Acceptance appends a local marker line; the pollers stay armed and
    /// the next status snapshot is expected to observe KILLED. No-op when
    /// nothing is selected or the last known status is already terminal.
    pub async fn cancel(&self) {
        let (id, epoch) = {
            let st = self.state.lock().unwrap();
            match (&st.selected, st.last_status) {
                (Some(id), status) if status.is_none_or(|s| !s.is_terminal()) => {
                    (id.clone(), st.epoch)
                }
                _ => return,
            }
        };

        match self.backend.kill(&self.config.server_url, &id).await {
            Ok(()) => {
                let still_current = {
                    let st = self.state.lock().unwrap();
                    st.epoch == epoch
                };
                if still_current {
                    self.view.append_log_lines(&[KILLED_MARKER.to_string()]);
                }
            }
            Err(e) => {
                warn!("kill request for {id} failed: {e}");
            }
        }
    }

    fn selected_for(&self, epoch: u64) -> Option<SolutionId> {
        let st = self.state.lock().unwrap();
        if st.epoch != epoch {
            return None;
        }
        st.selected.clone()
    }
}
