//! Solution list controller

use std::sync::{Arc, Mutex};

use tokio::time::Duration;
use tracing::debug;

use solwatch_client::SolutionBackend;
use solwatch_core::domain::solution::{Solution, SolutionId};

use crate::config::EndpointConfig;
use crate::scheduler::{Channel, PollingScheduler};
use crate::view::ListView;

/// Owns the list view: polls the full solution set and replaces the
/// rendered row set on every successful tick. List membership and ordering
/// are backend-owned and may change arbitrarily between polls, so renders
/// are full replacements, never incremental.
pub struct SolutionListController {
    backend: Arc<dyn SolutionBackend>,
    config: EndpointConfig,
    scheduler: Arc<PollingScheduler>,
    view: Arc<dyn ListView>,
    period: Duration,
    /// Last fetched set, kept so the input layer can resolve row selection.
    snapshot: Mutex<Vec<Solution>>,
}

impl SolutionListController {
    pub fn new(
        backend: Arc<dyn SolutionBackend>,
        config: EndpointConfig,
        scheduler: Arc<PollingScheduler>,
        view: Arc<dyn ListView>,
        period: Duration,
    ) -> Self {
        Self {
            backend,
            config,
            scheduler,
            view,
            period,
            snapshot: Mutex::new(Vec::new()),
        }
    }

    /// One immediate refresh, then recurring polling.
    pub fn activate(self: &Arc<Self>) {
        let ctrl = Arc::clone(self);
        self.scheduler
            .start(Channel::SolutionList, self.period, move || {
                let ctrl = Arc::clone(&ctrl);
                async move { ctrl.refresh().await }
            });
    }

    pub fn deactivate(&self) {
        self.scheduler.stop(Channel::SolutionList);
    }

    /// Fetch the full solution set and re-render.
    ///
    /// A failed fetch changes nothing; the next tick retries.
    pub async fn refresh(&self) {
        match self.backend.list(&self.config.server_url).await {
            Ok(solutions) => {
                *self.snapshot.lock().unwrap() = solutions.clone();
                self.view.render(&solutions);
            }
            Err(e) => {
                debug!("list poll failed, retrying next tick: {e}");
            }
        }
    }

    /// Resolve a selection token against the last rendered set: exact id
    /// match first, then 1-based row number.
    pub fn resolve_selection(&self, token: &str) -> Option<SolutionId> {
        let snapshot = self.snapshot.lock().unwrap();

        if let Some(solution) = snapshot.iter().find(|s| s.id.as_str() == token) {
            return Some(solution.id.clone());
        }

        if let Ok(row) = token.parse::<usize>() {
            if row >= 1 && row <= snapshot.len() {
                return Some(snapshot[row - 1].id.clone());
            }
        }

        None
    }
}
