//! Test doubles shared by controller tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use solwatch_client::SolutionBackend;
use solwatch_client::error::{ClientError, Result};
use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::{Solution, SolutionId, SolutionStatus};

use crate::view::{DetailView, ListView};

pub fn solution(id: &str, status: SolutionStatus) -> Solution {
    Solution {
        id: SolutionId::from(id),
        status,
        created: None,
        started: None,
        finished: None,
    }
}

/// Scripted backend. Responses are consumed front-to-back; an exhausted
/// queue answers with a 503, which controllers must treat as a transient
/// poll failure.
#[derive(Default)]
pub struct FakeBackend {
    pub lists: Mutex<VecDeque<Vec<Solution>>>,
    pub statuses: Mutex<VecDeque<Solution>>,
    pub log_batches: Mutex<VecDeque<Vec<String>>>,
    /// `from_line` of every log_tail call, in order.
    pub log_offsets: Mutex<Vec<usize>>,
    pub kills: AtomicUsize,
    /// Artificial latency for every call; lets tests deactivate a view
    /// while a fetch is still in flight.
    pub delay: Mutex<tokio::time::Duration>,
}

impl FakeBackend {
    pub fn push_list(&self, solutions: Vec<Solution>) {
        self.lists.lock().unwrap().push_back(solutions);
    }

    pub fn push_status(&self, solution: Solution) {
        self.statuses.lock().unwrap().push_back(solution);
    }

    pub fn push_log_batch(&self, lines: Vec<&str>) {
        self.log_batches
            .lock()
            .unwrap()
            .push_back(lines.into_iter().map(str::to_string).collect());
    }

    pub fn set_delay(&self, delay: tokio::time::Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    async fn simulate_latency(&self) {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn exhausted() -> ClientError {
        ClientError::api_error(503, "no scripted response")
    }
}

#[async_trait]
impl SolutionBackend for FakeBackend {
    async fn list(&self, _server_url: &str) -> Result<Vec<Solution>> {
        self.simulate_latency().await;
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(Self::exhausted)
    }

    async fn submit(&self, _repo_url: &str, _server_url: &str) -> Result<()> {
        self.simulate_latency().await;
        Ok(())
    }

    async fn status_of(&self, _server_url: &str, _id: &SolutionId) -> Result<Solution> {
        self.simulate_latency().await;
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(Self::exhausted)
    }

    async fn log_tail(
        &self,
        _server_url: &str,
        _id: &SolutionId,
        _kind: LogKind,
        from_line: usize,
    ) -> Result<Vec<String>> {
        self.simulate_latency().await;
        self.log_offsets.lock().unwrap().push(from_line);
        self.log_batches
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(Self::exhausted)
    }

    async fn kill(&self, _server_url: &str, _id: &SolutionId) -> Result<()> {
        self.simulate_latency().await;
        self.kills.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every full-frame render.
#[derive(Default)]
pub struct RecordingListView {
    pub frames: Mutex<Vec<Vec<Solution>>>,
}

impl RecordingListView {
    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_frame(&self) -> Option<Vec<Solution>> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl ListView for RecordingListView {
    fn render(&self, solutions: &[Solution]) {
        self.frames.lock().unwrap().push(solutions.to_vec());
    }
}

/// Records summaries and the rendered log; `reset` drops held lines like
/// the terminal view drops its scrollback context.
#[derive(Default)]
pub struct RecordingDetailView {
    pub resets: Mutex<Vec<(SolutionId, LogKind)>>,
    pub summaries: Mutex<Vec<(Solution, bool)>>,
    pub lines: Mutex<Vec<String>>,
}

impl RecordingDetailView {
    pub fn rendered_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.lock().unwrap().len()
    }

    pub fn last_summary(&self) -> Option<(Solution, bool)> {
        self.summaries.lock().unwrap().last().cloned()
    }
}

impl DetailView for RecordingDetailView {
    fn reset(&self, id: &SolutionId, kind: LogKind) {
        self.resets.lock().unwrap().push((id.clone(), kind));
        self.lines.lock().unwrap().clear();
    }

    fn render_summary(&self, solution: &Solution, cancel_enabled: bool) {
        self.summaries
            .lock()
            .unwrap()
            .push((solution.clone(), cancel_enabled));
    }

    fn append_log_lines(&self, lines: &[String]) {
        self.lines.lock().unwrap().extend_from_slice(lines);
    }
}
