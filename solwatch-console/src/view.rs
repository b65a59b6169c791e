//! View traits and terminal renderers
//!
//! Controllers hand views complete data and never read anything back:
//! every control decision comes from controller state, not rendered
//! output. The terminal impls additionally skip reprinting a frame that is
//! identical to the previous one, so a quiet backend does not scroll the
//! screen.

use std::sync::Mutex;

use colored::*;
use solwatch_core::domain::log::LogKind;
use solwatch_core::domain::solution::{Solution, SolutionId, SolutionStatus, StatusClass};

/// Render sink of the list view.
pub trait ListView: Send + Sync {
    /// Replace the entire rendered row set.
    fn render(&self, solutions: &[Solution]);
}

/// Render sink of the detail view.
pub trait DetailView: Send + Sync {
    /// A new solution was selected; drop all previously rendered lines.
    fn reset(&self, id: &SolutionId, kind: LogKind);

    /// Latest status snapshot, with the cancel affordance state.
    fn render_summary(&self, solution: &Solution, cancel_enabled: bool);

    /// Append newly received log lines; never called with lines already
    /// rendered.
    fn append_log_lines(&self, lines: &[String]);
}

fn format_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

fn paint_status(status: SolutionStatus) -> ColoredString {
    let text = status.to_string();
    match status.class() {
        StatusClass::Info => text.cyan(),
        StatusClass::Warning => text.yellow(),
        StatusClass::Success => text.green(),
        StatusClass::Danger => text.red(),
        StatusClass::Dark => text.dimmed(),
    }
}

pub(crate) fn render_list_frame(solutions: &[Solution]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("Solutions ({})", solutions.len()).bold()
    );

    if solutions.is_empty() {
        let _ = writeln!(out, "  {}", "No solutions yet.".yellow());
        return out;
    }

    for (row, solution) in solutions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  {:<10}  {:<19}  {:<19}  {:<19}  {}",
            row + 1,
            solution.id,
            format_timestamp(solution.created).dimmed(),
            format_timestamp(solution.started).dimmed(),
            format_timestamp(solution.finished).dimmed(),
            paint_status(solution.status),
        );
    }

    out
}

pub(crate) fn render_summary_block(solution: &Solution, cancel_enabled: bool) -> String {
    format!(
        "{} {}  status: {}  created: {}  started: {}  finished: {}{}",
        "▸".cyan(),
        solution.id,
        paint_status(solution.status),
        format_timestamp(solution.created),
        format_timestamp(solution.started),
        format_timestamp(solution.finished),
        if cancel_enabled {
            String::new()
        } else {
            format!("  {}", "(kill disabled)".dimmed())
        },
    )
}

/// List view printing to stdout.
#[derive(Default)]
pub struct TermListView {
    last_frame: Mutex<Option<String>>,
}

impl TermListView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListView for TermListView {
    fn render(&self, solutions: &[Solution]) {
        let frame = render_list_frame(solutions);
        let mut last = self.last_frame.lock().unwrap();
        if last.as_deref() == Some(frame.as_str()) {
            return;
        }
        *last = Some(frame.clone());
        print!("{frame}");
    }
}

/// Detail view printing to stdout, tail -f style: the summary block is
/// reprinted on change, log lines only ever append.
#[derive(Default)]
pub struct TermDetailView {
    last_summary: Mutex<Option<String>>,
}

impl TermDetailView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetailView for TermDetailView {
    fn reset(&self, id: &SolutionId, kind: LogKind) {
        *self.last_summary.lock().unwrap() = None;
        println!(
            "{}",
            format!("── solution {id} ({kind} log) ──").bold()
        );
    }

    fn render_summary(&self, solution: &Solution, cancel_enabled: bool) {
        let block = render_summary_block(solution, cancel_enabled);
        let mut last = self.last_summary.lock().unwrap();
        if last.as_deref() == Some(block.as_str()) {
            return;
        }
        *last = Some(block.clone());
        println!("{block}");
    }

    fn append_log_lines(&self, lines: &[String]) {
        for line in lines {
            println!("  {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solwatch_core::domain::solution::SolutionStatus;

    fn solution(id: &str, status: SolutionStatus) -> Solution {
        Solution {
            id: SolutionId::from(id),
            status,
            created: None,
            started: None,
            finished: None,
        }
    }

    #[test]
    fn empty_list_renders_placeholder_and_zero_count() {
        colored::control::set_override(false);
        let frame = render_list_frame(&[]);
        assert!(frame.contains("Solutions (0)"));
        assert!(frame.contains("No solutions yet."));
    }

    #[test]
    fn rows_carry_status_and_count() {
        colored::control::set_override(false);
        let frame = render_list_frame(&[
            solution("a7", SolutionStatus::Running),
            solution("a8", SolutionStatus::Killed),
        ]);
        assert!(frame.contains("Solutions (2)"));
        assert!(frame.contains("a7"));
        assert!(frame.contains("RUNNING"));
        assert!(frame.contains("KILLED"));
        assert!(!frame.contains("No solutions yet."));
    }

    #[test]
    fn absent_timestamps_render_as_dash() {
        colored::control::set_override(false);
        let block = render_summary_block(&solution("a7", SolutionStatus::New), true);
        assert!(block.contains("created: -"));
        assert!(block.contains("started: -"));
        assert!(block.contains("finished: -"));
        assert!(!block.contains("kill disabled"));
    }

    #[test]
    fn terminal_summary_shows_disabled_cancel() {
        colored::control::set_override(false);
        let block = render_summary_block(&solution("a7", SolutionStatus::Finished), false);
        assert!(block.contains("FINISHED"));
        assert!(block.contains("kill disabled"));
    }
}
