//! View-state controllers
//!
//! Each controller owns one view and drives it through the scheduler. The
//! router guarantees at most one controller holds live timers at any
//! instant.

pub mod detail;
pub mod list;
pub mod router;
