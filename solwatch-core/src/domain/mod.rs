//! Core domain types
//!
//! Business entities shared between the HTTP client and the console
//! controllers. The backend owns all of them; the console only observes
//! snapshots.

pub mod log;
pub mod solution;
