//! Solwatch Core
//!
//! Core types for the solwatch monitoring console.
//!
//! This crate contains:
//! - Domain types: solution snapshots, lifecycle statuses, log kinds
//! - DTOs: request bodies for the client-runner backend

pub mod domain;
pub mod dto;
