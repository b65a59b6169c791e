//! DTOs for talking to the client-runner backend

pub mod solution;
