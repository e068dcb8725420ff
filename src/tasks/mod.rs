//! Background Tasks Module
//!
//! Contains background tasks that run while the client is open.
//!
//! # Tasks
//! - Connection supervisor: health checks and reconnects at a fixed interval

mod supervisor;

pub use supervisor::{probe, spawn_supervisor, MIN_PROBE_INTERVAL};
