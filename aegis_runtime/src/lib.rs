#![forbid(unsafe_code)]

//! Aegis Runtime
//!
//! Wraps the engine with configuration, telemetry validation and
//! fallbacks, the immutable mission record, session handling, snapshot
//! encoding and drift reports.
//!
//! No scoring logic lives here. Every risk number is delegated to the
//! engine.

pub mod error;
pub mod config;
pub mod telemetry;
pub mod mission;
pub mod session;
pub mod snapshot_codec;
pub mod drift;

pub use error::{Result, RuntimeError};
