#![forbid(unsafe_code)]

//! Aegis Engine v1
//!
//! Deterministic hazard scoring and scenario projection. Every entry point
//! is a pure function of the telemetry snapshot it is handed; the only
//! non-reproducible output is the forecast noise, unless a seed is supplied.

/// Engine v1. Scoring weights, thresholds and the jitter stream are frozen
/// under this version; changing any of them requires a version bump.
pub const ENGINE_VERSION: u32 = 1;

pub mod arithmetic;
pub mod sequence;
pub mod domain;
pub mod geography;
pub mod scoring;
pub mod forecast;
pub mod cascade;
pub mod impact;
pub mod precautions;
pub mod invariants;
pub mod hashing;
pub mod engine;
