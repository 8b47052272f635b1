//! FORAGER — explore-then-exploit foraging strategy
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod environment;
pub mod strategy;
pub mod engine;
