//! Core types and trait definitions for the Cadre performance-management
//! workflow engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod actor;
pub mod appraisal;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod plan;
pub mod progress;
pub mod store;
pub mod weight;
pub mod workflow;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
