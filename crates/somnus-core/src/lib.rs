//! Core types and trait definitions for the Somnus sleep tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! ingest and report pipelines are written against the [`store::SampleStore`]
//! trait; concrete backends live in their own crates.

pub mod error;
pub mod ingest;
pub mod report;
pub mod sample;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
