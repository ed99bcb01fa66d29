//! Scoring agents and market rule engines for the TreeHub marketplace.
//!
//! Every engine in this crate is a pure function over records that have
//! already been fetched. Services wrap the engines with repository traits so
//! the HTTP layer in `treehub-api` can drive them.

pub mod agents;
pub mod catalog;
pub mod config;
pub mod conquest;
pub mod error;
pub mod geo;
pub mod import;
pub mod telemetry;
