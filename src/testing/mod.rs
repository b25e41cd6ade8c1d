//! Scenario tests for the topology registry.
//!
//! These exercise the registry the way a running system would: many
//! threads mutating one shared cluster, snapshots encoded after the lock is
//! released, custom group implementations, and event fan-out.

mod concurrency_tests;
mod utils;
