//! CollabUp End-to-End Test Support
//!
//! - `harness`: isolated temporary record stores
//! - `mocks`: realistic campus records and ready-made scenarios

pub mod mocks;

pub use harness::TestDatabaseManager;
pub use mocks::{Scenario, TestDataFactory};
