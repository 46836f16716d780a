//! Test data

mod fixtures;

pub use fixtures::{Scenario, TestDataFactory};
