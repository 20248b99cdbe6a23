//! Shared test fixtures for allocforge crates.
//!
//! This crate provides instances and pure reference functions for testing.
//! It only depends on `allocforge-core`, so every other crate can use it as
//! a dev-dependency.
//!
//! - [`warehouse`] - Small hand-checked instances
//! - [`generator`] - Seeded random instances and assignments
//! - [`reference`] - Brute-force cost recomputation and exhaustive optimum
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! allocforge-test = { workspace = true }
//! ```

pub mod generator;
pub mod reference;
pub mod warehouse;

pub use generator::{random_assignment, random_instance, GeneratorConfig};
pub use reference::{exhaustive_optimum, reference_costs, state_costs, ReferenceCosts};
pub use warehouse::{capacity_instance, opening_instance, scenario_instance};
