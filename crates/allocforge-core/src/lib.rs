//! allocforge Core - problem model and cost types for assignment problems
//!
//! This crate provides the fundamental abstractions for allocforge:
//! - The immutable [`Instance`] (clients, resources, per-unit costs)
//! - The mutable [`Assignment`] state with incrementally maintained loads
//! - The [`HardSoftCost`] type used to aggregate weighted cost components
//! - Error types shared across the workspace

pub mod cost;
pub mod domain;
pub mod error;

pub use cost::{CostLevel, CostParseError, HardSoftCost};
pub use domain::{
    Assignment, Client, ClientData, Coordinates, Instance, InstanceBuilder, InstanceData,
    Resource, ResourceData, UNBOUNDED,
};
pub use error::{AllocError, ConsistencyError, Result};
