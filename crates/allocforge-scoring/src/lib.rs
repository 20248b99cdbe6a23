//! Decomposed cost evaluation for allocforge.
//!
//! This crate provides:
//! - The `CostComponent` and `DeltaCostComponent` traits
//! - Tuple-based component sets (no virtual dispatch)
//! - The Supply, Opening and Capacity components of the assignment model
//!
//! # Architecture
//!
//! Every component computes its absolute cost by a full scan of the state.
//! Delta components, defined next to the moves they score, compute the same
//! change in constant time; the two must always agree.

pub mod api;
pub mod component;

pub use api::{
    ComponentResult, ComponentSet, CostComponent, DeltaCostComponent, DeltaResult, DeltaSet,
};
pub use component::{
    standard_components, CapacityCost, OpeningCost, StandardComponents, SupplyCost,
};
