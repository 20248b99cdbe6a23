//! Component API.
//!
//! This module provides:
//! - `CostComponent` and `DeltaCostComponent` traits
//! - `ComponentSet` and `DeltaSet` traits implemented for tuples
//! - Per-component evaluation results

pub mod component_set;
pub mod traits;

pub use component_set::{ComponentSet, DeltaSet};
pub use traits::{ComponentResult, CostComponent, DeltaCostComponent, DeltaResult};
