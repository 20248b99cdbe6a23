//! Problem model: the immutable instance and the mutable assignment state.

mod assignment;
mod instance;
mod io;
mod loading;

#[cfg(test)]
mod tests;

pub use assignment::Assignment;
pub use instance::{Client, Coordinates, Instance, InstanceBuilder, Resource, UNBOUNDED};
pub use loading::{ClientData, InstanceData, ResourceData};
