//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` I/O boundary trait
//! but are themselves concrete structs, not traits.

mod hosts;

pub use hosts::HostService;
