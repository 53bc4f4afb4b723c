// Core data models for Taskpad
// These structs represent the domain entities

pub mod task;
pub mod category;

pub use task::*;
pub use category::*;
