//! Recurrence and streak engine
//!
//! Unlike pre-generated recurrence, a repeating task is a single record that
//! is rolled forward to its next occurrence each time it is completed.

pub mod cadence;
pub mod engine;

pub use cadence::*;
pub use engine::*;
