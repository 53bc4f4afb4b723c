//! Task store
//!
//! Owns the canonical task collection, its persistence as a JSON blob,
//! legacy-record normalization, and the single-slot delete undo.

pub mod blob;
pub mod error;
pub mod normalize;
pub mod patch;
pub mod task_store;
pub mod undo;

pub use blob::*;
pub use error::*;
pub use patch::*;
pub use task_store::*;
pub use undo::*;
