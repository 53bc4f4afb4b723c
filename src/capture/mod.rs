//! Quick-capture module
//!
//! Converts a single line of free text into a structured task draft and
//! expands configured templates into several drafts at once.

pub mod parser;
pub mod template;
pub mod when;

pub use parser::*;
pub use template::*;
