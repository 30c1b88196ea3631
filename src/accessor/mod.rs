//! Typed access to read results
//!
//! Layered above the reader: converts validated strings to integers, floats
//! and bools, and supplies per-key defaults for keys the file left out.

mod defaults;
mod errors;
mod typed;

pub use defaults::Defaults;
pub use errors::{AccessorError, AccessorResult};
pub use typed::{parse_simple_bool, TypedAccess};
