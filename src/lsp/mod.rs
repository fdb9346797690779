//! LSP protocol feature implementations.
//!
//! - Selection ranges built from nested argument bounds
//! - The `argsel/argumentRange` custom request

mod argument;
mod selection;

pub use argument::{argument_range_at, ArgumentRangeParams, ARGUMENT_RANGE_METHOD};
pub use selection::{argument_spans, selection_ranges};
