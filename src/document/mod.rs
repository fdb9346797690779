//! Document state management and text utilities.
//!
//! This module provides:
//! - `LineIndex`, a character snapshot with line lookup and LSP position conversion
//! - `DocumentState` and `DocumentStore` for document lifecycle management

mod state;
mod text;

pub use state::{DocumentState, DocumentStore};
pub use text::LineIndex;
