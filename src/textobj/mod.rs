//! Argument text objects.
//!
//! Lexical resolution of "the function-call argument around a position",
//! as used by editor motions that select an inner or outer argument. Only
//! bracket, comma and quote characters are interpreted; there is no
//! language grammar. Brackets of different kinds are ranked (`[ { ( <`) so
//! that stray `<` and `>` used as operators do not break list detection.
//!
//! - [`brackets`]: bracket and quote character classes
//! - [`quote`]: skipping quoted literals
//! - [`sexp`]: skipping bracketed expressions in either direction
//! - [`outer`]: locating the enclosing bracket pair
//! - [`bounds`]: the resolver and inner/outer adjustment

pub mod bounds;
pub mod brackets;
mod error;
pub mod outer;
pub mod quote;
pub mod sexp;
mod source;

pub use bounds::{
    argument_range, find_argument_bounds, ArgBoundsFinder, ArgumentScope, SearchState,
};
pub use error::ArgumentError;
pub use source::TextSource;
