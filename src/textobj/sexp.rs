//! Skipping bracketed expressions in either direction.

use super::brackets::{
    bracket_priority, is_close_bracket, is_open_bracket, is_quote, matching_bracket,
};
use super::quote::{skip_quoted_backward, skip_quoted_forward};
use super::source::TextSource;

/// Scan direction over the text.
///
/// Scanning backward mirrors the bracket classes: a `)` opens an expression
/// and a `(` closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Whether `ch` starts a nested expression when scanning this way.
    pub fn opens(self, ch: char) -> bool {
        match self {
            Direction::Forward => is_open_bracket(ch),
            Direction::Backward => is_close_bracket(ch),
        }
    }

    /// Whether `ch` ends a nested expression when scanning this way.
    pub fn closes(self, ch: char) -> bool {
        match self {
            Direction::Forward => is_close_bracket(ch),
            Direction::Backward => is_open_bracket(ch),
        }
    }

    /// One step from `pos`, or `None` when stepping backward from offset 0.
    pub fn step(self, pos: usize) -> Option<usize> {
        match self {
            Direction::Forward => Some(pos + 1),
            Direction::Backward => pos.checked_sub(1),
        }
    }

    /// Whether `pos` has not yet reached `limit` in this direction.
    fn before(self, pos: usize, limit: usize) -> bool {
        match self {
            Direction::Forward => pos < limit,
            Direction::Backward => pos > limit,
        }
    }

    /// Skip the literal whose delimiting quote sits at `pos`, staying within
    /// `limit` (inclusive). Returns the offset of the other quote, or a
    /// position at or beyond `limit` when the literal is unterminated.
    fn skip_quoted<T: TextSource + ?Sized>(self, text: &T, pos: usize, limit: usize) -> usize {
        match self {
            Direction::Forward => skip_quoted_forward(text, pos, limit + 1),
            Direction::Backward => skip_quoted_backward(text, pos, limit.saturating_sub(1)),
        }
    }
}

/// Skip the bracketed expression whose opening bracket (for `dir`) is at `start`.
///
/// Characters are examined up to and including `limit`. Returns where the
/// enclosing scan should resume:
///
/// - one step past the matching bracket when the expression is balanced;
/// - the offending character itself when the start bracket turned out to be
///   an operator, as in `(<...)`, where `)` outranks the `<`;
/// - one step past `start` when no match exists before `limit`.
///
/// A lower-ranked closer pops the stack and is examined again, while an
/// equal-or-higher-ranked mismatched closer is ignored, so `a > b` inside
/// parens never closes anything. `None` means the resume position would
/// precede offset 0.
pub fn skip_sexp<T: TextSource + ?Sized>(
    text: &T,
    start: usize,
    limit: usize,
    dir: Direction,
) -> Option<usize> {
    let first = text.char_at(start);
    debug_assert!(dir.opens(first));
    let mut stack = vec![first];
    let mut pos = start;

    while dir.before(pos, limit) {
        pos = dir.step(pos)?;
        loop {
            let ch = text.char_at(pos);
            if dir.opens(ch) {
                stack.push(ch);
            } else if dir.closes(ch) {
                let Some(&top) = stack.last() else {
                    break;
                };
                if top == matching_bracket(ch) {
                    stack.pop();
                    if stack.is_empty() {
                        return dir.step(pos);
                    }
                } else if bracket_priority(ch) < bracket_priority(top) {
                    // (<...) -> (...)
                    stack.pop();
                    if stack.is_empty() {
                        return Some(pos);
                    }
                    continue;
                }
            } else if is_quote(ch) && dir.before(pos, limit) {
                pos = dir.skip_quoted(text, pos, limit);
            }
            break;
        }
    }

    dir.step(start)
}
