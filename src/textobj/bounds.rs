//! Argument boundary resolution.
//!
//! Given a position, finds the delimiters of the function-call argument
//! around it: the nearest comma or list bracket on each side, skipping
//! nested expressions and quoted literals. When the nearest bracket pair is
//! just a parenthesized sub-expression such as `(30 + x)` in
//! `fun(a, (30 + x) * 20, c)`, the search widens until it reaches a real
//! argument list.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::brackets::{is_close_bracket, is_open_bracket, is_quote};
use super::error::ArgumentError;
use super::outer::find_outer_brackets;
use super::quote::{skip_quoted_backward, skip_quoted_forward};
use super::sexp::{skip_sexp, Direction};
use super::source::TextSource;

/// Working offsets of one resolution pass.
///
/// `left_bound` and `right_bound` are the argument delimiters (a comma or
/// the list bracket). `left_bracket` and `right_bracket` are the bracket
/// pair currently believed to enclose the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub left_bound: usize,
    pub right_bound: usize,
    pub left_bracket: usize,
    pub right_bracket: usize,
}

impl SearchState {
    fn at(position: usize) -> Self {
        Self {
            left_bound: position,
            right_bound: position,
            left_bracket: position,
            right_bracket: position,
        }
    }

    /// The bounds as a half-open range. Meaningful after inner or outer adjustment.
    pub fn range(&self) -> Range<usize> {
        self.left_bound..self.right_bound
    }
}

/// Which part of an argument a selection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentScope {
    /// The argument text without delimiters or leading whitespace.
    #[default]
    Inner,
    /// The argument plus one list separator, so deleting it keeps the list well-formed.
    Outer,
}

/// Resolves argument bounds over one text snapshot.
pub struct ArgBoundsFinder<'a, T: TextSource + ?Sized> {
    text: &'a T,
}

impl<'a, T: TextSource + ?Sized> ArgBoundsFinder<'a, T> {
    pub fn new(text: &'a T) -> Self {
        Self { text }
    }

    /// Find the delimiters of the argument at `position`.
    ///
    /// On success `left_bound` and `right_bound` point at the delimiter
    /// characters around the argument. Use [`Self::adjust_inner`] or
    /// [`Self::adjust_outer`] to turn them into a selection.
    pub fn find_bounds_at(&self, position: usize) -> Result<SearchState, ArgumentError> {
        let len = self.text.len();
        if position >= len {
            return Err(ArgumentError::NotInsideArgumentList);
        }

        let mut state = self.get_out_of_quoted_text(SearchState::at(position))?;
        if state.left_bound == state.right_bound {
            if is_close_bracket(self.text.char_at(position)) {
                state.left_bound = position
                    .checked_sub(1)
                    .ok_or(ArgumentError::NotInsideArgumentList)?;
            } else {
                state.right_bound += 1;
            }
        }

        let mut next_left = state.left_bound;
        let mut next_right = state.right_bound;
        loop {
            state.left_bracket = next_left;
            state.right_bracket = next_right;
            state = find_outer_brackets(self.text, state, 0, len - 1)
                .ok_or(ArgumentError::NotInsideArgumentList)?;

            state.left_bound = next_left;
            state = self.find_left_bound(state);
            state.right_bound = next_right;
            state = self.find_right_bound(state);

            if state.left_bound == 0
                || state.right_bound >= len
                || state.right_bound - state.left_bound == 1
            {
                return Err(ArgumentError::NotAnArgument);
            }

            let both_brackets = self.text.char_at(state.left_bound) != ','
                && self.text.char_at(state.right_bound) != ',';
            if !both_brackets || self.is_ident_preceding(state.left_bound) {
                return Ok(state);
            }

            trace!(
                left = state.left_bound,
                right = state.right_bound,
                "bracketed sub-expression, widening"
            );
            next_left = state.left_bound - 1;
            next_right = state.right_bound + 1;
        }
    }

    /// Skip the left delimiter and any whitespace after it.
    pub fn adjust_inner(&self, bounds: SearchState) -> SearchState {
        let mut left = bounds.left_bound + 1;
        while left < bounds.right_bound && self.text.char_at(left).is_whitespace() {
            left += 1;
        }
        SearchState {
            left_bound: left,
            ..bounds
        }
    }

    /// Keep a leading comma; for the first argument drop the bracket and take
    /// the trailing comma and whitespace instead.
    pub fn adjust_outer(&self, bounds: SearchState) -> SearchState {
        if self.text.char_at(bounds.left_bound) == ',' {
            return bounds;
        }

        let mut right = bounds.right_bound;
        if right + 1 < bounds.right_bracket && self.text.char_at(right) == ',' {
            right += 1;
            while right + 1 < bounds.right_bracket && self.text.char_at(right).is_whitespace() {
                right += 1;
            }
        }
        SearchState {
            left_bound: bounds.left_bound + 1,
            right_bound: right,
            ..bounds
        }
    }

    /// Whether the bracket at `left_bound` follows an identifier, as in `foo (x)`.
    fn is_ident_preceding(&self, left_bound: usize) -> bool {
        let mut i = left_bound;
        while i > 0 && self.text.char_at(i - 1).is_whitespace() {
            i -= 1;
        }
        let ident_end = i;
        while i > 0 && is_ident_part(self.text.char_at(i - 1)) {
            i -= 1;
        }
        i < ident_end && is_ident_start(self.text.char_at(i))
    }

    /// If the position sits inside a quoted literal on its line, move the
    /// bounds just outside the quotes.
    ///
    /// Literals continued across lines are not recognized.
    fn get_out_of_quoted_text(&self, state: SearchState) -> Result<SearchState, ArgumentError> {
        let line = self.text.line_number(state.left_bound);
        let line_start = self.text.line_start_offset(line);
        let line_end = self.text.line_end_offset(line);

        let mut i = line_start;
        while i <= state.right_bound {
            if is_quote(self.text.char_at(i)) {
                let end = skip_quoted_forward(self.text, i, line_end);
                if end >= state.left_bound {
                    let left = i
                        .checked_sub(1)
                        .ok_or(ArgumentError::NotInsideArgumentList)?;
                    return Ok(SearchState {
                        left_bound: left,
                        right_bound: end + 1,
                        ..state
                    });
                }
                i = end;
            }
            i += 1;
        }
        Ok(state)
    }

    /// Move `left_bound` back to the nearest comma or to `left_bracket`.
    fn find_left_bound(&self, state: SearchState) -> SearchState {
        let mut pos = state.left_bound;
        while pos > state.left_bracket {
            let ch = self.text.char_at(pos);
            if ch == ',' {
                break;
            }
            if is_close_bracket(ch) {
                pos = skip_sexp(self.text, pos, state.left_bracket + 1, Direction::Backward)
                    .unwrap_or(state.left_bracket);
            } else {
                if is_quote(ch) {
                    pos = skip_quoted_backward(self.text, pos, state.left_bracket);
                }
                pos = pos.saturating_sub(1).max(state.left_bracket);
            }
        }
        SearchState {
            left_bound: pos,
            ..state
        }
    }

    /// Move `right_bound` forward to the nearest comma or to `right_bracket`.
    fn find_right_bound(&self, state: SearchState) -> SearchState {
        let mut pos = state.right_bound;
        while pos < state.right_bracket {
            let ch = self.text.char_at(pos);
            if ch == ',' {
                break;
            }
            if is_open_bracket(ch) {
                pos = skip_sexp(self.text, pos, state.right_bracket - 1, Direction::Forward)
                    .unwrap_or(state.right_bracket);
            } else {
                if is_quote(ch) {
                    pos = skip_quoted_forward(self.text, pos, state.right_bracket);
                }
                pos = (pos + 1).min(state.right_bracket);
            }
        }
        SearchState {
            right_bound: pos,
            ..state
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Delimiters spanning `count` consecutive arguments starting at `position`.
///
/// Returns the left delimiter of the first argument and the right delimiter
/// of the last. A `count` of zero is treated as one.
pub fn find_argument_bounds<T: TextSource + ?Sized>(
    text: &T,
    position: usize,
    count: usize,
) -> Result<(usize, usize), ArgumentError> {
    let finder = ArgBoundsFinder::new(text);
    let first = finder.find_bounds_at(position)?;
    let mut right = first.right_bound;
    for _ in 1..count {
        right = finder.find_bounds_at(right)?.right_bound;
    }
    Ok((first.left_bound, right))
}

/// Selection covering `count` arguments starting at `position`.
///
/// Each argument is adjusted as it is found. With [`ArgumentScope::Inner`]
/// the first and last arguments get inner adjustment and any in between get
/// outer adjustment, so the separators between them stay selected.
pub fn argument_range<T: TextSource + ?Sized>(
    text: &T,
    position: usize,
    count: usize,
    scope: ArgumentScope,
) -> Result<Range<usize>, ArgumentError> {
    let finder = ArgBoundsFinder::new(text);
    let count = count.max(1);
    let mut pos = position;
    let mut left = position;

    for i in 0..count {
        let bounds = finder.find_bounds_at(pos)?;
        let adjusted = match scope {
            ArgumentScope::Inner if i == 0 || i == count - 1 => finder.adjust_inner(bounds),
            _ => finder.adjust_outer(bounds),
        };
        if i == 0 {
            left = adjusted.left_bound;
        }
        pos = adjusted.right_bound;
    }
    Ok(left..pos)
}
