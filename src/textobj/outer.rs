//! Locating the bracket pair that encloses a window of text.

use std::cmp::Ordering;

use super::bounds::SearchState;
use super::brackets::{bracket_priority, is_close_bracket, is_open_bracket, is_quote};
use super::quote::{skip_quoted_backward, skip_quoted_forward};
use super::sexp::{skip_sexp, Direction};
use super::source::TextSource;

/// Find a bracket pair surrounding `state.left_bracket..=state.right_bracket`.
///
/// Searches no further than `start` on the left and `end` on the right (both
/// inclusive). When the two nearest unmatched brackets have different ranks,
/// the higher-ranked one is taken to be an operator and the search continues
/// past it on that side. Returns the state with both bracket offsets updated,
/// or `None` when either side runs out of text.
pub fn find_outer_brackets<T: TextSource + ?Sized>(
    text: &T,
    state: SearchState,
    start: usize,
    end: usize,
) -> Option<SearchState> {
    let mut left = find_prev_open_bracket(text, state.left_bracket, start)?;
    let mut right = find_next_close_bracket(text, state.right_bracket, end)?;

    loop {
        let left_prio = bracket_priority(text.char_at(left));
        let right_prio = bracket_priority(text.char_at(right));
        match left_prio.cmp(&right_prio) {
            Ordering::Equal => {
                return Some(SearchState {
                    left_bracket: left,
                    right_bracket: right,
                    ..state
                });
            }
            Ordering::Less => {
                if right >= end {
                    return None;
                }
                right = find_next_close_bracket(text, right + 1, end)?;
            }
            Ordering::Greater => {
                if left <= start {
                    return None;
                }
                left = find_prev_open_bracket(text, left - 1, start)?;
            }
        }
    }
}

/// Nearest unmatched open bracket at or before `pos`.
fn find_prev_open_bracket<T: TextSource + ?Sized>(
    text: &T,
    mut pos: usize,
    start: usize,
) -> Option<usize> {
    loop {
        if pos < start {
            return None;
        }
        let ch = text.char_at(pos);
        if is_open_bracket(ch) {
            return Some(pos);
        }
        if is_close_bracket(ch) {
            pos = skip_sexp(text, pos, start, Direction::Backward)?;
        } else if pos == start {
            return None;
        } else if is_quote(ch) {
            pos = skip_quoted_backward(text, pos, start).checked_sub(1)?;
        } else {
            pos -= 1;
        }
    }
}

/// Nearest unmatched close bracket at or after `pos`.
fn find_next_close_bracket<T: TextSource + ?Sized>(
    text: &T,
    mut pos: usize,
    end: usize,
) -> Option<usize> {
    loop {
        if pos > end {
            return None;
        }
        let ch = text.char_at(pos);
        if is_close_bracket(ch) {
            return Some(pos);
        }
        if is_open_bracket(ch) {
            pos = skip_sexp(text, pos, end, Direction::Forward)?;
        } else if is_quote(ch) {
            pos = skip_quoted_forward(text, pos, end + 1) + 1;
        } else {
            pos += 1;
        }
    }
}
