//! Skipping over quoted literals.

use super::brackets::is_quote;
use super::source::TextSource;

/// Scan forward from the opening quote at `start` to its closing quote.
///
/// A quote preceded by an odd run of backslashes is escaped. Returns the
/// offset of the closing quote, or `limit` if the literal is not closed
/// before `limit`.
pub fn skip_quoted_forward<T: TextSource + ?Sized>(text: &T, start: usize, limit: usize) -> usize {
    debug_assert!(start < limit);
    debug_assert!(is_quote(text.char_at(start)));
    let quote = text.char_at(start);
    let mut escaped = false;
    let mut i = start + 1;

    while i < limit {
        let ch = text.char_at(i);
        if ch == quote && !escaped {
            break;
        }
        escaped = ch == '\\' && !escaped;
        i += 1;
    }
    i
}

/// Scan backward from the closing quote at `start` to its opening quote.
///
/// Only the single preceding character is checked for a backslash, so
/// `"\\"` read backwards looks escaped. Returns the offset of the opening
/// quote, or `limit` if none is found after `limit`.
pub fn skip_quoted_backward<T: TextSource + ?Sized>(text: &T, start: usize, limit: usize) -> usize {
    debug_assert!(start > limit);
    debug_assert!(is_quote(text.char_at(start)));
    let quote = text.char_at(start);
    let mut i = start - 1;

    while i > limit {
        if text.char_at(i) == quote && text.char_at(i - 1) != '\\' {
            break;
        }
        i -= 1;
    }
    i
}
