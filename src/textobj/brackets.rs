//! Bracket and quote character classes.

/// Quote characters that delimit opaque literals.
const QUOTES: [char; 2] = ['"', '\''];

/// Open brackets ordered by rank; index `i` pairs with `CLOSE_BRACKETS[i]`.
const OPEN_BRACKETS: [char; 4] = ['[', '{', '(', '<'];

/// Close brackets ordered by rank; index `i` pairs with `OPEN_BRACKETS[i]`.
const CLOSE_BRACKETS: [char; 4] = [']', '}', ')', '>'];

pub fn is_open_bracket(ch: char) -> bool {
    OPEN_BRACKETS.contains(&ch)
}

pub fn is_close_bracket(ch: char) -> bool {
    CLOSE_BRACKETS.contains(&ch)
}

pub fn is_quote(ch: char) -> bool {
    QUOTES.contains(&ch)
}

/// The bracket that pairs with `ch`.
///
/// # Panics
///
/// Panics if `ch` is not a bracket character.
pub fn matching_bracket(ch: char) -> char {
    if let Some(idx) = CLOSE_BRACKETS.iter().position(|&c| c == ch) {
        return OPEN_BRACKETS[idx];
    }
    match OPEN_BRACKETS.iter().position(|&c| c == ch) {
        Some(idx) => CLOSE_BRACKETS[idx],
        None => panic!("matching_bracket called on non-bracket {ch:?}"),
    }
}

/// Rank of a bracket: its index in the canonical ordering `[ { ( <`.
///
/// A higher rank is weaker. When two unpaired brackets of different kinds
/// meet, the one with the higher rank is assumed not to be a bracket at all
/// (think `<` used as a comparison operator). Returns `None` for
/// non-brackets.
pub fn bracket_priority(ch: char) -> Option<usize> {
    OPEN_BRACKETS
        .iter()
        .position(|&c| c == ch)
        .or_else(|| CLOSE_BRACKETS.iter().position(|&c| c == ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_brackets() {
        for ch in ['(', '[', '{', '<'] {
            assert!(is_open_bracket(ch));
            assert!(!is_close_bracket(ch));
        }
        for ch in [')', ']', '}', '>'] {
            assert!(is_close_bracket(ch));
            assert!(!is_open_bracket(ch));
        }
        assert!(!is_open_bracket('a'));
        assert!(!is_close_bracket(','));
    }

    #[test]
    fn pairs_both_ways() {
        assert_eq!(matching_bracket('('), ')');
        assert_eq!(matching_bracket(')'), '(');
        assert_eq!(matching_bracket('<'), '>');
        assert_eq!(matching_bracket(']'), '[');
    }

    #[test]
    #[should_panic(expected = "non-bracket")]
    fn pairing_a_non_bracket_panics() {
        matching_bracket('x');
    }

    #[test]
    fn open_and_close_share_rank() {
        assert_eq!(bracket_priority('['), Some(0));
        assert_eq!(bracket_priority('}'), Some(1));
        assert_eq!(bracket_priority('('), bracket_priority(')'));
        assert_eq!(bracket_priority('>'), Some(3));
        assert_eq!(bracket_priority('"'), None);
    }

    #[test]
    fn quotes() {
        assert!(is_quote('"'));
        assert!(is_quote('\''));
        assert!(!is_quote('`'));
    }
}
