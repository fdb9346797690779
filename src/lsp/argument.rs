//! The `argsel/argumentRange` request.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Position, Range, TextDocumentIdentifier};

use crate::document::LineIndex;
use crate::textobj::{argument_range, ArgumentError, ArgumentScope};

/// Method name of the custom argument-range request.
pub const ARGUMENT_RANGE_METHOD: &str = "argsel/argumentRange";

/// Parameters of `argsel/argumentRange`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRangeParams {
    pub text_document: TextDocumentIdentifier,
    pub position: Position,
    /// Number of consecutive arguments to cover; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default)]
    pub scope: ArgumentScope,
}

/// LSP range covering `count` arguments starting at `position`.
pub fn argument_range_at(
    line_index: &LineIndex,
    position: Position,
    count: usize,
    scope: ArgumentScope,
) -> Result<Range, ArgumentError> {
    let offset = line_index
        .position_to_offset(position)
        .ok_or(ArgumentError::NotInsideArgumentList)?;
    let span = argument_range(line_index, offset, count, scope)?;
    Ok(line_index.span_to_range(&span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_with_defaults() {
        let params: ArgumentRangeParams = serde_json::from_str(
            r#"{"textDocument":{"uri":"file:///a.rs"},"position":{"line":0,"character":4}}"#,
        )
        .unwrap();
        assert_eq!(params.count, None);
        assert_eq!(params.scope, ArgumentScope::Inner);
        assert_eq!(params.position, Position::new(0, 4));
    }

    #[test]
    fn params_deserialize_outer_scope() {
        let params: ArgumentRangeParams = serde_json::from_str(
            r#"{"textDocument":{"uri":"file:///a.rs"},"position":{"line":1,"character":0},"count":2,"scope":"outer"}"#,
        )
        .unwrap();
        assert_eq!(params.count, Some(2));
        assert_eq!(params.scope, ArgumentScope::Outer);
    }

    #[test]
    fn range_on_second_line() {
        let idx = LineIndex::new("call(\n  first,\n  second)".to_string());
        let range = argument_range_at(&idx, Position::new(2, 4), 1, ArgumentScope::Inner).unwrap();
        assert_eq!(range, Range::new(Position::new(2, 2), Position::new(2, 8)));
    }

    #[test]
    fn line_out_of_bounds() {
        let idx = LineIndex::new("f(a)".to_string());
        assert_eq!(
            argument_range_at(&idx, Position::new(3, 0), 1, ArgumentScope::Inner),
            Err(ArgumentError::NotInsideArgumentList)
        );
    }
}
