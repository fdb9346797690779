//! Argument-based selection ranges.

use std::ops::Range;

use tower_lsp::lsp_types::{self, Position, SelectionRange};

use crate::document::LineIndex;
use crate::settings::SelectionOptions;
use crate::textobj::{ArgBoundsFinder, TextSource};

/// Selection range chains for each requested position.
///
/// Each chain runs innermost first: the inner argument, its outer range,
/// then the same for every enclosing argument list up to `options.levels`.
/// Positions not inside an argument get an empty range at the position.
pub fn selection_ranges(
    line_index: &LineIndex,
    positions: &[Position],
    options: &SelectionOptions,
) -> Vec<SelectionRange> {
    positions
        .iter()
        .map(|&position| {
            let spans = line_index
                .position_to_offset(position)
                .map(|offset| argument_spans(line_index, offset, options))
                .unwrap_or_default();
            to_selection_range(line_index, position, &spans)
        })
        .collect()
}

/// Nested argument spans around `offset`, innermost first.
///
/// Every span strictly contains the previous one.
pub fn argument_spans<T: TextSource + ?Sized>(
    text: &T,
    offset: usize,
    options: &SelectionOptions,
) -> Vec<Range<usize>> {
    let finder = ArgBoundsFinder::new(text);
    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut position = Some(offset);

    for _ in 0..options.levels {
        let Some(pos) = position else {
            break;
        };
        let Ok(bounds) = finder.find_bounds_at(pos) else {
            break;
        };

        push_enclosing(&mut spans, finder.adjust_inner(bounds).range());
        if options.include_outer {
            push_enclosing(&mut spans, finder.adjust_outer(bounds).range());
        }
        // Resolving just before the list's bracket lands in the enclosing list.
        position = bounds.left_bracket.checked_sub(1);
    }

    spans
}

fn push_enclosing(spans: &mut Vec<Range<usize>>, span: Range<usize>) {
    let grows = spans.last().map_or(true, |last| {
        span.start <= last.start && span.end >= last.end && span != *last
    });
    if grows {
        spans.push(span);
    }
}

fn to_selection_range(
    line_index: &LineIndex,
    position: Position,
    spans: &[Range<usize>],
) -> SelectionRange {
    let mut chain: Option<SelectionRange> = None;
    for span in spans.iter().rev() {
        chain = Some(SelectionRange {
            range: line_index.span_to_range(span),
            parent: chain.map(Box::new),
        });
    }
    chain.unwrap_or(SelectionRange {
        range: lsp_types::Range::new(position, position),
        parent: None,
    })
}
