//! Wrapping formatted cell text into physical lines.

use tracing::trace;

use crate::align::VerticalAlign;
use crate::width::expand_tabs;

/// Wraps a cell's text to `width` display columns.
///
/// Explicit newlines always start a new physical line, and blank lines are
/// kept as empty lines. Every other line has its tabs expanded and is
/// word-wrapped; escape sequences take no room when measuring, and words
/// longer than the column are broken.
///
/// ## Examples
///
/// ```
/// use tabby::wrap::wrap_cell;
///
/// assert_eq!(wrap_cell("hello world", 5), vec!["hello", "world"]);
/// assert_eq!(wrap_cell("a\n\nb", 5), vec!["a", "", "b"]);
/// ```
pub fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let lines: Vec<String> = text
        .split('\n')
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(&expand_tabs(line), width)
                    .into_iter()
                    .map(|wrapped| wrapped.into_owned())
                    .collect()
            }
        })
        .collect();

    trace!(width, lines = lines.len(), "wrapped cell");
    lines
}

/// Pads a cell's lines with blank lines until it is `height` lines tall.
///
/// Top-aligned cells get the blank lines below, bottom-aligned cells above;
/// middle-aligned cells split them, with the odd line going below.
///
/// ```
/// use tabby::{VerticalAlign, wrap::pad_to_height};
///
/// let lines = vec!["x".to_string()];
/// assert_eq!(pad_to_height(lines, 4, VerticalAlign::Middle), vec!["", "x", "", ""]);
/// ```
pub fn pad_to_height(mut lines: Vec<String>, height: usize, valign: VerticalAlign) -> Vec<String> {
    let missing = height.saturating_sub(lines.len());
    if missing == 0 {
        return lines;
    }

    let above = match valign {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => missing / 2,
        VerticalAlign::Bottom => missing,
    };
    let below = missing - above;

    lines.splice(0..0, std::iter::repeat_n(String::new(), above));
    lines.extend(std::iter::repeat_n(String::new(), below));
    lines
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::width::display_width;
    use proptest::prelude::*;

    proptest! {
        /// Property: no wrapped line is wider than the column
        #[test]
        fn wrapped_lines_fit(text in "[a-z]{1,10}( {1,3}[a-z]{1,12}){0,8}", width in 1usize..30) {
            for line in wrap_cell(&text, width) {
                prop_assert!(display_width(&line) <= width, "{:?} wider than {}", line, width);
            }
        }

        /// Property: wrapping never loses visible characters
        #[test]
        fn wrapping_keeps_words(text in "[a-z]{1,8}( [a-z]{1,8}){0,8}", width in 1usize..20) {
            let joined: String = wrap_cell(&text, width).concat();
            let expected: String = text.split(' ').collect();
            prop_assert_eq!(joined.replace(' ', ""), expected);
        }

        /// Property: padding always yields exactly the requested height
        #[test]
        fn padding_reaches_height(count in 0usize..5, extra in 0usize..5) {
            let lines = vec!["x".to_string(); count];
            for valign in [VerticalAlign::Top, VerticalAlign::Middle, VerticalAlign::Bottom] {
                prop_assert_eq!(pad_to_height(lines.clone(), count + extra, valign).len(), count + extra);
            }
        }
    }
}
