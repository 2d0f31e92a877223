//! Escape-code-aware display width measurement.
//!
//! Everything that decides how wide a cell is goes through this module so
//! that styling embedded in cell content never changes the layout:
//!
//! - [`display_width`] strips escape sequences and sums the terminal cells
//!   each remaining code point occupies (wide characters count as 2)
//! - [`intrinsic_width`] measures the natural width of a multi-line cell,
//!   honoring tab stops
//! - [`expand_tabs`] turns tabs into spaces using the same tab stops

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Distance between two tab stops.
pub const TAB_STOP: usize = 8;

/// Regex pattern for ANSI escape sequences.
///
/// Matches:
/// - CSI sequences: `\x1b[` followed by parameter bytes, intermediate bytes, and final byte
/// - OSC sequences: `\x1b]` followed by content until BEL (\x07) or ST (\x1b\\)
/// - Other escape sequences: `\x1b` followed by single character
static ANSI_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\x1b\[[\x30-\x3f]*[\x20-\x2f]*[\x40-\x7e]", // CSI sequences
        r"|\x1b\].*?(?:\x07|\x1b\\)",                  // OSC sequences (BEL or ST terminator)
        r"|\x1b[\x20-\x2f]*[\x40-\x5f]",               // Other escape sequences (Fe)
    ))
    .expect("Invalid ANSI escape regex")
});

/// Strip all ANSI escape sequences from text.
///
/// Borrows the input untouched when it contains no escape sequences.
///
/// ## Examples
///
/// ```
/// use tabby::width::strip_escape_codes;
///
/// assert_eq!(strip_escape_codes("\x1b[31mred\x1b[0m"), "red");
/// assert_eq!(strip_escape_codes("plain"), "plain");
/// ```
pub fn strip_escape_codes(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    ANSI_ESCAPE_RE.replace_all(text, "")
}

/// Detects if the content contains any ANSI escape sequences.
pub fn has_escape_codes(text: &str) -> bool {
    ANSI_ESCAPE_RE.is_match(text)
}

/// Returns the number of terminal cells `text` occupies.
///
/// Escape sequences are removed first. Each remaining code point then
/// contributes 0 (zero-width and combining marks, control characters),
/// 2 (wide and full-width characters) or 1 cell.
///
/// ## Examples
///
/// ```
/// use tabby::width::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("\x1b[1;33mwarning\x1b[0m"), 7);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(text: &str) -> usize {
    strip_escape_codes(text)
        .chars()
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// Width of `line` once every tab is advanced to the next tab stop.
fn tabbed_line_width(line: &str) -> usize {
    let mut parts = line.split('\t').peekable();
    let mut width = 0;
    while let Some(part) = parts.next() {
        width += display_width(part);
        if parts.peek().is_some() {
            width = next_tab_stop(width);
        }
    }
    width
}

fn next_tab_stop(column: usize) -> usize {
    (column / TAB_STOP + 1) * TAB_STOP
}

/// Natural (unwrapped) width of a cell.
///
/// The cell is split on newlines; the widest line wins. Tabs advance to
/// the next multiple of [`TAB_STOP`].
///
/// ## Examples
///
/// ```
/// use tabby::width::intrinsic_width;
///
/// assert_eq!(intrinsic_width("ab\nabcd"), 4);
/// assert_eq!(intrinsic_width("ab\tc"), 9);
/// ```
pub fn intrinsic_width(cell: &str) -> usize {
    cell.split('\n').map(tabbed_line_width).max().unwrap_or(0)
}

/// Replaces each tab in `line` with enough spaces to reach the next tab stop.
///
/// Columns are counted in display cells, so escape sequences ahead of a tab
/// do not move it.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut column = 0;
    let mut parts = line.split('\t').peekable();
    while let Some(part) = parts.next() {
        out.push_str(part);
        column += display_width(part);
        if parts.peek().is_some() {
            let stop = next_tab_stop(column);
            out.extend(std::iter::repeat_n(' ', stop - column));
            column = stop;
        }
    }
    Cow::Owned(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: display_width should never panic on any input
        #[test]
        fn display_width_never_panics(s in ".*") {
            let _ = display_width(&s);
        }

        /// Property: SGR codes should not affect visual width
        #[test]
        fn sgr_codes_dont_affect_width(text in "[a-zA-Z你好 ]{0,20}", code in 0u8..108) {
            let styled = format!("\x1b[{}m{}\x1b[0m", code, text);
            prop_assert_eq!(display_width(&text), display_width(&styled));
        }

        /// Property: inserting escapes anywhere between characters keeps the width
        #[test]
        fn interleaved_escapes_dont_affect_width(
            text in "[a-z]{1,20}",
            at in 0usize..20,
            param in "[0-9;]{0,6}",
        ) {
            let at = at.min(text.len());
            let styled = format!("{}\x1b[{}m{}", &text[..at], param, &text[at..]);
            prop_assert_eq!(display_width(&text), display_width(&styled));
        }

        /// Property: plain ASCII text width should equal character count
        #[test]
        fn ascii_text_width_equals_length(s in "[a-zA-Z0-9 ]{0,100}") {
            prop_assert_eq!(display_width(&s), s.len());
        }

        /// Property: tab expansion lands every line on its intrinsic width
        #[test]
        fn expanded_tabs_match_intrinsic_width(s in "[a-z\t]{0,40}") {
            prop_assert_eq!(display_width(&expand_tabs(&s)), intrinsic_width(&s));
        }
    }
}
