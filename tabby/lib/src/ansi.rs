//! Keeps SGR styling intact across wrapped lines.
//!
//! Wrapping a styled cell can leave a color opened on one physical line and
//! closed several lines later. Table borders and neighbouring cells printed
//! in between would pick up that color. [`repair`] closes every style that
//! is still open at the end of a line and reopens it at the start of the
//! next one.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// The SGR sequence that turns every attribute off.
pub const RESET: &str = "\x1b[0m";

/// SGR (Select Graphic Rendition) sequences: `\x1b[<params>m`.
static SGR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;:]*m").expect("Invalid SGR regex"));

fn is_reset(sequence: &str) -> bool {
    let params = &sequence[2..sequence.len() - 1];
    params.chars().all(|c| c == '0' || c == ';')
}

/// The SGR sequences on `line` that are not followed by a reset, in order.
///
/// Returns an empty string when the line ends with all styling closed.
///
/// ```
/// use tabby::ansi::open_styles;
///
/// assert_eq!(open_styles("\x1b[1mbold\x1b[0m plain"), "");
/// assert_eq!(open_styles("\x1b[1mbold \x1b[31mred"), "\x1b[1m\x1b[31m");
/// ```
pub fn open_styles(line: &str) -> String {
    SGR_RE
        .find_iter(line)
        .fold(String::new(), |mut open, found| {
            if is_reset(found.as_str()) {
                open.clear();
            } else {
                open.push_str(found.as_str());
            }
            open
        })
}

/// Repairs the physical lines of one cell so no style leaks past a line end.
///
/// Walks the lines in order carrying the styles left open by the previous
/// line. Each line first gets those styles reapplied at its start; if it
/// still ends with styles open, a [`RESET`] is appended and the open styles
/// are carried to the next line.
///
/// ## Examples
///
/// ```
/// use tabby::ansi::repair;
///
/// let lines = vec!["\x1b[31mhello".to_string(), "world\x1b[0m".to_string()];
/// assert_eq!(
///     repair(lines),
///     vec!["\x1b[31mhello\x1b[0m", "\x1b[31mworld\x1b[0m"],
/// );
/// ```
pub fn repair<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .scan(String::new(), |pending, line| {
            let mut line = if pending.is_empty() {
                line
            } else {
                let mut reopened = std::mem::take(pending);
                reopened.push_str(&line);
                reopened
            };

            let open = open_styles(&line);
            if !open.is_empty() {
                trace!(?open, "closing styles at end of wrapped line");
                line.push_str(RESET);
                *pending = open;
            }
            Some(line)
        })
        .collect()
}
