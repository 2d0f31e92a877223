//! Horizontal and vertical alignment of cell content.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::width::display_width;

/// Horizontal alignment of a cell's lines within its column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    #[strum(to_string = "left", serialize = "l")]
    #[serde(alias = "l")]
    Left,
    #[strum(to_string = "center", serialize = "c")]
    #[serde(alias = "c")]
    Center,
    #[strum(to_string = "right", serialize = "r")]
    #[serde(alias = "r")]
    Right,
}

impl HorizontalAlign {
    /// Pads `line` with spaces to fill `width` display columns.
    ///
    /// Centered text puts the odd space on the right. Lines already wider
    /// than `width` are returned as they are.
    pub fn pad(self, line: &str, width: usize) -> String {
        let fill = width.saturating_sub(display_width(line));
        let (left, right) = match self {
            HorizontalAlign::Left => (0, fill),
            HorizontalAlign::Right => (fill, 0),
            HorizontalAlign::Center => (fill / 2, fill - fill / 2),
        };

        let mut out = String::with_capacity(line.len() + fill);
        out.extend(std::iter::repeat_n(' ', left));
        out.push_str(line);
        out.extend(std::iter::repeat_n(' ', right));
        out
    }
}

/// Vertical alignment of a cell within a row taller than the cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    #[strum(to_string = "top", serialize = "t")]
    #[serde(alias = "t")]
    Top,
    #[strum(to_string = "middle", serialize = "m")]
    #[serde(alias = "m")]
    Middle,
    #[strum(to_string = "bottom", serialize = "b")]
    #[serde(alias = "b")]
    Bottom,
}
