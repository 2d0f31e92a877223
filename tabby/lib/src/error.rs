use thiserror::Error;

/// Errors returned while building or drawing a [`Table`](crate::Table).
///
/// Every error fails the triggering call as a whole: a setter that errors
/// leaves the table untouched and `draw` never returns partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A header, row or per-column setting has the wrong number of cells.
    #[error("row has {actual} cells but the table has {expected} columns")]
    ShapeMismatch {
        /// The table's established column count.
        expected: usize,
        /// The number of cells provided.
        actual: usize,
    },
    /// A named border style does not exist.
    #[error("unknown table style '{name}' (valid styles: {})", .valid.join(", "))]
    UnknownStyle {
        /// The requested style name.
        name: String,
        /// Every registered style name.
        valid: Vec<&'static str>,
    },
    /// An explicit glyph list is neither the 4-glyph shorthand nor the full table.
    #[error("a table style needs either 4 or 15 glyphs, got {actual}")]
    GlyphCount {
        /// The number of glyphs provided.
        actual: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
    /// The maximum width cannot fit one cell per column plus decorations.
    #[error("max width {max_width} is too small to render the table (needs at least {minimum})")]
    WidthTooSmall {
        /// The configured maximum width.
        max_width: usize,
        /// The smallest maximum width that can be rendered.
        minimum: usize,
    },
}

impl TableError {
    /// Whether the error came from an invalid border style.
    pub fn is_invalid_style(&self) -> bool {
        matches!(self, TableError::UnknownStyle { .. } | TableError::GlyphCount { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
