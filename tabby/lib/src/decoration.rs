use bitflags::bitflags;

bitflags! {
    /// Which lines of a table are drawn.
    ///
    /// ```
    /// use tabby::Decorations;
    ///
    /// let deco = Decorations::BORDER | Decorations::HEADER;
    /// assert!(deco.contains(Decorations::BORDER));
    /// assert!(!deco.contains(Decorations::HLINES));
    /// assert_eq!(Decorations::default(), Decorations::all());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Decorations: u8 {
        /// The outer border around the whole table.
        const BORDER = 0b0001;
        /// The line between the header and the first row.
        const HEADER = 0b0010;
        /// Lines between data rows.
        const HLINES = 0b0100;
        /// Lines between columns.
        const VLINES = 0b1000;
    }
}

impl Default for Decorations {
    fn default() -> Self {
        Decorations::all()
    }
}

impl Decorations {
    /// Whether the outer border is drawn.
    #[inline]
    pub fn has_border(self) -> bool {
        self.contains(Decorations::BORDER)
    }

    /// Whether the header separator is drawn.
    #[inline]
    pub fn has_header_line(self) -> bool {
        self.contains(Decorations::HEADER)
    }

    /// Whether separators are drawn between data rows.
    #[inline]
    pub fn has_hlines(self) -> bool {
        self.contains(Decorations::HLINES)
    }

    /// Whether separators are drawn between columns.
    #[inline]
    pub fn has_vlines(self) -> bool {
        self.contains(Decorations::VLINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let deco = Decorations::default();
        assert!(deco.has_border() && deco.has_header_line() && deco.has_hlines() && deco.has_vlines());
    }

    #[test]
    fn test_parse_flag_names() {
        let deco: Decorations = bitflags::parser::from_str("BORDER | VLINES").unwrap();
        assert!(deco.has_border() && deco.has_vlines());
        assert!(!deco.has_hlines());
    }
}
