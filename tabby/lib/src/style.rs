//! Border styles: the glyphs used to draw lines, corners and junctions.
//!
//! A [`BorderStyle`] always carries 15 glyph slots. Styles are resolved
//! from a [`StyleSpec`], which is either the name of a built-in style or an
//! explicit glyph list. Lists of 4 glyphs use the shorthand
//! `horizontal, vertical, corner, header horizontal`; lists of 15 glyphs fill
//! the slots in the order documented on [`BorderStyle::from_glyphs`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{Result, TableError};

/// Number of glyph slots in a full border style.
pub const GLYPH_SLOTS: usize = 15;

/// Number of glyphs in the shorthand form.
pub const SHORTHAND_GLYPHS: usize = 4;

/// The built-in border styles, in name order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum StyleName {
    /// `-`, `|` and `+`; the header line uses `-` too.
    Ascii,
    /// `-`, `|` and `+` with `=` under the header.
    #[strum(serialize = "ascii2")]
    #[serde(rename = "ascii2")]
    Ascii2,
    /// Thick box-drawing lines. Also accepted as `heavy`.
    #[strum(to_string = "bold", serialize = "heavy")]
    #[serde(alias = "heavy")]
    Bold,
    /// Double box-drawing lines.
    Double,
    /// Thin box-drawing lines.
    #[default]
    Light,
    /// Thin lines with a double line under the header.
    #[strum(serialize = "light2")]
    #[serde(rename = "light2")]
    Light2,
    /// No glyphs and no horizontal lines at all.
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    Blank,
    /// No glyphs; separator lines are kept as empty lines.
    #[strum(serialize = "none2")]
    #[serde(rename = "none2")]
    Blank2,
    /// Thin lines with rounded corners.
    Round,
    /// Rounded corners with a double line under the header.
    #[strum(serialize = "round2")]
    #[serde(rename = "round2")]
    Round2,
}

impl StyleName {
    /// The full glyph table for this style, in slot order.
    const fn glyphs(self) -> [&'static str; GLYPH_SLOTS] {
        match self {
            StyleName::Ascii => [
                "-", "|", "+", "+", "+", "+", "+", "+", "+", "+", "+", "-", "+", "+", "+",
            ],
            StyleName::Ascii2 => [
                "-", "|", "+", "+", "+", "+", "+", "+", "+", "+", "+", "=", "+", "+", "+",
            ],
            StyleName::Bold => [
                "━", "┃", "┏", "┓", "┗", "┛", "┣", "┫", "┳", "┻", "╋", "━", "┣", "┫", "╋",
            ],
            StyleName::Double => [
                "═", "║", "╔", "╗", "╚", "╝", "╠", "╣", "╦", "╩", "╬", "═", "╠", "╣", "╬",
            ],
            StyleName::Light => [
                "─", "│", "┌", "┐", "└", "┘", "├", "┤", "┬", "┴", "┼", "─", "├", "┤", "┼",
            ],
            StyleName::Light2 => [
                "─", "│", "┌", "┐", "└", "┘", "├", "┤", "┬", "┴", "┼", "═", "╞", "╡", "╪",
            ],
            StyleName::Blank | StyleName::Blank2 => [""; GLYPH_SLOTS],
            StyleName::Round => [
                "─", "│", "╭", "╮", "╰", "╯", "├", "┤", "┬", "┴", "┼", "─", "├", "┤", "┼",
            ],
            StyleName::Round2 => [
                "─", "│", "╭", "╮", "╰", "╯", "├", "┤", "┬", "┴", "┼", "═", "╞", "╡", "╪",
            ],
        }
    }

    /// Every built-in style name, sorted.
    pub fn all() -> Vec<&'static str> {
        StyleName::iter().map(Into::into).collect()
    }
}

/// Either a built-in style name or an explicit glyph list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleSpec {
    Named(String),
    Glyphs(Vec<String>),
}

impl From<&str> for StyleSpec {
    fn from(name: &str) -> Self {
        StyleSpec::Named(name.to_string())
    }
}

impl From<String> for StyleSpec {
    fn from(name: String) -> Self {
        StyleSpec::Named(name)
    }
}

impl From<StyleName> for StyleSpec {
    fn from(name: StyleName) -> Self {
        StyleSpec::Named(name.to_string())
    }
}

impl From<Vec<String>> for StyleSpec {
    fn from(glyphs: Vec<String>) -> Self {
        StyleSpec::Glyphs(glyphs)
    }
}

impl From<Vec<&str>> for StyleSpec {
    fn from(glyphs: Vec<&str>) -> Self {
        StyleSpec::Glyphs(glyphs.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StyleSpec {
    fn from(glyphs: [&str; N]) -> Self {
        StyleSpec::Glyphs(glyphs.iter().map(|g| g.to_string()).collect())
    }
}

/// The 15 glyph slots of a border style, plus whether horizontal lines
/// are drawn at all.
///
/// Tees are named after the edge they sit on: a `left_tee` joins the left
/// border to a row separator (north, south and east arms), a `top_tee`
/// joins the top border to a column separator (south, east and west arms).
/// The `header_*` slots are only used by the line under the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderStyle {
    pub horizontal: Cow<'static, str>,
    pub vertical: Cow<'static, str>,
    pub top_left: Cow<'static, str>,
    pub top_right: Cow<'static, str>,
    pub bottom_left: Cow<'static, str>,
    pub bottom_right: Cow<'static, str>,
    pub left_tee: Cow<'static, str>,
    pub right_tee: Cow<'static, str>,
    pub top_tee: Cow<'static, str>,
    pub bottom_tee: Cow<'static, str>,
    pub cross: Cow<'static, str>,
    pub header_horizontal: Cow<'static, str>,
    pub header_left_tee: Cow<'static, str>,
    pub header_right_tee: Cow<'static, str>,
    pub header_cross: Cow<'static, str>,
    /// `false` drops every horizontal line, borders included.
    pub hlines: bool,
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::named(StyleName::default())
    }
}

impl BorderStyle {
    /// Resolves a style name or glyph list into a full glyph table.
    ///
    /// ## Errors
    ///
    /// - [`TableError::UnknownStyle`] when a name is not a built-in style
    /// - [`TableError::GlyphCount`] when a glyph list has neither 4 nor 15 entries
    ///
    /// ## Examples
    ///
    /// ```
    /// use tabby::style::BorderStyle;
    ///
    /// let style = BorderStyle::resolve("bold").unwrap();
    /// assert_eq!(style.top_left, "┏");
    ///
    /// let style = BorderStyle::resolve("light2").unwrap();
    /// assert_eq!(style.header_cross, "╪");
    ///
    /// let style = BorderStyle::resolve(["-", "|", "+", "="]).unwrap();
    /// assert_eq!(style.cross, "+");
    /// assert_eq!(style.header_horizontal, "=");
    /// ```
    pub fn resolve(spec: impl Into<StyleSpec>) -> Result<Self> {
        match spec.into() {
            StyleSpec::Named(name) => name
                .parse::<StyleName>()
                .map(BorderStyle::named)
                .map_err(|_| TableError::UnknownStyle {
                    name,
                    valid: StyleName::all(),
                }),
            StyleSpec::Glyphs(glyphs) => BorderStyle::from_glyphs(glyphs),
        }
    }

    /// The glyph table of a built-in style.
    pub fn named(name: StyleName) -> Self {
        let mut style = BorderStyle::from_slots(name.glyphs().map(Cow::Borrowed));
        style.hlines = name != StyleName::Blank;
        style
    }

    /// Builds a style from an explicit glyph list.
    ///
    /// A 15-glyph list fills the slots in this order: horizontal, vertical,
    /// top-left, top-right, bottom-left, bottom-right, left tee, right tee,
    /// top tee, bottom tee, cross, header horizontal, header left tee,
    /// header right tee, header cross. For the light style that is
    /// `─│┌┐└┘├┤┬┴┼─├┤┼`.
    ///
    /// A 4-glyph list is `horizontal, vertical, corner, header horizontal`;
    /// the corner glyph fills every corner and junction slot.
    ///
    /// ```
    /// use tabby::style::BorderStyle;
    ///
    /// let style = BorderStyle::from_glyphs("─│┌┐└┘├┤┬┴┼═╞╡╪".chars().map(String::from)).unwrap();
    /// assert_eq!((style.left_tee.as_ref(), style.top_tee.as_ref()), ("├", "┬"));
    /// assert_eq!(style.header_cross, "╪");
    /// ```
    pub fn from_glyphs<I, S>(glyphs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<Cow<'static, str>> =
            glyphs.into_iter().map(|g| Cow::Owned(g.into())).collect();

        let slots: [Cow<'static, str>; GLYPH_SLOTS] = match glyphs.len() {
            SHORTHAND_GLYPHS => {
                let [h, v, corner, header]: [Cow<'static, str>; SHORTHAND_GLYPHS] = glyphs
                    .try_into()
                    .map_err(|g: Vec<_>| TableError::GlyphCount { actual: g.len() })?;
                let c = || corner.clone();
                [
                    h,
                    v,
                    c(),
                    c(),
                    c(),
                    c(),
                    c(),
                    c(),
                    c(),
                    c(),
                    c(),
                    header,
                    c(),
                    c(),
                    c(),
                ]
            }
            GLYPH_SLOTS => glyphs
                .try_into()
                .map_err(|g: Vec<_>| TableError::GlyphCount { actual: g.len() })?,
            actual => return Err(TableError::GlyphCount { actual }),
        };

        Ok(BorderStyle::from_slots(slots))
    }

    fn from_slots(slots: [Cow<'static, str>; GLYPH_SLOTS]) -> Self {
        let [h, v, tl, tr, bl, br, lt, rt, tt, bt, x, hh, hl, hr, hx] = slots;
        BorderStyle {
            horizontal: h,
            vertical: v,
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
            left_tee: lt,
            right_tee: rt,
            top_tee: tt,
            bottom_tee: bt,
            cross: x,
            header_horizontal: hh,
            header_left_tee: hl,
            header_right_tee: hr,
            header_cross: hx,
            hlines: true,
        }
    }

    /// The glyphs for one horizontal line of the table.
    pub(crate) fn line_glyphs(&self, line: LineKind) -> LineGlyphs<'_> {
        match line {
            LineKind::Top => LineGlyphs {
                fill: &self.horizontal,
                left: &self.top_left,
                junction: &self.top_tee,
                right: &self.top_right,
            },
            LineKind::Middle => LineGlyphs {
                fill: &self.horizontal,
                left: &self.left_tee,
                junction: &self.cross,
                right: &self.right_tee,
            },
            LineKind::Header => LineGlyphs {
                fill: &self.header_horizontal,
                left: &self.header_left_tee,
                junction: &self.header_cross,
                right: &self.header_right_tee,
            },
            LineKind::Bottom => LineGlyphs {
                fill: &self.horizontal,
                left: &self.bottom_left,
                junction: &self.bottom_tee,
                right: &self.bottom_right,
            },
        }
    }
}

/// Which horizontal line is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Top,
    Middle,
    Header,
    Bottom,
}

/// The four glyphs a horizontal line is made of.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineGlyphs<'a> {
    pub fill: &'a str,
    pub left: &'a str,
    pub junction: &'a str,
    pub right: &'a str,
}
