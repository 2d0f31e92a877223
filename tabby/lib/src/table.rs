//! The [`Table`] type: accumulates a header and rows, then draws them.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::align::{HorizontalAlign, VerticalAlign};
use crate::ansi;
use crate::config::TableConfig;
use crate::decoration::Decorations;
use crate::error::{Result, TableError};
use crate::format::{ColumnType, format_cell};
use crate::layout::{self, WidthBudget};
use crate::style::{BorderStyle, LineKind, StyleSpec};
use crate::value::Value;
use crate::width::display_width;
use crate::wrap::{pad_to_height, wrap_cell};

/// Default maximum width of a rendered line.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Default number of digits after the decimal point.
pub const DEFAULT_PRECISION: usize = 3;

/// Settings that apply to a single column.
///
/// Unset alignments fall back to centered headers, left-aligned data and
/// top vertical alignment when the table is drawn.
#[derive(Debug, Clone, Default)]
pub struct ColumnConfig {
    pub header_align: Option<HorizontalAlign>,
    pub align: Option<HorizontalAlign>,
    pub valign: Option<VerticalAlign>,
    pub dtype: ColumnType,
    /// A fixed content width; `None` sizes the column from its content.
    pub width: Option<usize>,
}

/// A text table with an optional header, rows and render settings.
///
/// The number of columns is fixed by the first header, row or per-column
/// setting; every later call must agree with it.
///
/// ## Examples
///
/// ```
/// use tabby::Table;
///
/// let mut table = Table::new();
/// table
///     .set_style(["-", "|", "+", "-"])?
///     .header(["A", "B"])?
///     .add_row(["1", "2"])?;
///
/// assert_eq!(
///     table.draw()?.unwrap(),
///     "+---+---+\n| A | B |\n+---+---+\n| 1 | 2 |\n+---+---+"
/// );
/// # Ok::<(), tabby::TableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    header: Option<Vec<Value>>,
    rows: Vec<Vec<Value>>,
    columns: Option<Vec<ColumnConfig>>,
    style: BorderStyle,
    decorations: Decorations,
    max_width: Option<usize>,
    padding: usize,
    precision: usize,
    widths: OnceLock<Vec<usize>>,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            header: None,
            rows: Vec::new(),
            columns: None,
            style: BorderStyle::default(),
            decorations: Decorations::default(),
            max_width: Some(DEFAULT_MAX_WIDTH),
            padding: 1,
            precision: DEFAULT_PRECISION,
            widths: OnceLock::new(),
        }
    }
}

fn collect_values<I, V>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

impl Table {
    /// An empty table: light style, 80 columns wide, padding of 1.
    pub fn new() -> Self {
        Table::default()
    }

    /// A table filled from `rows`; with `has_header` the first row becomes
    /// the header.
    pub fn from_rows<R, I, V>(rows: R, has_header: bool) -> Result<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Table::new();
        table.add_rows(rows, has_header)?;
        Ok(table)
    }

    /// Number of columns, once established.
    pub fn column_count(&self) -> Option<usize> {
        self.columns.as_ref().map(Vec::len)
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn invalidate(&mut self) {
        self.widths.take();
    }

    /// Checks `len` against the column count, establishing it if unset.
    fn check_shape(&self, len: usize) -> Result<()> {
        match self.column_count() {
            Some(expected) if expected != len => Err(TableError::ShapeMismatch {
                expected,
                actual: len,
            }),
            _ => Ok(()),
        }
    }

    fn columns_mut(&mut self, len: usize) -> &mut Vec<ColumnConfig> {
        self.columns.get_or_insert_with(|| vec![ColumnConfig::default(); len])
    }

    /// Applies one value per column to the column configs.
    fn set_per_column<T>(
        &mut self,
        values: Vec<T>,
        apply: impl Fn(&mut ColumnConfig, T),
    ) -> Result<&mut Self> {
        self.check_shape(values.len())?;
        let columns = self.columns_mut(values.len());
        for (column, value) in columns.iter_mut().zip(values) {
            apply(column, value);
        }
        self.invalidate();
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Sets the border style from a style name or a 4/15 glyph list.
    pub fn set_style(&mut self, spec: impl Into<StyleSpec>) -> Result<&mut Self> {
        self.style = BorderStyle::resolve(spec)?;
        Ok(self)
    }

    /// Chooses which lines are drawn.
    pub fn set_decorations(&mut self, decorations: Decorations) -> Result<&mut Self> {
        self.decorations = decorations;
        self.invalidate();
        Ok(self)
    }

    /// Horizontal alignment of each header cell.
    pub fn set_header_align(
        &mut self,
        align: impl IntoIterator<Item = HorizontalAlign>,
    ) -> Result<&mut Self> {
        self.set_per_column(align.into_iter().collect(), |c, a| c.header_align = Some(a))
    }

    /// Horizontal alignment of each data column.
    pub fn set_cols_align(
        &mut self,
        align: impl IntoIterator<Item = HorizontalAlign>,
    ) -> Result<&mut Self> {
        self.set_per_column(align.into_iter().collect(), |c, a| c.align = Some(a))
    }

    /// Vertical alignment of each data column.
    pub fn set_cols_valign(
        &mut self,
        valign: impl IntoIterator<Item = VerticalAlign>,
    ) -> Result<&mut Self> {
        self.set_per_column(valign.into_iter().collect(), |c, v| c.valign = Some(v))
    }

    /// How the values of each column are formatted.
    pub fn set_cols_dtype(
        &mut self,
        dtype: impl IntoIterator<Item = ColumnType>,
    ) -> Result<&mut Self> {
        self.set_per_column(dtype.into_iter().collect(), |c, d| c.dtype = d)
    }

    /// Fixes the content width of columns.
    ///
    /// Accepts plain widths or `Option`s; `None` leaves a column sized by
    /// its content. Fixed widths are never shrunk to fit the max width;
    /// when they are wider than it allows, lines run past it.
    ///
    /// ## Errors
    ///
    /// [`TableError::InvalidConfig`] for a width of zero.
    pub fn set_cols_width<W>(&mut self, widths: impl IntoIterator<Item = W>) -> Result<&mut Self>
    where
        W: Into<Option<usize>>,
    {
        let widths: Vec<Option<usize>> = widths.into_iter().map(Into::into).collect();
        if widths.contains(&Some(0)) {
            return Err(TableError::InvalidConfig(
                "column widths must be positive".to_string(),
            ));
        }
        self.set_per_column(widths, |c, w| c.width = w)
    }

    /// Digits after the decimal point for fixed and exponential formats.
    pub fn set_precision(&mut self, precision: usize) -> Result<&mut Self> {
        self.precision = precision;
        self.invalidate();
        Ok(self)
    }

    /// Spaces between a cell's content and the lines around it.
    ///
    /// ## Errors
    ///
    /// [`TableError::InvalidConfig`] for a padding of zero.
    pub fn set_padding(&mut self, padding: usize) -> Result<&mut Self> {
        if padding == 0 {
            return Err(TableError::InvalidConfig(
                "padding must be positive".to_string(),
            ));
        }
        self.padding = padding;
        self.invalidate();
        Ok(self)
    }

    /// Maximum width of a rendered line; `0` removes the limit.
    pub fn set_max_width(&mut self, max_width: usize) -> Result<&mut Self> {
        self.max_width = (max_width > 0).then_some(max_width);
        self.invalidate();
        Ok(self)
    }

    /// Applies every setting present in `config`.
    ///
    /// Either every setting is applied or, on error, none is.
    pub fn apply_config(&mut self, config: &TableConfig) -> Result<&mut Self> {
        let mut next = self.clone();
        config.apply_to(&mut next)?;
        *self = next;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Sets the header row.
    pub fn header<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = collect_values(values);
        self.check_shape(values.len())?;
        self.columns_mut(values.len());
        self.header = Some(values);
        self.invalidate();
        Ok(self)
    }

    /// Appends a data row.
    pub fn add_row<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = collect_values(values);
        self.check_shape(values.len())?;
        self.columns_mut(values.len());
        self.rows.push(values);
        self.invalidate();
        Ok(self)
    }

    /// Appends several rows; with `has_header` the first one becomes the
    /// header instead.
    ///
    /// All rows are checked before any is added.
    pub fn add_rows<R, I, V>(&mut self, rows: R, has_header: bool) -> Result<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut rows: Vec<Vec<Value>> = rows.into_iter().map(collect_values).collect();
        let Some(first) = rows.first() else {
            return Ok(self);
        };

        let len = first.len();
        self.check_shape(len)?;
        if let Some(bad) = rows.iter().find(|row| row.len() != len) {
            return Err(TableError::ShapeMismatch {
                expected: len,
                actual: bad.len(),
            });
        }

        self.columns_mut(len);
        if has_header {
            self.header = Some(rows.remove(0));
        }
        self.rows.extend(rows);
        self.invalidate();
        Ok(self)
    }

    /// Replaces the header and every row.
    ///
    /// Without `has_header` the table is left without a header.
    pub fn set_rows<R, I, V>(&mut self, rows: R, has_header: bool) -> Result<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut next = self.clone();
        next.header = None;
        next.rows.clear();
        next.add_rows(rows, has_header)?;
        next.invalidate();
        *self = next;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Draws the table.
    ///
    /// Returns `Ok(None)` when there is neither a header nor any row. The
    /// output has no trailing newline.
    ///
    /// ## Errors
    ///
    /// [`TableError::WidthTooSmall`] when the max width cannot hold the
    /// columns and decorations.
    pub fn draw(&self) -> Result<Option<String>> {
        let Some(columns) = self.columns.as_deref() else {
            return Ok(None);
        };
        if self.header.is_none() && self.rows.is_empty() {
            return Ok(None);
        }

        let header: Option<Vec<String>> = self.header.as_ref().map(|values| {
            values
                .iter()
                .map(|value| format_cell(&ColumnType::Text, value, self.precision))
                .collect()
        });
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|values| {
                values
                    .iter()
                    .zip(columns)
                    .map(|(value, column)| format_cell(&column.dtype, value, self.precision))
                    .collect()
            })
            .collect();

        let widths = self.column_widths(columns, header.as_deref(), &rows)?;
        debug!(columns = columns.len(), rows = rows.len(), ?widths, "drawing table");

        let renderer = Renderer {
            style: &self.style,
            decorations: self.decorations,
            padding: self.padding,
            columns,
            widths: &widths,
        };

        let mut out = String::new();
        if self.decorations.has_border() {
            renderer.push_hline(&mut out, LineKind::Top);
        }
        if let Some(header) = &header {
            renderer.push_row(&mut out, header, true);
            if self.decorations.has_header_line() {
                renderer.push_hline(&mut out, LineKind::Header);
            }
        }
        for (i, row) in rows.iter().enumerate() {
            renderer.push_row(&mut out, row, false);
            if self.decorations.has_hlines() && i + 1 < rows.len() {
                renderer.push_hline(&mut out, LineKind::Middle);
            }
        }
        if self.decorations.has_border() {
            renderer.push_hline(&mut out, LineKind::Bottom);
        }

        if out.ends_with('\n') {
            out.pop();
        }
        Ok(Some(out))
    }

    fn column_widths(
        &self,
        columns: &[ColumnConfig],
        header: Option<&[String]>,
        rows: &[Vec<String>],
    ) -> Result<Vec<usize>> {
        if let Some(widths) = self.widths.get() {
            return Ok(widths.clone());
        }

        let fixed: Vec<Option<usize>> = columns.iter().map(|c| c.width).collect();
        let widths = layout::allocate(
            header,
            rows,
            WidthBudget {
                fixed: &fixed,
                max_width: self.max_width,
                decorations: self.decorations,
            },
        )?;
        Ok(self.widths.get_or_init(|| widths).clone())
    }
}

/// Borrowed view of everything needed to emit lines.
struct Renderer<'a> {
    style: &'a BorderStyle,
    decorations: Decorations,
    padding: usize,
    columns: &'a [ColumnConfig],
    widths: &'a [usize],
}

impl Renderer<'_> {
    fn push_hline(&self, out: &mut String, kind: LineKind) {
        if !self.style.hlines {
            return;
        }
        let glyphs = self.style.line_glyphs(kind);
        let junction = if self.decorations.has_vlines() {
            glyphs.junction
        } else {
            glyphs.fill
        };
        let pad = glyphs.fill.repeat(self.padding);

        if self.decorations.has_border() {
            out.push_str(glyphs.left);
            out.push_str(&pad);
        }
        for (i, width) in self.widths.iter().enumerate() {
            out.push_str(&glyphs.fill.repeat(*width));
            if i + 1 < self.widths.len() {
                out.push_str(&pad);
                out.push_str(junction);
                out.push_str(&pad);
            }
        }
        if self.decorations.has_border() {
            out.push_str(&pad);
            out.push_str(glyphs.right);
        }
        out.push('\n');
    }

    fn push_row(&self, out: &mut String, cells: &[String], is_header: bool) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(self.widths)
            .map(|(cell, &width)| ansi::repair(wrap_cell(cell, width)))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        let lines: Vec<Vec<String>> = wrapped
            .into_iter()
            .zip(self.columns)
            .map(|(lines, column)| {
                let valign = if is_header {
                    VerticalAlign::Top
                } else {
                    column.valign.unwrap_or_default()
                };
                pad_to_height(lines, height, valign)
            })
            .collect();

        let pad = " ".repeat(self.padding);
        let separator = if self.decorations.has_vlines() {
            &*self.style.vertical
        } else {
            " "
        };

        for line in 0..height {
            if self.decorations.has_border() {
                out.push_str(&self.style.vertical);
                out.push_str(&pad);
            }
            for (i, (cell, column)) in lines.iter().zip(self.columns).enumerate() {
                let align = if is_header {
                    column.header_align.unwrap_or(HorizontalAlign::Center)
                } else {
                    column.align.unwrap_or_default()
                };
                let text = &cell[line];
                if display_width(text) > self.widths[i] {
                    warn!(column = i, width = self.widths[i], %text, "cell overflows its column");
                }
                out.push_str(&align.pad(text, self.widths[i]));
                if i + 1 < self.columns.len() {
                    out.push_str(&pad);
                    out.push_str(separator);
                    out.push_str(&pad);
                }
            }
            if self.decorations.has_border() {
                out.push_str(&pad);
                out.push_str(&self.style.vertical);
            }
            out.push('\n');
        }
    }
}
