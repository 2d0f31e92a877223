//! Table settings that can be loaded from YAML or JSON.

use serde::{Deserialize, Serialize};

use crate::align::{HorizontalAlign, VerticalAlign};
use crate::decoration::Decorations;
use crate::error::Result;
use crate::format::ColumnType;
use crate::style::StyleSpec;
use crate::table::Table;

/// Render settings for a [`Table`]. Every field is optional; absent fields
/// leave the table's current setting alone.
///
/// ## Examples
///
/// ```
/// use tabby::{Table, TableConfig};
///
/// let config: TableConfig = serde_json::from_str(r#"{
///     "style": "ascii",
///     "decorations": "BORDER | VLINES",
///     "align": ["l", "r"]
/// }"#).unwrap();
///
/// let mut table = Table::new();
/// table.apply_config(&config)?.add_row(["a", "1"])?;
/// assert_eq!(table.draw()?.unwrap(), "+---+---+\n| a | 1 |\n+---+---+");
/// # Ok::<(), tabby::TableError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// A style name or a list of 4 or 15 glyphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Decorations>,
    /// `0` removes the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_align: Option<Vec<HorizontalAlign>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Vec<HorizontalAlign>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<Vec<VerticalAlign>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<Vec<ColumnType>>,
    /// Fixed column widths; `null` entries size from content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Vec<Option<usize>>>,
}

impl TableConfig {
    /// Applies the present settings one after another.
    ///
    /// Stops at the first error, so callers wanting all-or-nothing should
    /// go through [`Table::apply_config`].
    pub(crate) fn apply_to(&self, table: &mut Table) -> Result<()> {
        if let Some(style) = &self.style {
            table.set_style(style.clone())?;
        }
        if let Some(decorations) = self.decorations {
            table.set_decorations(decorations)?;
        }
        if let Some(max_width) = self.max_width {
            table.set_max_width(max_width)?;
        }
        if let Some(padding) = self.padding {
            table.set_padding(padding)?;
        }
        if let Some(precision) = self.precision {
            table.set_precision(precision)?;
        }
        if let Some(align) = &self.header_align {
            table.set_header_align(align.iter().copied())?;
        }
        if let Some(align) = &self.align {
            table.set_cols_align(align.iter().copied())?;
        }
        if let Some(valign) = &self.valign {
            table.set_cols_valign(valign.iter().copied())?;
        }
        if let Some(dtype) = &self.dtype {
            table.set_cols_dtype(dtype.iter().cloned())?;
        }
        if let Some(width) = &self.width {
            table.set_cols_width(width.iter().copied())?;
        }
        Ok(())
    }
}
