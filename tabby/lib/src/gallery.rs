//! Sample renders of the built-in border styles.

use strum::IntoEnumIterator;

use crate::align::HorizontalAlign;
use crate::error::Result;
use crate::style::StyleName;
use crate::table::Table;

/// Styles shown side by side on one gallery row.
const GALLERY_COLUMNS: usize = 4;

/// Maximum width of the gallery.
const GALLERY_WIDTH: usize = 120;

/// A small two-column table drawn in `style`.
///
/// ```
/// use tabby::{StyleName, gallery::example_table};
///
/// let sample = example_table(StyleName::Ascii2, 1)?;
/// assert_eq!(sample.lines().nth(2), Some("+=====+=====+"));
/// # Ok::<(), tabby::TableError>(())
/// ```
pub fn example_table(style: StyleName, padding: usize) -> Result<String> {
    let mut table = Table::new();
    table
        .set_style(style)?
        .set_padding(padding)?
        .add_rows([["Hd1", "Hd2"], ["Ce1", "Ce2"], ["Ce3", "Ce4"]], true)?;
    Ok(table.draw()?.unwrap_or_default())
}

/// Every built-in style, four to a row, each name above its example table.
pub fn style_gallery() -> Result<String> {
    let styles: Vec<StyleName> = StyleName::iter().collect();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (i, chunk) in styles.chunks(GALLERY_COLUMNS).enumerate() {
        if i > 0 {
            rows.push(vec![String::new(); GALLERY_COLUMNS]);
        }
        let mut names = vec![String::new(); GALLERY_COLUMNS];
        let mut samples = vec![String::new(); GALLERY_COLUMNS];
        for ((name, sample), style) in names.iter_mut().zip(&mut samples).zip(chunk) {
            *name = style.to_string();
            *sample = example_table(*style, 1)?;
        }
        rows.push(names);
        rows.push(samples);
    }

    let mut gallery = Table::new();
    gallery
        .set_style(StyleName::Blank)?
        .set_max_width(GALLERY_WIDTH)?
        .set_cols_align([HorizontalAlign::Center; GALLERY_COLUMNS])?
        .add_rows(rows, false)?;
    Ok(gallery.draw()?.unwrap_or_default())
}
