//! # tabby
//!
//! Text tables for the terminal that stay aligned when cells carry ANSI
//! color codes, tabs, newlines or wide characters.
//!
//! - **Escape-aware widths**: styling codes take no room when columns are measured
//! - **Wrapping**: cells wrap on word boundaries to fit a maximum table width
//! - **Styles**: named border styles or a custom glyph set
//! - **Formatting**: per-column number formats with a shared precision
//!
//! ## Quick Start
//!
//! ```
//! use tabby::{HorizontalAlign, Table, Value};
//!
//! let mut table = Table::new();
//! table
//!     .set_cols_align([HorizontalAlign::Left, HorizontalAlign::Right])?
//!     .header(["fruit", "price"])?
//!     .add_row([Value::from("apple"), Value::from(1.25)])?
//!     .add_row([Value::from("\x1b[32mkiwi\x1b[0m"), Value::from(0.5)])?;
//!
//! println!("{}", table.draw()?.unwrap_or_default());
//! # Ok::<(), tabby::TableError>(())
//! ```
//!
//! ## Modules
//!
//! - [`table`] - The `Table` builder and renderer
//! - [`config`] - Serde-loadable render settings
//! - [`style`] - Border glyph sets
//! - [`gallery`] - Sample renders of every built-in style
//! - [`format`] - Per-column value formatting
//! - [`layout`] - Column width allocation
//! - [`wrap`] - Cell wrapping and vertical padding
//! - [`ansi`] - Style repair across wrapped lines
//! - [`width`] - Display width of escape-coded text

pub mod align;
pub mod ansi;
pub mod config;
pub mod decoration;
pub mod error;
pub mod format;
pub mod gallery;
pub mod layout;
pub mod style;
pub mod table;
pub mod value;
pub mod width;
pub mod wrap;

pub use align::{HorizontalAlign, VerticalAlign};
pub use config::TableConfig;
pub use decoration::Decorations;
pub use error::{Result, TableError};
pub use format::ColumnType;
pub use style::{BorderStyle, StyleName, StyleSpec};
pub use table::{ColumnConfig, Table};
pub use value::Value;
