//! Column width allocation.
//!
//! Columns start at their natural width (the widest cell, see
//! [`intrinsic_width`]). When the table would not fit the maximum width,
//! the space left after decorations is dealt out one cell at a time in
//! round-robin order, so wide columns give up proportionally more than
//! narrow ones.

use tracing::debug;

use crate::decoration::Decorations;
use crate::error::{Result, TableError};
use crate::width::intrinsic_width;

/// Width budgeted for everything that is not cell content:
/// `3 * (columns - 1)`, plus 4 with a border.
///
/// This is the exact overhead at a padding of 1. Padding is not part of
/// the budget, so each extra space of padding widens a rendered line by
/// two per column beyond `max_width`.
///
/// ```
/// use tabby::{Decorations, layout::decoration_overhead};
///
/// assert_eq!(decoration_overhead(2, Decorations::all()), 7);
/// assert_eq!(decoration_overhead(3, Decorations::empty()), 6);
/// assert_eq!(decoration_overhead(1, Decorations::BORDER), 4);
/// ```
pub fn decoration_overhead(columns: usize, decorations: Decorations) -> usize {
    let border = if decorations.has_border() { 4 } else { 0 };
    3 * columns.saturating_sub(1) + border
}

/// Natural width of each column: the widest header or row cell.
pub fn natural_widths(header: Option<&[String]>, rows: &[Vec<String>], columns: usize) -> Vec<usize> {
    let mut widths = vec![0; columns];
    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(intrinsic_width(cell));
        }
    }
    widths
}

/// Everything [`allocate`] needs besides the cell contents.
#[derive(Debug, Clone, Copy)]
pub struct WidthBudget<'a> {
    /// A fixed width per column; `None` lets the column size itself.
    pub fixed: &'a [Option<usize>],
    /// Maximum total width of a rendered line; `None` is unbounded.
    pub max_width: Option<usize>,
    pub decorations: Decorations,
}

/// Computes the content width of every column.
///
/// The minimum width is checked first, even for content that would fit.
/// Fixed widths always win and never shrink. If the table does not fit,
/// the self-sizing columns are rebuilt from zero by handing out one cell of
/// the remaining budget at a time, round-robin, skipping columns that
/// already reached their natural width. The budget never drops below one
/// cell per self-sizing column, so fixed widths wider than the space left
/// push the line past `max_width` instead of failing.
///
/// ## Errors
///
/// [`TableError::WidthTooSmall`] when the maximum width cannot hold one
/// cell per column plus the decoration overhead.
pub fn allocate(
    header: Option<&[String]>,
    rows: &[Vec<String>],
    budget: WidthBudget<'_>,
) -> Result<Vec<usize>> {
    let columns = budget.fixed.len();
    let natural = natural_widths(header, rows, columns);

    let mut widths: Vec<usize> = natural
        .iter()
        .zip(budget.fixed)
        .map(|(&natural, fixed)| fixed.unwrap_or(natural))
        .collect();

    let overhead = decoration_overhead(columns, budget.decorations);
    let Some(max_width) = budget.max_width else {
        return Ok(widths);
    };

    let minimum = columns + overhead;
    if max_width < minimum {
        return Err(TableError::WidthTooSmall { max_width, minimum });
    }

    let content: usize = widths.iter().sum();
    if content + overhead <= max_width {
        debug!(?widths, max_width, "columns fit at their natural width");
        return Ok(widths);
    }

    let fixed_total: usize = budget.fixed.iter().flatten().sum();
    let shrinkable = budget.fixed.iter().filter(|f| f.is_none()).count();
    let mut available = (max_width - overhead).saturating_sub(fixed_total).max(shrinkable);
    if fixed_total + shrinkable + overhead > max_width {
        debug!(fixed_total, max_width, "fixed widths exceed the maximum width");
    }

    for (width, fixed) in widths.iter_mut().zip(budget.fixed) {
        if fixed.is_none() {
            *width = 0;
        }
    }

    let mut column = 0;
    let mut idle = 0;
    while available > 0 && idle < columns {
        if budget.fixed[column].is_none() && widths[column] < natural[column] {
            widths[column] += 1;
            available -= 1;
            idle = 0;
        } else {
            idle += 1;
        }
        column = (column + 1) % columns;
    }

    debug!(?natural, ?widths, max_width, "shrank columns to fit");
    Ok(widths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn budget(fixed: &[Option<usize>], max_width: Option<usize>) -> WidthBudget<'_> {
        WidthBudget {
            fixed,
            max_width,
            decorations: Decorations::all(),
        }
    }

    #[test]
    fn test_natural_widths_include_header() {
        let header = cells(&[&["name", "x"]]).remove(0);
        let rows = cells(&[&["ab", "long value"], &["abcdef", "y"]]);
        assert_eq!(natural_widths(Some(header.as_slice()), &rows, 2), vec![6, 10]);
    }

    #[test]
    fn test_natural_widths_honor_newlines_and_tabs() {
        let rows = cells(&[&["a\nabc", "x\ty"]]);
        assert_eq!(natural_widths(None, &rows, 2), vec![3, 9]);
    }

    #[test]
    fn test_fits_without_shrinking() {
        let rows = cells(&[&["aaaa", "bb"]]);
        let widths = allocate(None, &rows, budget(&[None, None], Some(13))).unwrap();
        assert_eq!(widths, vec![4, 2]);
    }

    #[test]
    fn test_unbounded_width_never_shrinks() {
        let wide = "x".repeat(500);
        let rows = cells(&[&[wide.as_str(), "y"]]);
        let widths = allocate(None, &rows, budget(&[None, None], None)).unwrap();
        assert_eq!(widths, vec![500, 1]);
    }

    #[test]
    fn test_round_robin_shrinks_wide_columns_most() {
        let rows = cells(&[&["aaaaaaaaaa", "bb", "cccccc"]]);
        // overhead 3 * 2 + 4 = 10, budget 10
        let widths = allocate(None, &rows, budget(&[None, None, None], Some(20))).unwrap();
        assert_eq!(widths, vec![4, 2, 4]);
        assert_eq!(widths.iter().sum::<usize>(), 10);
    }

    #[test]
    fn test_width_too_small_reports_minimum() {
        let rows = cells(&[&["abc", "def"]]);
        let err = allocate(None, &rows, budget(&[None, None], Some(5))).unwrap_err();
        assert_eq!(err, TableError::WidthTooSmall { max_width: 5, minimum: 9 });
    }

    #[test]
    fn test_minimum_width_is_one_cell_per_column() {
        let rows = cells(&[&["abc", "def"]]);
        let widths = allocate(None, &rows, budget(&[None, None], Some(9))).unwrap();
        assert_eq!(widths, vec![1, 1]);
    }

    #[test]
    fn test_fixed_widths_are_kept() {
        let rows = cells(&[&["abcdefghij", "abcdefghij"]]);
        let widths = allocate(None, &rows, budget(&[Some(3), None], Some(14))).unwrap();
        assert_eq!(widths, vec![3, 4]);

        let widths = allocate(None, &rows, budget(&[Some(3), Some(20)], None)).unwrap();
        assert_eq!(widths, vec![3, 20]);
    }

    #[test]
    fn test_fixed_widths_never_raise_the_minimum() {
        let rows = cells(&[&["abc", "def"]]);
        let widths = allocate(None, &rows, budget(&[Some(10), Some(10)], Some(20))).unwrap();
        assert_eq!(widths, vec![10, 10]);

        let widths = allocate(None, &rows, budget(&[Some(10), None], Some(15))).unwrap();
        assert_eq!(widths, vec![10, 1]);

        let err = allocate(None, &rows, budget(&[Some(10), Some(10)], Some(8))).unwrap_err();
        assert_eq!(err, TableError::WidthTooSmall { max_width: 8, minimum: 9 });
    }


    #[test]
    fn test_minimum_applies_even_when_content_fits() {
        let rows = cells(&[&["", ""]]);
        let err = allocate(None, &rows, budget(&[None, None], Some(8))).unwrap_err();
        assert_eq!(err, TableError::WidthTooSmall { max_width: 8, minimum: 9 });
    }

    #[test]
    fn test_empty_column_stays_empty() {
        let rows = cells(&[&["", "abcdefghij"]]);
        let widths = allocate(None, &rows, budget(&[None, None], Some(12))).unwrap();
        assert_eq!(widths, vec![0, 5]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: allocation succeeds exactly when the width can hold one
        /// cell per column plus the decoration overhead
        #[test]
        fn minimum_width_invariant(
            lens in prop::collection::vec(1usize..40, 1..8),
            max_width in 0usize..200,
            border in any::<bool>(),
        ) {
            let row: Vec<String> = lens.iter().map(|&n| "x".repeat(n)).collect();
            let fixed = vec![None; lens.len()];
            let decorations = if border { Decorations::all() } else { Decorations::empty() };
            let overhead = decoration_overhead(lens.len(), decorations);
            let result = allocate(None, &[row], WidthBudget {
                fixed: &fixed,
                max_width: Some(max_width),
                decorations,
            });

            if max_width >= lens.len() + overhead {
                let widths = result.unwrap();
                prop_assert!(widths.iter().sum::<usize>() + overhead <= max_width);
                prop_assert!(widths.iter().zip(&lens).all(|(w, n)| *w >= 1 && w <= n));
            } else {
                let is_too_small = matches!(result, Err(TableError::WidthTooSmall { .. }));
                prop_assert!(is_too_small);
            }
        }

        /// Property: fixed widths are kept as given and never turn a width
        /// that holds one cell per column into an error
        #[test]
        fn fixed_widths_are_never_too_small(
            fixed in prop::collection::vec(prop::option::of(1usize..30), 1..6),
            max_width in 0usize..120,
        ) {
            let row: Vec<String> = fixed.iter().map(|_| "word ".repeat(6)).collect();
            let overhead = decoration_overhead(fixed.len(), Decorations::all());
            let result = allocate(None, &[row], WidthBudget {
                fixed: &fixed,
                max_width: Some(max_width),
                decorations: Decorations::all(),
            });

            if max_width >= fixed.len() + overhead {
                let widths = result.unwrap();
                for (width, fixed) in widths.iter().zip(&fixed) {
                    match fixed {
                        Some(f) => {
                            prop_assert_eq!(width, f);
                        }
                        None => {
                            prop_assert!(*width >= 1);
                        }
                    }
                }
            } else {
                let is_too_small = matches!(result, Err(TableError::WidthTooSmall { .. }));
                prop_assert!(is_too_small);
            }
        }
    }
}
