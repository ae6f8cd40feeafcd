use super::parse::parse_fa_rate;
use crate::config::SheetLayout;
use crate::grid::Grid;
use tracing::trace;

/// Nearest F&A rate annotated above `row`.
///
/// Walks rows `row-1` down to, but not including, `max(1, row - rate_lookback_rows)`,
/// so row 1 is never an annotation row. Within each row columns
/// `1..=annotation_cols` are checked. A cell containing the marker whose
/// text has no percentage is skipped and the walk goes on. Returns the rate
/// and the row it was found on.
pub fn find_fa_rate<G: Grid + ?Sized>(grid: &G, row: u32, layout: &SheetLayout) -> Option<(f64, u32)> {
    if row <= 1 {
        return None;
    }
    let stop = row.saturating_sub(layout.rate_lookback_rows).max(1);

    for r in ((stop + 1)..row).rev() {
        for c in 1..=layout.annotation_cols {
            let value = grid.get(r, c);
            if value.is_empty() {
                continue;
            }
            let text = value.to_string();
            if !text.contains(&layout.annotation_marker) {
                continue;
            }
            match parse_fa_rate(Some(&text)) {
                Some(rate) => return Some((rate, r)),
                None => trace!(row = r, col = c, "annotation without a percentage"),
            }
        }
    }
    None
}
