use crate::grid::CellValue;

/// A row is a capital-expense line when its classification, upper-cased,
/// contains `marker` anywhere.
pub fn is_capital_line(classification: &CellValue, marker: &str) -> bool {
    classification
        .to_string()
        .to_uppercase()
        .contains(&marker.to_uppercase())
}
