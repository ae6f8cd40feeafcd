use crate::grid::CellValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// 1–3 digits, optional whitespace, then `%`.
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{1,3})\s*%").unwrap());

/// Read a budget/actual cell as a non-negative amount.
///
/// Thousands separators (`,` and `_`) and every `-` are removed before parsing, so a
/// negative amount comes back as its magnitude (`"-1,234.50"` → `1234.5`).
/// Sheets in the wild rely on this, keep it. Empty, falsy, unparseable or
/// non-finite values read as `0.0`.
pub fn to_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Empty | CellValue::Bool(false) => return 0.0,
        CellValue::Number(n) if *n == 0.0 => return 0.0,
        CellValue::Text(s) if s.is_empty() => return 0.0,
        _ => {}
    }
    let cleaned: String = value
        .to_string()
        .chars()
        .filter(|c| !matches!(*c, ',' | '_' | '-'))
        .collect();
    match cleaned.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Pull the first `NN%` out of an annotation as a fraction (`"55%"` → `0.55`).
///
/// `None` means no percentage was present, which is not the same as `0%`.
pub fn parse_fa_rate(text: Option<&str>) -> Option<f64> {
    let text = text.filter(|t| !t.is_empty())?;
    let caps = PERCENT_RE.captures(text)?;
    let digits: f64 = caps[1].parse().ok()?;
    Some(digits / 100.0)
}
