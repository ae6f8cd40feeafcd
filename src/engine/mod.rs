// src/engine/mod.rs

pub mod classify;
pub mod parse;
pub mod rate;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::{CellValue, Grid};
use classify::is_capital_line;
use parse::to_number;
use rate::find_fa_rate;
use tracing::{debug, info};

/// Applies the capital-line F&A impact rule to a Financial Summary sheet.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// First row in `1..=header_scan_rows` whose column 1 is exactly the header label.
    pub fn find_header_row<G: Grid + ?Sized>(&self, grid: &G) -> Result<u32, EngineError> {
        let layout = &self.config.layout;
        (1..=layout.header_scan_rows)
            .find(|&r| grid.get(r, 1).as_text() == Some(layout.header_label.as_str()))
            .ok_or_else(|| EngineError::HeaderNotFound {
                label: layout.header_label.clone(),
                scanned_rows: layout.header_scan_rows,
            })
    }

    /// Write `(budget - actual) * rate` into the impact column of every capital
    /// line below the header. Returns how many rows were written.
    ///
    /// Nothing is written if the header cannot be found.
    pub fn apply<G: Grid + ?Sized>(&self, grid: &mut G) -> Result<usize, EngineError> {
        let layout = &self.config.layout;
        let header_row = self.find_header_row(&*grid)?;
        let last_row = grid.max_row();
        info!(header_row, last_row, "header located");

        let mut updated = 0usize;
        let mut defaulted = 0usize;

        for r in header_row + 1..=last_row {
            let class = grid.get(r, layout.classification_col);
            if !is_capital_line(&class, &layout.capital_marker) {
                continue;
            }

            let budget = to_number(&grid.get(r, layout.budget_col));
            let actual = to_number(&grid.get(r, layout.actual_col));
            let (rate, source_row) = match find_fa_rate(&*grid, r, layout) {
                Some((rate, at)) => (rate, Some(at)),
                None => {
                    defaulted += 1;
                    (self.config.default_fa_rate, None)
                }
            };
            let impact = (budget - actual) * rate;

            grid.set(r, layout.impact_col, CellValue::Number(impact));
            updated += 1;
            debug!(row = r, budget, actual, rate, ?source_row, impact, "impact written");
        }

        info!(updated, defaulted, "rules applied");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;

    fn engine() -> RuleEngine {
        RuleEngine::new(EngineConfig::default()).unwrap()
    }

    fn capital_row() -> Vec<CellValue> {
        vec![
            "G100".into(),
            "Desc".into(),
            "Capital Equipment".into(),
            10000.0.into(),
            4000.0.into(),
        ]
    }

    fn sheet_with_header() -> MemoryGrid {
        MemoryGrid::new()
            .with_row(1, vec!["Financial Summary"])
            .with_row(5, vec!["Grant", "Description", "Class", "Budget", "Actual"])
            .with_row(6, capital_row())
    }

    #[test]
    fn uses_annotated_rate_above_header() {
        let mut grid = sheet_with_header().with_row(3, vec!["", "F&A Rate 50%"]);
        let updated = engine().apply(&mut grid).unwrap();
        assert_eq!(updated, 1);
        assert_eq!(grid.get(6, 10), CellValue::Number(3000.0));
    }

    #[test]
    fn falls_back_to_default_rate() {
        let mut grid = sheet_with_header();
        let updated = engine().apply(&mut grid).unwrap();
        assert_eq!(updated, 1);
        match grid.get(6, 10) {
            CellValue::Number(n) => assert!((n - 3600.0).abs() < 1e-9),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn configured_default_rate_is_used() {
        let mut cfg = EngineConfig::default();
        cfg.default_fa_rate = 0.25;
        let mut grid = sheet_with_header();
        RuleEngine::new(cfg).unwrap().apply(&mut grid).unwrap();
        assert_eq!(grid.get(6, 10), CellValue::Number(1500.0));
    }

    #[test]
    fn zero_percent_annotation_is_not_replaced_by_default() {
        let mut grid = sheet_with_header().with_row(4, vec!["F&A 0% (exempt)"]);
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(6, 10), CellValue::Number(0.0));
    }

    #[test]
    fn missing_header_is_fatal_and_writes_nothing() {
        let mut grid = MemoryGrid::new()
            .with_row(3, vec!["F&A Rate 50%"])
            .with_row(5, vec!["grant", "Description"])
            .with_row(6, capital_row());
        let before = grid.len();

        let err = engine().apply(&mut grid).unwrap_err();
        assert_eq!(
            err,
            EngineError::HeaderNotFound {
                label: "Grant".to_string(),
                scanned_rows: 49
            }
        );
        assert_eq!(grid.len(), before);
        assert_eq!(grid.get(6, 10), CellValue::Empty);
    }

    #[test]
    fn header_past_scan_window_is_not_found() {
        let mut grid = MemoryGrid::new()
            .with_row(50, vec!["Grant"])
            .with_row(51, capital_row());
        assert!(matches!(
            engine().apply(&mut grid),
            Err(EngineError::HeaderNotFound { .. })
        ));

        let grid = MemoryGrid::new().with_row(49, vec!["Grant"]);
        assert_eq!(engine().find_header_row(&grid), Ok(49));
    }

    #[test]
    fn header_label_must_match_exactly() {
        let grid = MemoryGrid::new()
            .with_row(2, vec![" Grant"])
            .with_row(3, vec!["Grant "])
            .with_row(4, vec!["Grant"])
            .with_row(7, vec!["Grant"]);
        assert_eq!(engine().find_header_row(&grid), Ok(4));
    }

    #[test]
    fn only_capital_lines_after_header_are_written() {
        let mut grid = sheet_with_header()
            .with_row(2, vec!["", "", "Capital Equipment", "999", "1"])
            .with_row(7, vec!["G100", "Staff", "Salaries", "5000", "1000"])
            .with_row(8, vec!["G100", "Lab", "capital outlay", "2,500", ""])
            .with_row(9, vec!["G100", "Refund", "CAPITAL", "-1,000", "250"]);

        let updated = engine().apply(&mut grid).unwrap();
        assert_eq!(updated, 3);
        assert_eq!(grid.get(2, 10), CellValue::Empty);
        assert_eq!(grid.get(7, 10), CellValue::Empty);
        assert_eq!(grid.get(8, 10), CellValue::Number(2500.0 * 0.60));
        // "-1,000" reads as 1000
        assert_eq!(grid.get(9, 10), CellValue::Number(750.0 * 0.60));
    }

    #[test]
    fn rows_pick_up_their_own_nearest_rate() {
        let mut grid = sheet_with_header()
            .with_row(10, vec!["", "", "", "", "", "", "F&A 40%"])
            .with_row(11, vec!["G200", "Desc", "Capital", "1000", "0"]);
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(6, 10), CellValue::Number(6000.0 * 0.60));
        assert_eq!(grid.get(11, 10), CellValue::Number(1000.0 * 0.40));
    }

    #[test]
    fn annotation_beyond_lookback_uses_default() {
        let target = 130;
        let mut grid = MemoryGrid::new()
            .with_row(1, vec!["Grant"])
            .with_row(target - 121, vec!["F&A 50%"])
            .with_row(target, capital_row());
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(target, 10), CellValue::Number(6000.0 * 0.60));

        let mut grid = MemoryGrid::new()
            .with_row(1, vec!["Grant"])
            .with_row(target - 119, vec!["F&A 50%"])
            .with_row(target, capital_row());
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(target, 10), CellValue::Number(3000.0));

        let mut grid = MemoryGrid::new()
            .with_row(1, vec!["Grant"])
            .with_row(target - 120, vec!["F&A 50%"])
            .with_row(target, capital_row());
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(target, 10), CellValue::Number(6000.0 * 0.60));
    }

    #[test]
    fn annotation_in_row_one_is_ignored() {
        let mut grid = MemoryGrid::new()
            .with_row(1, vec!["F&A Rate 50%"])
            .with_row(2, vec!["Grant"])
            .with_row(3, capital_row());
        engine().apply(&mut grid).unwrap();
        assert_eq!(grid.get(3, 10), CellValue::Number(6000.0 * 0.60));
    }

    #[test]
    fn rerun_recomputes_same_values() {
        let mut grid = sheet_with_header().with_row(3, vec!["F&A Rate 50%"]);
        grid.set(6, 10, CellValue::from("stale"));

        let e = engine();
        assert_eq!(e.apply(&mut grid).unwrap(), 1);
        let first = grid.get(6, 10);
        assert_eq!(e.apply(&mut grid).unwrap(), 1);
        assert_eq!(grid.get(6, 10), first);
        assert_eq!(first, CellValue::Number(3000.0));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut cfg = EngineConfig::default();
        cfg.layout.impact_col = 0;
        assert!(matches!(
            RuleEngine::new(cfg),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
