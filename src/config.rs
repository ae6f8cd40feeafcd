// src/config.rs

use crate::error::EngineError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Rate applied when no F&A annotation is found above a capital line.
pub const DEFAULT_FA_RATE: f64 = 0.60;
/// First-tranche subaward cap carried with the run settings.
pub const SUBAWARD_FIRST_CAP: f64 = 25_000.0;

/// Settings for one engine run. Every field has a default, so a YAML file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_fa_rate: f64,
    pub subaward_first_cap: f64,
    pub layout: SheetLayout,
}

/// Where things live in a Financial Summary sheet. Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Exact text in column 1 that marks the header row
    pub header_label: String,
    /// Header is searched in rows `1..=header_scan_rows`
    pub header_scan_rows: u32,
    pub classification_col: u32,
    pub budget_col: u32,
    pub actual_col: u32,
    pub impact_col: u32,
    /// Substring identifying a rate annotation cell
    pub annotation_marker: String,
    /// Annotations are searched in columns `1..=annotation_cols`
    pub annotation_cols: u32,
    /// How many rows above a data row the rate search may look
    pub rate_lookback_rows: u32,
    /// Substring (matched upper-cased) that selects capital-expense lines
    pub capital_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_fa_rate: DEFAULT_FA_RATE,
            subaward_first_cap: SUBAWARD_FIRST_CAP,
            layout: SheetLayout::default(),
        }
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_label: "Grant".to_string(),
            header_scan_rows: 49,
            classification_col: 3,
            budget_col: 4,
            actual_col: 5,
            impact_col: 10,
            annotation_marker: "F&A".to_string(),
            annotation_cols: 7,
            rate_lookback_rows: 120,
            capital_marker: "CAPITAL".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load settings from a YAML file; missing keys fall back to defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        let cfg: EngineConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {:?}", path))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let bad = |msg: String| Err(EngineError::InvalidConfig(msg));

        if !self.default_fa_rate.is_finite() || !(0.0..=1.0).contains(&self.default_fa_rate) {
            return bad(format!(
                "default_fa_rate must be within [0, 1], got {}",
                self.default_fa_rate
            ));
        }
        if !self.subaward_first_cap.is_finite() || self.subaward_first_cap < 0.0 {
            return bad(format!(
                "subaward_first_cap must be non-negative, got {}",
                self.subaward_first_cap
            ));
        }

        let l = &self.layout;
        for (name, col) in [
            ("classification_col", l.classification_col),
            ("budget_col", l.budget_col),
            ("actual_col", l.actual_col),
            ("impact_col", l.impact_col),
            ("annotation_cols", l.annotation_cols),
        ] {
            if col == 0 {
                return bad(format!("{} must be >= 1 (columns are 1-based)", name));
            }
        }
        if l.header_scan_rows == 0 {
            return bad("header_scan_rows must be >= 1".to_string());
        }
        if l.rate_lookback_rows == 0 {
            return bad("rate_lookback_rows must be >= 1".to_string());
        }
        for (name, text) in [
            ("header_label", &l.header_label),
            ("annotation_marker", &l.annotation_marker),
            ("capital_marker", &l.capital_marker),
        ] {
            if text.is_empty() {
                return bad(format!("{} must not be empty", name));
            }
        }
        if [l.classification_col, l.budget_col, l.actual_col].contains(&l.impact_col) {
            return bad(format!(
                "impact_col {} overlaps an input column",
                l.impact_col
            ));
        }
        Ok(())
    }
}
