// src/grid/mod.rs

pub mod workbook;

use std::collections::HashMap;
use std::fmt;

/// A single cell as the engine sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Text form used for matching and number parsing.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Cell-addressable sheet, 1-based `(row, col)`. The engine only reads and
/// overwrites cells; it never inserts or removes rows.
pub trait Grid {
    fn get(&self, row: u32, col: u32) -> CellValue;
    fn set(&mut self, row: u32, col: u32, value: CellValue);
    /// Last populated row
    fn max_row(&self) -> u32;
}

/// Sparse in-memory grid.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: HashMap<(u32, u32), CellValue>,
    max_row: u32,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `row` from column 1 onward. `Empty` entries are left unset.
    pub fn set_row<I, V>(&mut self, row: u32, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (i, v) in values.into_iter().enumerate() {
            let v = v.into();
            if !v.is_empty() {
                self.set(row, i as u32 + 1, v);
            }
        }
    }

    pub fn with_row<I, V>(mut self, row: u32, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.set_row(row, values);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Grid for MemoryGrid {
    fn get(&self, row: u32, col: u32) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    fn set(&mut self, row: u32, col: u32, value: CellValue) {
        self.max_row = self.max_row.max(row);
        self.cells.insert((row, col), value);
    }

    fn max_row(&self) -> u32 {
        self.max_row
    }
}
