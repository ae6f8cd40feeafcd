// src/grid/workbook.rs

use super::{CellValue, Grid};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Load an `.xlsx` document from disk.
pub fn load(path: &Path) -> Result<Spreadsheet> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("loading workbook {:?}", path))?;
    info!(path=%path.display(), "workbook loaded");
    Ok(book)
}

/// Write the whole document to `path`.
pub fn save(book: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .with_context(|| format!("saving workbook {:?}", path))?;
    info!(path=%path.display(), "workbook saved");
    Ok(())
}

/// The sheet that was active when the document was last saved.
pub fn active_sheet(book: &mut Spreadsheet) -> &mut Worksheet {
    book.get_active_sheet_mut()
}

/// Formula cells read as their cached result.
impl Grid for Worksheet {
    fn get(&self, row: u32, col: u32) -> CellValue {
        let Some(cell) = self.get_cell((col, row)) else {
            return CellValue::Empty;
        };
        if let Some(n) = cell.get_value_number() {
            return CellValue::Number(n);
        }
        let text = cell.get_value();
        if cell.get_data_type() == "b" {
            return CellValue::Bool(text.eq_ignore_ascii_case("TRUE"));
        }
        if text.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.into_owned())
        }
    }

    fn set(&mut self, row: u32, col: u32, value: CellValue) {
        let cell = self.get_cell_mut((col, row));
        match value {
            CellValue::Empty => {
                cell.set_value(String::new());
            }
            CellValue::Text(s) => {
                cell.set_value(s);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
            CellValue::Bool(b) => {
                cell.set_value_bool(b);
            }
        }
    }

    fn max_row(&self) -> u32 {
        self.get_highest_row()
    }
}
