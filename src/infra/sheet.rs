//! Spreadsheet adapter: reads the cost workbook into the plain grid the
//! normalizer consumes, and writes an updated listed price back.
//!
//! Cell interpretation happens here so the domain never sees spreadsheet
//! types: numeric cells (and numeric-looking text like "630.4") become
//! `Some(f64)`, everything else becomes `None`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use crate::domain::{Cell, SheetConfig};

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("failed to write workbook: {0}")]
    Write(#[from] XlsxError),
    #[error("size {size} cm² is not in the sheet; refresh the cost table first")]
    SizeNotFound { size: u32 },
    #[error("the configured row map has no listed-price row")]
    NoListedPriceRow,
}

/// Raw cell values, kept around so a write-back can re-serialize label and
/// text cells untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl RawCell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => RawCell::Empty,
            Data::Float(value) => RawCell::Number(*value),
            Data::Int(value) => RawCell::Number(*value as f64),
            Data::Bool(value) => RawCell::Bool(*value),
            Data::String(text) => RawCell::Text(text.clone()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => RawCell::Text(text.clone()),
            Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
            Data::Error(_) => RawCell::Empty,
        }
    }

    /// The normalizer's view of this cell.
    pub fn numeric(&self) -> Cell {
        match self {
            RawCell::Number(value) => Some(*value),
            RawCell::Text(text) => text.trim().parse::<f64>().ok(),
            RawCell::Empty | RawCell::Bool(_) => None,
        }
    }
}

/// Read the configured sheet into a dense row-major grid of raw cells,
/// addressed by absolute (row, column) regardless of where the used range
/// starts.
pub fn load_raw_grid(path: &Path, sheet_name: &str) -> Result<Vec<Vec<RawCell>>, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet_name)?;

    let Some((end_row, end_col)) = range.end() else {
        println!("[sheet] {sheet_name} in {} is empty", path.display());
        return Ok(Vec::new());
    };

    let mut grid = Vec::with_capacity(end_row as usize + 1);
    for row in 0..=end_row {
        let mut cells = Vec::with_capacity(end_col as usize + 1);
        for col in 0..=end_col {
            let cell = range
                .get_value((row, col))
                .map(RawCell::from_data)
                .unwrap_or(RawCell::Empty);
            cells.push(cell);
        }
        grid.push(cells);
    }

    println!(
        "[sheet] loaded {}x{} grid from {} ({sheet_name})",
        grid.len(),
        end_col + 1,
        path.display()
    );
    Ok(grid)
}

/// Numeric projection of the sheet for the normalizer.
pub fn load_cost_grid(path: &Path, sheet_name: &str) -> Result<Vec<Vec<Cell>>, SheetError> {
    let raw = load_raw_grid(path, sheet_name)?;
    Ok(numeric_grid(&raw))
}

pub fn numeric_grid(raw: &[Vec<RawCell>]) -> Vec<Vec<Cell>> {
    raw.iter()
        .map(|row| row.iter().map(RawCell::numeric).collect())
        .collect()
}

/// Update the listed price for one size and re-serialize the whole matrix.
///
/// The column is located by its `size_area` key, never by positional index,
/// and every untouched cell value is written back as it was read. Values
/// only: formulas, number formats, and styling in the source workbook do
/// not survive the rewrite.
pub fn write_listed_price(
    config: &SheetConfig,
    size_area: u32,
    new_price: f64,
) -> Result<(), SheetError> {
    let path = Path::new(&config.path);
    let listed_row = config.rows.listed_price_row.ok_or(SheetError::NoListedPriceRow)?;

    let mut grid = load_raw_grid(path, &config.sheet_name)?;

    let col = grid
        .get(config.rows.size_row)
        .and_then(|row| {
            row.iter().position(|cell| {
                cell.numeric()
                    .map(|value| value.round() as u32 == size_area)
                    .unwrap_or(false)
            })
        })
        .ok_or(SheetError::SizeNotFound { size: size_area })?;

    if grid.len() <= listed_row {
        grid.resize(listed_row + 1, Vec::new());
    }
    let row = &mut grid[listed_row];
    if row.len() <= col {
        row.resize(col + 1, RawCell::Empty);
    }
    row[col] = RawCell::Number(new_price);

    save_grid(path, &config.sheet_name, &grid)?;
    println!(
        "[sheet] wrote listed price {new_price} for size {size_area} to {}",
        path.display()
    );
    Ok(())
}

fn save_grid(path: &Path, sheet_name: &str, grid: &[Vec<RawCell>]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in grid.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
            match cell {
                RawCell::Empty => {}
                RawCell::Number(value) => {
                    worksheet.write_number(row_idx, col_idx, *value)?;
                }
                RawCell::Text(text) => {
                    worksheet.write_string(row_idx, col_idx, text)?;
                }
                RawCell::Bool(value) => {
                    worksheet.write_boolean(row_idx, col_idx, *value)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::RowMap;

    #[test]
    fn numeric_strings_parse_and_labels_do_not() {
        assert_eq!(RawCell::Text("630.4".to_string()).numeric(), Some(630.4));
        assert_eq!(RawCell::Text(" 21 ".to_string()).numeric(), Some(21.0));
        assert_eq!(RawCell::Text("print cost".to_string()).numeric(), None);
        assert_eq!(RawCell::Empty.numeric(), None);
        assert_eq!(RawCell::Number(0.0).numeric(), Some(0.0));
        assert_eq!(RawCell::Bool(true).numeric(), None);
    }

    fn temp_workbook(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "print_price_planner_{tag}_{}.xlsx",
            std::process::id()
        ))
    }

    fn sample_config(path: &Path) -> SheetConfig {
        SheetConfig {
            path: path.to_string_lossy().into_owned(),
            sheet_name: "Print Costs".to_string(),
            rows: RowMap::default(),
        }
    }

    fn write_sample_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Print Costs").unwrap();
        worksheet.write_string(0, 0, "size cm²").unwrap();
        worksheet.write_number(0, 1, 630.0).unwrap();
        worksheet.write_number(0, 2, 1200.0).unwrap();
        worksheet.write_string(5, 0, "primary print").unwrap();
        worksheet.write_number(5, 1, 12.5).unwrap();
        worksheet.write_number(5, 2, 21.0).unwrap();
        worksheet.write_number(12, 1, 39.99).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn grid_round_trips_through_the_workbook() {
        let path = temp_workbook("roundtrip");
        write_sample_workbook(&path);

        let grid = load_cost_grid(&path, "Print Costs").unwrap();
        assert_eq!(grid[0][1], Some(630.0));
        assert_eq!(grid[0][0], None); // label cell
        assert_eq!(grid[5][2], Some(21.0));
        assert_eq!(grid[12][1], Some(39.99));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_sheet_is_a_typed_error() {
        let path = temp_workbook("missing_sheet");
        write_sample_workbook(&path);

        let err = load_cost_grid(&path, "No Such Sheet").unwrap_err();
        assert!(matches!(err, SheetError::Workbook(_)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn write_back_updates_one_cell_and_keeps_labels() {
        let path = temp_workbook("writeback");
        write_sample_workbook(&path);
        let config = sample_config(&path);

        write_listed_price(&config, 630, 44.50).unwrap();

        let raw = load_raw_grid(&path, "Print Costs").unwrap();
        assert_eq!(raw[12][1], RawCell::Number(44.50));
        assert_eq!(raw[0][0], RawCell::Text("size cm²".to_string()));
        assert_eq!(raw[5][2], RawCell::Number(21.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn write_back_for_unknown_size_fails() {
        let path = temp_workbook("unknown_size");
        write_sample_workbook(&path);
        let config = sample_config(&path);

        let err = write_listed_price(&config, 9999, 10.0).unwrap_err();
        assert!(matches!(err, SheetError::SizeNotFound { size: 9999 }));

        let _ = std::fs::remove_file(&path);
    }
}
