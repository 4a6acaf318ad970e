//! Turns the fixed-layout cost sheet (sizes as columns, cost categories as
//! rows) into a flat, size-keyed record collection.

use thiserror::Error;

use super::entities::CostRecord;

/// A grid cell as handed over by the spreadsheet adapter: `Some` for a
/// numeric (or numeric-looking) cell, `None` for anything else.
pub type Cell = Option<f64>;

/// Declarative row→field mapping for the cost sheet. The source workbooks
/// disagree on which row holds which figure, so the offsets are injected by
/// the caller and validated up front instead of being baked into the pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowMap {
    pub size_row: usize,
    pub primary_price_row: usize,
    pub primary_postage_row: usize,
    pub secondary_price_row: usize,
    pub secondary_postage_row: usize,
    pub listed_price_row: Option<usize>,
}

impl Default for RowMap {
    /// Layout of the workbook this tool grew up with: sizes in the top row,
    /// marketplace price in row 13 (zero-based 12).
    fn default() -> Self {
        Self {
            size_row: 0,
            primary_price_row: 5,
            primary_postage_row: 6,
            secondary_price_row: 8,
            secondary_postage_row: 9,
            listed_price_row: Some(12),
        }
    }
}

impl RowMap {
    /// Smallest grid height this mapping can be applied to.
    pub fn required_rows(&self) -> usize {
        let mut max = self
            .size_row
            .max(self.primary_price_row)
            .max(self.primary_postage_row)
            .max(self.secondary_price_row)
            .max(self.secondary_postage_row);
        if let Some(row) = self.listed_price_row {
            max = max.max(row);
        }
        max + 1
    }

    fn validate(&self, grid_rows: usize) -> Result<(), MalformedTableError> {
        if grid_rows <= self.size_row {
            return Err(MalformedTableError::SizeRowMissing {
                size_row: self.size_row,
                grid_rows,
            });
        }
        let required = self.required_rows();
        if grid_rows < required {
            return Err(MalformedTableError::RowOutOfRange {
                required,
                grid_rows,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedTableError {
    #[error("size row {size_row} does not exist in a sheet with {grid_rows} row(s)")]
    SizeRowMissing { size_row: usize, grid_rows: usize },
    #[error("row map needs {required} row(s) but the sheet only has {grid_rows}")]
    RowOutOfRange { required: usize, grid_rows: usize },
    #[error("size {size} cm² appears more than once in the sheet")]
    DuplicateSize { size: u32 },
}

/// Pivot the raw grid into one `CostRecord` per priced size column.
///
/// Columns without a numeric size cell are skipped; size values are rounded
/// to the nearest integer so "630.4" and "630" key the same record. Cost
/// cells that are empty stay `None` — absence is not zero. The result is
/// sorted ascending by size and carries no hidden state: the same grid
/// always yields the same records.
pub fn normalize(grid: &[Vec<Cell>], rows: &RowMap) -> Result<Vec<CostRecord>, MalformedTableError> {
    rows.validate(grid.len())?;

    let size_row = &grid[rows.size_row];
    let mut records: Vec<CostRecord> = Vec::with_capacity(size_row.len());

    for (col, size_cell) in size_row.iter().enumerate() {
        let Some(raw_size) = size_cell else {
            continue;
        };
        if !raw_size.is_finite() || *raw_size <= 0.0 {
            continue;
        }
        let size = raw_size.round() as u32;

        if records.iter().any(|record| record.size_area == size) {
            return Err(MalformedTableError::DuplicateSize { size });
        }

        let mut record = CostRecord::new(size);
        record.primary_price = cell_at(grid, rows.primary_price_row, col);
        record.primary_postage = cell_at(grid, rows.primary_postage_row, col);
        record.secondary_price = cell_at(grid, rows.secondary_price_row, col);
        record.secondary_postage = cell_at(grid, rows.secondary_postage_row, col);
        if let Some(listed_row) = rows.listed_price_row {
            record.listed_price = cell_at(grid, listed_row, col);
        }
        records.push(record);
    }

    records.sort_by_key(|record| record.size_area);
    Ok(records)
}

fn cell_at(grid: &[Vec<Cell>], row: usize, col: usize) -> Cell {
    grid.get(row)
        .and_then(|cells| cells.get(col).copied().flatten())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Vec<Vec<Cell>> {
        // Columns: 630 cm², 1200 cm², one unlabeled column.
        let mut grid = vec![vec![None; 3]; 13];
        grid[0] = vec![Some(630.4), Some(1200.0), None];
        grid[5] = vec![Some(12.50), Some(21.00), Some(99.0)];
        grid[6] = vec![Some(3.10), None, None];
        grid[8] = vec![Some(0.0), Some(24.90), None];
        grid[9] = vec![None, Some(4.00), None];
        grid[12] = vec![Some(39.99), None, None];
        grid
    }

    #[test]
    fn pivots_columns_into_sorted_records() {
        let records = normalize(&sample_grid(), &RowMap::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].size_area, 630);
        assert_eq!(records[1].size_area, 1200);
        assert_eq!(records[0].primary_price, Some(12.50));
        assert_eq!(records[1].secondary_postage, Some(4.00));
    }

    #[test]
    fn fractional_size_rounds_to_nearest_integer() {
        let records = normalize(&sample_grid(), &RowMap::default()).unwrap();
        assert_eq!(records[0].size_area, 630);
    }

    #[test]
    fn unlabeled_column_is_skipped_even_with_costs() {
        let records = normalize(&sample_grid(), &RowMap::default()).unwrap();
        assert!(records.iter().all(|r| r.primary_price != Some(99.0)));
    }

    #[test]
    fn zero_cost_is_not_absence() {
        let records = normalize(&sample_grid(), &RowMap::default()).unwrap();
        assert_eq!(records[0].secondary_price, Some(0.0));
        assert_eq!(records[0].secondary_postage, None);
    }

    #[test]
    fn missing_listed_price_stays_unset() {
        let records = normalize(&sample_grid(), &RowMap::default()).unwrap();
        assert_eq!(records[0].listed_price, Some(39.99));
        assert_eq!(records[1].listed_price, None);
    }

    #[test]
    fn normalize_is_idempotent() {
        let grid = sample_grid();
        let rows = RowMap::default();
        let first = normalize(&grid, &rows).unwrap();
        let second = normalize(&grid, &rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_size_is_rejected() {
        let mut grid = sample_grid();
        grid[0][2] = Some(629.6); // rounds to 630 as well
        let err = normalize(&grid, &RowMap::default()).unwrap_err();
        assert_eq!(err, MalformedTableError::DuplicateSize { size: 630 });
    }

    #[test]
    fn short_sheet_fails_validation() {
        let grid = vec![vec![Some(630.0)]; 4];
        let err = normalize(&grid, &RowMap::default()).unwrap_err();
        assert!(matches!(err, MalformedTableError::RowOutOfRange { .. }));
    }

    #[test]
    fn empty_grid_has_no_size_row() {
        let err = normalize(&[], &RowMap::default()).unwrap_err();
        assert!(matches!(err, MalformedTableError::SizeRowMissing { .. }));
    }

    #[test]
    fn row_map_without_listed_row_needs_fewer_rows() {
        let rows = RowMap {
            listed_price_row: None,
            ..RowMap::default()
        };
        assert_eq!(rows.required_rows(), 10);
        let grid = sample_grid()[..10].to_vec();
        let records = normalize(&grid, &rows).unwrap();
        assert_eq!(records[0].listed_price, None);
    }
}
