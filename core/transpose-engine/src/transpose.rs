//! FILENAME: core/transpose-engine/src/transpose.rs
//! Explodes query rows into one row per (row, measure) pair.
//!
//! Default order is row-major: every measure of source row 0, then every
//! measure of source row 1, and so on. `group_by_measure` regroups an
//! exploded sequence so all rows of a measure are contiguous.

use crate::definition::{DataCell, DataRow, Dimension, FieldEntry, Measure};

/// One source row narrowed to a single measure plus all dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct TransposedRow<'a> {
    /// Index of the originating data row.
    pub source_row: usize,

    /// Position of `measure` in the ordered measure list.
    pub measure_index: usize,

    pub measure: &'a Measure,

    /// The measure's per-pivot entry. `None` when the row lacks the measure.
    pub values: Option<&'a FieldEntry>,

    /// Dimension cells, aligned with the dimension list.
    pub dimensions: Vec<Option<&'a DataCell>>,
}

impl<'a> TransposedRow<'a> {
    /// Looks up this row's cell for a pivot column key.
    pub fn pivot_cell(&self, key: &str) -> Option<&'a DataCell> {
        self.values.and_then(|entry| entry.pivot_cell(key))
    }
}

/// Builds `rows.len() * measures.len()` transposed rows in row-major order.
pub fn transpose_rows<'a>(
    rows: &'a [DataRow],
    measures: &[&'a Measure],
    dimensions: &'a [Dimension],
) -> Vec<TransposedRow<'a>> {
    let mut transposed = Vec::with_capacity(rows.len() * measures.len());

    for (source_row, row) in rows.iter().enumerate() {
        for (measure_index, &measure) in measures.iter().enumerate() {
            transposed.push(TransposedRow {
                source_row,
                measure_index,
                measure,
                values: row.get(&measure.name),
                dimensions: dimensions.iter().map(|d| row.cell(&d.name)).collect(),
            });
        }
    }

    transposed
}

/// Regroups rows by measure, keeping each measure's relative row order.
pub fn group_by_measure(mut rows: Vec<TransposedRow<'_>>) -> Vec<TransposedRow<'_>> {
    // Stable sort, so source order survives within each measure.
    rows.sort_by_key(|row| row.measure_index);
    rows
}
