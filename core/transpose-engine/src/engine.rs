//! FILENAME: core/transpose-engine/src/engine.rs
//! Transpose Engine - Turns a pivoted query result into a measures-to-rows view.
//!
//! This module takes a QueryResponse (data) and a TransposeConfig (settings)
//! and produces a TransposeView (header + body rows ready for rendering).
//!
//! Algorithm:
//! 1. Resolve label and order overrides
//! 2. Reorder measures and pivot columns
//! 3. Explode each source row into one row per measure (optionally grouped by measure)
//! 4. Format each exploded row into typed cells, computing deltas when enabled
//! 5. Build the header row from the ordered pivot columns

use log::debug;

use crate::definition::{
    FieldEntry, Measure, PivotColumn, QueryResponse, TransposeConfig, ROW_TOTAL_KEY,
};
use crate::delta::compute_delta;
use crate::error::TransposeError;
use crate::overrides::ResolvedOverrides;
use crate::sequence::SequencedAxes;
use crate::transpose::{group_by_measure, transpose_rows, TransposedRow};
use crate::view::{HeaderCell, TransposeView, ViewCell, ViewRow};

/// Joins the values of a multi-field pivot column label.
const PIVOT_LABEL_SEPARATOR: &str = " - ";

// ============================================================================
// TRANSPOSE CALCULATOR
// ============================================================================

/// Runs one transform over an immutable query result snapshot.
pub struct TransposeCalculator<'a> {
    response: &'a QueryResponse,
    config: &'a TransposeConfig,
    overrides: ResolvedOverrides,
    axes: SequencedAxes<'a>,
}

impl<'a> TransposeCalculator<'a> {
    pub fn new(response: &'a QueryResponse, config: &'a TransposeConfig) -> Self {
        let overrides = ResolvedOverrides::resolve(
            config,
            response.fields.measure_like.len(),
            response.pivots.len(),
        );
        let axes = SequencedAxes::new(response, &overrides);

        TransposeCalculator {
            response,
            config,
            overrides,
            axes,
        }
    }

    /// Ordered measures after applying the sort override.
    pub fn measures(&self) -> &[&'a Measure] {
        &self.axes.measures
    }

    /// Ordered pivot columns after applying the sort override.
    pub fn columns(&self) -> &[&'a PivotColumn] {
        &self.axes.columns
    }

    /// Executes the full calculation and returns the view.
    pub fn calculate(&self) -> TransposeView {
        let header = self.build_header();

        let mut transposed = transpose_rows(
            &self.response.data,
            &self.axes.measures,
            &self.response.fields.dimension_like,
        );
        if self.config.measure_sort_first {
            transposed = group_by_measure(transposed);
        }

        let rows: Vec<ViewRow> = transposed.iter().map(|row| self.format_row(row)).collect();

        debug!(
            "transposed {} source rows x {} measures into {} rows over {} pivot columns",
            self.response.data.len(),
            self.axes.measures.len(),
            rows.len(),
            self.axes.columns.len()
        );

        TransposeView { header, rows }
    }

    // ========================================================================
    // BODY
    // ========================================================================

    /// Display label of a measure after overrides.
    pub fn measure_label<'m>(&'m self, measure: &'m Measure) -> &'m str {
        self.overrides.measure_labels.resolve(measure.display_label())
    }

    /// Builds the ordered cells of one exploded row.
    fn format_row(&self, row: &TransposedRow<'_>) -> ViewRow {
        let label = self.measure_label(row.measure);
        let mut cells =
            Vec::with_capacity(row.dimensions.len() + 1 + self.axes.columns.len());

        let name_cell = (!self.config.hide_measure_labels)
            .then(|| ViewCell::measure_name(&row.measure.name, label));
        let dimension_cells = row.dimensions.iter().map(|&cell| ViewCell::dimension(cell));

        if self.config.measure_sort_first {
            cells.extend(name_cell);
            cells.extend(dimension_cells);
        } else {
            cells.extend(dimension_cells);
            cells.extend(name_cell);
        }

        // A row without the measure gets no value cells.
        if let Some(values) = row.values {
            cells.extend(self.measure_cells(values, label));
        }

        let color_deltas = self.config.colors_deltas();
        ViewRow {
            source_row: row.source_row,
            measure: row.measure.name.clone(),
            cells: cells
                .into_iter()
                .map(|cell| cell.styled(color_deltas))
                .collect(),
        }
    }

    /// One cell per ordered pivot column: raw values, or deltas against the
    /// first column when enabled.
    fn measure_cells(&self, values: &FieldEntry, label: &str) -> Vec<ViewCell> {
        if !self.config.pivots_as_delta {
            return self
                .axes
                .columns
                .iter()
                .map(|column| ViewCell::measure(values.pivot_cell(&column.key)))
                .collect();
        }

        let inverted = self.config.color_deltas && self.overrides.is_inverted(label);
        let numerator = self
            .axes
            .columns
            .first()
            .and_then(|column| values.pivot_cell(&column.key))
            .and_then(|cell| cell.value.as_number());

        self.axes
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = values.pivot_cell(&column.key);
                if i == 0 {
                    ViewCell::measure(cell)
                } else {
                    let denominator = cell.and_then(|c| c.value.as_number());
                    ViewCell::delta(compute_delta(
                        numerator,
                        denominator,
                        inverted,
                        self.config.sig_figs,
                    ))
                }
            })
            .collect()
    }

    // ========================================================================
    // HEADER
    // ========================================================================

    /// Blank cells above the measure name and dimension columns, then one
    /// label per ordered pivot column.
    pub fn build_header(&self) -> Vec<HeaderCell> {
        let dimension_count = self.response.fields.dimension_like.len();
        let mut header = Vec::with_capacity(1 + dimension_count + self.axes.columns.len());

        if !self.config.hide_measure_labels {
            header.push(HeaderCell::Blank);
        }
        header.extend(std::iter::repeat(HeaderCell::Blank).take(dimension_count));
        header.extend(self.axes.columns.iter().map(|column| self.column_header(column)));

        header
    }

    fn column_header(&self, column: &PivotColumn) -> HeaderCell {
        let raw = self.raw_column_label(column);
        let label = self.overrides.col_labels.resolve(&raw);
        if label == ROW_TOTAL_KEY {
            HeaderCell::RowTotals
        } else {
            HeaderCell::Label(label.to_string())
        }
    }

    /// Pivot values in pivot field order, falling back to the data's own
    /// values (sorted by field name) and finally to the column key.
    fn raw_column_label(&self, column: &PivotColumn) -> String {
        let mut parts: Vec<String> = self
            .response
            .fields
            .pivots
            .iter()
            .filter_map(|field| column.data.get(&field.name))
            .map(ToString::to_string)
            .collect();

        if parts.is_empty() {
            let mut entries: Vec<_> = column.data.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            parts = entries.into_iter().map(|(_, value)| value.to_string()).collect();
        }

        if parts.is_empty() {
            column.key.clone()
        } else {
            parts.join(PIVOT_LABEL_SEPARATOR)
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates the measures-to-rows view of a query result.
/// This is the main entry point for the engine.
pub fn calculate_transpose(response: &QueryResponse, config: &TransposeConfig) -> TransposeView {
    TransposeCalculator::new(response, config).calculate()
}

/// Decodes the host's JSON payload and settings, then calculates the view.
pub fn calculate_transpose_json(
    response_json: &str,
    config_json: &str,
) -> Result<TransposeView, TransposeError> {
    let response: QueryResponse = serde_json::from_str(response_json)?;
    let config: TransposeConfig = serde_json::from_str(config_json)?;
    Ok(calculate_transpose(&response, &config))
}
