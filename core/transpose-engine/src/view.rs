//! FILENAME: core/transpose-engine/src/view.rs
//! Transpose View - Renderable output for the chart host.
//!
//! The engine hands over a header row and a list of body rows. Cells are
//! tagged by kind so the renderer can dispatch on them, and carry style hints
//! (alignment, color, display text) instead of markup.

use serde::{Deserialize, Serialize};

use crate::definition::{DataCell, FieldValue};
use crate::delta::{DeltaArrow, DeltaColor, DeltaResult};

/// Header text shown for the synthetic row totals column.
pub const ROW_TOTALS_LABEL: &str = "Row Totals";

/// Placeholder text for blank header cells, so the column keeps its width.
pub const BLANK_PLACEHOLDER: &str = "\u{200B}";

// ============================================================================
// CELL TYPES AND METADATA
// ============================================================================

/// What a body cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// A dimension value copied from the source row.
    Dimension,
    /// The label of the row's measure.
    MeasureName,
    /// The measure's value (or delta) for one pivot column.
    Measure,
}

/// Horizontal alignment hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Inherit,
    Center,
}

/// How the renderer should present a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    pub align: TextAlign,
    pub color: DeltaColor,
    /// Final text, including the arrow prefix when deltas are colored.
    pub display_text: String,
}

// ============================================================================
// VIEW CELL
// ============================================================================

/// A single body cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCell {
    pub kind: CellKind,

    pub value: FieldValue,

    /// Pre-formatted display string, when one exists.
    pub rendered: Option<String>,

    /// Delta color. Only set on delta cells.
    pub color: Option<DeltaColor>,

    /// Delta arrow. Only set on delta cells.
    pub arrow: Option<DeltaArrow>,

    pub style: CellStyle,
}

impl ViewCell {
    fn from_parts(kind: CellKind, value: FieldValue, rendered: Option<String>) -> Self {
        ViewCell {
            kind,
            value,
            rendered,
            color: None,
            arrow: None,
            style: CellStyle::default(),
        }
    }

    /// Creates a dimension cell. A missing source cell becomes empty.
    pub fn dimension(cell: Option<&DataCell>) -> Self {
        let cell = cell.cloned().unwrap_or_default();
        Self::from_parts(CellKind::Dimension, cell.value, cell.rendered)
    }

    /// Creates the measure name cell: raw field name, rendered as its label.
    pub fn measure_name(name: &str, label: &str) -> Self {
        Self::from_parts(
            CellKind::MeasureName,
            FieldValue::text(name),
            Some(label.to_string()),
        )
    }

    /// Creates a measure value cell passed through from the source.
    pub fn measure(cell: Option<&DataCell>) -> Self {
        let cell = cell.cloned().unwrap_or_default();
        Self::from_parts(CellKind::Measure, cell.value, cell.rendered)
    }

    /// Creates a measure cell holding a computed delta.
    pub fn delta(delta: DeltaResult) -> Self {
        let value = delta.value.map_or(FieldValue::Empty, FieldValue::Number);
        ViewCell {
            color: Some(delta.color),
            arrow: Some(delta.arrow),
            ..Self::from_parts(CellKind::Measure, value, delta.rendered)
        }
    }

    /// Rendered text if present and non-empty, else the raw value.
    pub fn text(&self) -> String {
        match self.rendered.as_deref() {
            Some(rendered) if !rendered.is_empty() => rendered.to_string(),
            _ => self.value.to_string(),
        }
    }

    /// Fills in the style hints.
    ///
    /// Measure cells are centered. With `color_deltas` the delta color is
    /// applied and the arrow is prefixed; otherwise every cell is neutral.
    pub fn styled(mut self, color_deltas: bool) -> Self {
        let text = self.text();
        self.style = CellStyle {
            align: match self.kind {
                CellKind::Measure => TextAlign::Center,
                CellKind::Dimension | CellKind::MeasureName => TextAlign::Inherit,
            },
            color: if color_deltas {
                self.color.unwrap_or_default()
            } else {
                DeltaColor::Neutral
            },
            display_text: if color_deltas {
                let arrow = self.arrow.unwrap_or_default();
                format!("{}{}", arrow.symbol(), text)
            } else {
                text
            },
        };
        self
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// A single header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderCell {
    /// Spacer above a dimension or measure name column.
    Blank,
    /// Pivot column label.
    Label(String),
    /// The synthetic row totals column.
    RowTotals,
}

impl HeaderCell {
    pub fn display_text(&self) -> &str {
        match self {
            HeaderCell::Blank => BLANK_PLACEHOLDER,
            HeaderCell::Label(label) => label.as_str(),
            HeaderCell::RowTotals => ROW_TOTALS_LABEL,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, HeaderCell::Blank)
    }
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// One body row: a source row narrowed to one measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Index of the originating data row.
    pub source_row: usize,
    /// Field name of the row's measure.
    pub measure: String,
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn cells_of_kind(&self, kind: CellKind) -> impl Iterator<Item = &ViewCell> {
        self.cells.iter().filter(move |c| c.kind == kind)
    }
}

/// The complete transform output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransposeView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<ViewRow>,
}

impl TransposeView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header texts as the renderer displays them.
    pub fn header_texts(&self) -> Vec<&str> {
        self.header.iter().map(HeaderCell::display_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::compute_delta;

    #[test]
    fn test_text_falls_back_to_value() {
        let plain = ViewCell::measure(Some(&DataCell::new(10.0)));
        assert_eq!(plain.text(), "10");

        let rendered = ViewCell::measure(Some(&DataCell::new(10.0).with_rendered("$10.00")));
        assert_eq!(rendered.text(), "$10.00");

        let blank = ViewCell::measure(Some(&DataCell::new(3.0).with_rendered("")));
        assert_eq!(blank.text(), "3");

        let missing = ViewCell::measure(None);
        assert_eq!(missing.value, FieldValue::Empty);
        assert_eq!(missing.text(), "");
    }

    #[test]
    fn test_measure_name_cell() {
        let cell = ViewCell::measure_name("orders.count", "Orders");
        assert_eq!(cell.kind, CellKind::MeasureName);
        assert_eq!(cell.value, FieldValue::text("orders.count"));
        assert_eq!(cell.text(), "Orders");
    }

    #[test]
    fn test_styled_without_color() {
        let cell = ViewCell::delta(compute_delta(Some(10.0), Some(5.0), false, 1)).styled(false);
        assert_eq!(cell.style.align, TextAlign::Center);
        assert_eq!(cell.style.color, DeltaColor::Neutral);
        assert_eq!(cell.style.display_text, "100.0%");

        let dim = ViewCell::dimension(Some(&DataCell::new("x"))).styled(false);
        assert_eq!(dim.style.align, TextAlign::Inherit);
    }

    #[test]
    fn test_styled_with_color() {
        let up = ViewCell::delta(compute_delta(Some(10.0), Some(5.0), false, 1)).styled(true);
        assert_eq!(up.style.color, DeltaColor::Green);
        assert_eq!(up.style.display_text, "▲100.0%");

        let raw = ViewCell::measure(Some(&DataCell::new(10.0))).styled(true);
        assert_eq!(raw.style.color, DeltaColor::Neutral);
        assert_eq!(raw.style.display_text, "10");
    }

    #[test]
    fn test_unavailable_delta_cell() {
        let cell = ViewCell::delta(compute_delta(Some(3.0), Some(0.0), false, 1)).styled(true);
        assert_eq!(cell.value, FieldValue::Empty);
        assert_eq!(cell.color, Some(DeltaColor::Neutral));
        assert_eq!(cell.arrow, Some(DeltaArrow::None));
        assert_eq!(cell.style.display_text, "");
    }

    #[test]
    fn test_header_display_text() {
        assert_eq!(HeaderCell::Blank.display_text(), "\u{200B}");
        assert_eq!(HeaderCell::Label("Q1".into()).display_text(), "Q1");
        assert_eq!(HeaderCell::RowTotals.display_text(), "Row Totals");
        assert!(HeaderCell::Blank.is_blank());
    }
}
