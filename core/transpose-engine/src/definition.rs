//! FILENAME: core/transpose-engine/src/definition.rs
//! Transpose Definition - The host payload and per-run settings.
//!
//! This module contains all the types needed to DESCRIBE one transform run:
//! - Field descriptors and pivot columns of a query result
//! - Data rows, where each measure is keyed by pivot column
//! - The user's visualization settings (`TransposeConfig`)
//!
//! Every structure here is an immutable snapshot for the duration of a run.
//! Settings are decoded leniently because the host stores some booleans and
//! numbers as strings.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Reserved pivot value that marks the synthetic "row totals" column.
pub const ROW_TOTAL_KEY: &str = "$$$_row_total_$$$";

/// Decimal places used for delta percentages when the setting is absent.
pub const DEFAULT_SIG_FIGS: u8 = 2;

/// Upper bound for `sig_figs`; larger requests are clamped.
pub const MAX_SIG_FIGS: u8 = 20;

// ============================================================================
// VALUES
// ============================================================================

/// A raw value as delivered by the query result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Returns the numeric payload, if this value is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Number(n) => f.write_str(&format_general(*n)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a number without a fixed precision: integers drop the decimal
/// point, fractions keep up to 10 places with trailing zeros trimmed.
fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A single value with its optional host-rendered text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCell {
    pub value: FieldValue,

    /// Pre-formatted display string supplied by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

impl DataCell {
    pub fn new(value: impl Into<FieldValue>) -> Self {
        DataCell {
            value: value.into(),
            rendered: None,
        }
    }

    pub fn with_rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }
}

/// One field's entry in a data row.
///
/// Dimensions carry a single cell; pivoted measures carry one cell per
/// pivot column key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    Cell(DataCell),
    Pivoted(FxHashMap<String, DataCell>),
}

impl FieldEntry {
    pub fn as_cell(&self) -> Option<&DataCell> {
        match self {
            FieldEntry::Cell(cell) => Some(cell),
            FieldEntry::Pivoted(_) => None,
        }
    }

    /// Looks up the cell for a pivot column key. Unpivoted entries have none.
    pub fn pivot_cell(&self, key: &str) -> Option<&DataCell> {
        match self {
            FieldEntry::Pivoted(cells) => cells.get(key),
            FieldEntry::Cell(_) => None,
        }
    }
}

// ============================================================================
// QUERY RESULT
// ============================================================================

/// A dimension or measure descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable field name, used as the key into data rows.
    pub name: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Optional shorter display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_short: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            label: label.into(),
            label_short: None,
        }
    }

    pub fn with_short_label(mut self, label_short: impl Into<String>) -> Self {
        self.label_short = Some(label_short.into());
        self
    }

    /// Short label if present, then the full label, then the field name.
    pub fn display_label(&self) -> &str {
        match self.label_short.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ if !self.label.is_empty() => self.label.as_str(),
            _ => self.name.as_str(),
        }
    }
}

pub type Dimension = FieldDescriptor;
pub type Measure = FieldDescriptor;

/// One pivot group instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotColumn {
    /// Key into a measure's per-pivot cells.
    pub key: String,

    /// Pivot field name -> pivot value, used for the header label.
    #[serde(default)]
    pub data: FxHashMap<String, FieldValue>,
}

impl PivotColumn {
    pub fn new(key: impl Into<String>) -> Self {
        PivotColumn {
            key: key.into(),
            data: FxHashMap::default(),
        }
    }

    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }
}

/// A query result row: field name -> entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRow {
    pub fields: FxHashMap<String, FieldEntry>,
}

impl DataRow {
    pub fn new() -> Self {
        DataRow::default()
    }

    pub fn with_dimension(mut self, name: impl Into<String>, cell: DataCell) -> Self {
        self.fields.insert(name.into(), FieldEntry::Cell(cell));
        self
    }

    pub fn with_measure<K, I>(mut self, name: impl Into<String>, cells: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DataCell)>,
    {
        let cells = cells.into_iter().map(|(k, c)| (k.into(), c)).collect();
        self.fields.insert(name.into(), FieldEntry::Pivoted(cells));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    /// Returns the single cell stored under a dimension name.
    pub fn cell(&self, name: &str) -> Option<&DataCell> {
        self.get(name).and_then(FieldEntry::as_cell)
    }
}

/// Field lists of a query result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryFields {
    #[serde(default)]
    pub dimension_like: Vec<Dimension>,

    #[serde(default)]
    pub measure_like: Vec<Measure>,

    /// Pivoted dimensions, in pivot order. Used to build column labels.
    #[serde(default)]
    pub pivots: Vec<FieldDescriptor>,
}

/// The full query result handed over by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub fields: QueryFields,

    #[serde(default)]
    pub pivots: Vec<PivotColumn>,

    #[serde(default)]
    pub data: Vec<DataRow>,
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Per-run visualization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransposeConfig {
    /// `"from|to"` overrides for pivot column labels.
    #[serde(default, deserialize_with = "lenient_list")]
    pub col_labels: Vec<String>,

    /// `"from|to"` overrides for measure labels.
    #[serde(default, deserialize_with = "lenient_list")]
    pub measure_labels: Vec<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub hide_measure_labels: bool,

    /// Index permutation over the measures (numeric strings).
    #[serde(default, deserialize_with = "lenient_list")]
    pub measure_sort: Vec<String>,

    /// Group rows by measure and lead each row with the measure name.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub measure_sort_first: bool,

    /// Index permutation over the pivot columns (numeric strings).
    #[serde(default, deserialize_with = "lenient_list")]
    pub pivot_sort: Vec<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub pivots_as_delta: bool,

    /// Decimal places of delta percentages. Read only with `pivots_as_delta`.
    #[serde(default = "default_sig_figs", deserialize_with = "lenient_sig_figs")]
    pub sig_figs: u8,

    /// Read only with `pivots_as_delta`.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub color_deltas: bool,

    /// Measure labels whose delta colors are swapped.
    #[serde(default, deserialize_with = "lenient_list")]
    pub inverted_measures: Vec<String>,
}

impl Default for TransposeConfig {
    fn default() -> Self {
        TransposeConfig {
            col_labels: Vec::new(),
            measure_labels: Vec::new(),
            hide_measure_labels: false,
            measure_sort: Vec::new(),
            measure_sort_first: false,
            pivot_sort: Vec::new(),
            pivots_as_delta: false,
            sig_figs: DEFAULT_SIG_FIGS,
            color_deltas: false,
            inverted_measures: Vec::new(),
        }
    }
}

impl TransposeConfig {
    /// Whether delta colors and arrows should be shown.
    pub fn colors_deltas(&self) -> bool {
        self.pivots_as_delta && self.color_deltas
    }
}

fn default_sig_figs() -> u8 {
    DEFAULT_SIG_FIGS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Missing,
    Bool(bool),
    Text(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match BoolLike::deserialize(deserializer)? {
        BoolLike::Missing => false,
        BoolLike::Bool(b) => b,
        BoolLike::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Missing,
    Number(f64),
    Text(String),
}

fn lenient_sig_figs<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match NumberLike::deserialize(deserializer)? {
        NumberLike::Missing => None,
        NumberLike::Number(n) => Some(n),
        NumberLike::Text(s) => s.trim().parse::<f64>().ok(),
    };
    Ok(match raw {
        Some(n) if n.is_finite() => n.round().clamp(0.0, f64::from(MAX_SIG_FIGS)) as u8,
        _ => DEFAULT_SIG_FIGS,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListItem {
    Text(String),
    Number(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListLike {
    Missing,
    List(Vec<ListItem>),
    Text(String),
}

/// Accepts a list of strings/numbers or a single comma-separated string.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListLike::deserialize(deserializer)? {
        ListLike::Missing => Vec::new(),
        ListLike::List(items) => items
            .into_iter()
            .map(|item| match item {
                ListItem::Text(s) => s.trim().to_string(),
                ListItem::Number(n) => format_general(n),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        ListLike::Text(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
