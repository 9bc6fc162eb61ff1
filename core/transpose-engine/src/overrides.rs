//! FILENAME: core/transpose-engine/src/overrides.rs
//! User overrides for labels and axis order.
//!
//! Turns the free-form settings lists into validated structures. Nothing in
//! here fails: malformed entries are dropped and the affected lookup falls
//! back to identity.

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::definition::TransposeConfig;

/// Resolved index sequence for one axis. Empty means "keep original order".
pub type AxisOrder = SmallVec<[usize; 8]>;

// ============================================================================
// LABELS
// ============================================================================

/// Immutable original label -> override label lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    mapping: FxHashMap<String, String>,
}

impl LabelOverrides {
    /// Builds the lookup from `"from|to"` entries. Later entries win.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Self {
        let mapping = entries
            .iter()
            .filter_map(|entry| parse_label_override(entry.as_ref()))
            .collect();
        LabelOverrides { mapping }
    }

    /// Returns the override for `original`, or `original` itself.
    pub fn resolve<'a>(&'a self, original: &'a str) -> &'a str {
        self.mapping.get(original).map_or(original, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Splits `"from|to"`. The target is the segment after the first `|`, up to
/// any further `|`.
fn parse_label_override(entry: &str) -> Option<(String, String)> {
    let Some((from, rest)) = entry.split_once('|') else {
        trace!("ignoring label override without '|': {:?}", entry);
        return None;
    };
    let to = rest.split('|').next().unwrap_or_default().trim();
    if to.is_empty() {
        trace!("ignoring label override with empty target: {:?}", entry);
        return None;
    }
    Some((from.trim().to_string(), to.to_string()))
}

// ============================================================================
// ORDER
// ============================================================================

/// Parses sort entries into indices below `axis_len`.
///
/// Entries that are not non-negative integers, are out of range, or repeat
/// an earlier index are dropped.
pub fn resolve_sort_indices<S: AsRef<str>>(entries: &[S], axis_len: usize) -> AxisOrder {
    let mut indices = AxisOrder::new();
    for entry in entries {
        let entry = entry.as_ref();
        match entry.trim().parse::<usize>() {
            Ok(index) if index < axis_len => {
                if indices.contains(&index) {
                    trace!("dropping repeated sort index {}", index);
                } else {
                    indices.push(index);
                }
            }
            _ => trace!(
                "dropping sort entry {:?} (axis length {})",
                entry,
                axis_len
            ),
        }
    }
    indices
}

// ============================================================================
// RESOLVED SET
// ============================================================================

/// Everything the engine needs from the user's overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOverrides {
    pub measure_labels: LabelOverrides,
    pub col_labels: LabelOverrides,
    pub measure_order: AxisOrder,
    pub pivot_order: AxisOrder,
    /// Display labels of measures whose delta colors are swapped.
    pub inverted_measures: FxHashSet<String>,
}

impl ResolvedOverrides {
    pub fn resolve(config: &TransposeConfig, measure_count: usize, pivot_count: usize) -> Self {
        ResolvedOverrides {
            measure_labels: LabelOverrides::parse(&config.measure_labels),
            col_labels: LabelOverrides::parse(&config.col_labels),
            measure_order: resolve_sort_indices(&config.measure_sort, measure_count),
            pivot_order: resolve_sort_indices(&config.pivot_sort, pivot_count),
            inverted_measures: config.inverted_measures.iter().cloned().collect(),
        }
    }

    pub fn is_inverted(&self, measure_label: &str) -> bool {
        self.inverted_measures.contains(measure_label)
    }
}
