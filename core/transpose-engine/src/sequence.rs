//! FILENAME: core/transpose-engine/src/sequence.rs
//! Applies resolved sort overrides to the measure and pivot column axes.

use crate::definition::{Measure, PivotColumn, QueryResponse};
use crate::overrides::ResolvedOverrides;

/// Reorders `items` by `order`: `ordered[i] = items[order[i]]`.
///
/// An empty order keeps the original sequence. Items whose index is not
/// listed are left out, so a partial order also narrows the axis.
pub fn apply_order<'a, T>(items: &'a [T], order: &[usize]) -> Vec<&'a T> {
    if order.is_empty() {
        return items.iter().collect();
    }
    order.iter().filter_map(|&i| items.get(i)).collect()
}

/// Measures and pivot columns in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedAxes<'a> {
    pub measures: Vec<&'a Measure>,
    pub columns: Vec<&'a PivotColumn>,
}

impl<'a> SequencedAxes<'a> {
    pub fn new(response: &'a QueryResponse, overrides: &ResolvedOverrides) -> Self {
        SequencedAxes {
            measures: apply_order(&response.fields.measure_like, &overrides.measure_order),
            columns: apply_order(&response.pivots, &overrides.pivot_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{FieldDescriptor, TransposeConfig};

    #[test]
    fn test_empty_order_is_identity() {
        let items = ["a", "b", "c"];
        let ordered = apply_order(&items, &[]);
        assert_eq!(ordered, vec![&"a", &"b", &"c"]);
    }

    #[test]
    fn test_order_permutes_and_narrows() {
        let items = ["a", "b", "c"];
        assert_eq!(apply_order(&items, &[2, 0, 1]), vec![&"c", &"a", &"b"]);
        assert_eq!(apply_order(&items, &[1]), vec![&"b"]);
    }

    #[test]
    fn test_sequenced_axes_from_config() {
        let mut response = QueryResponse::default();
        response.fields.measure_like = vec![
            FieldDescriptor::new("m.a", "A"),
            FieldDescriptor::new("m.b", "B"),
        ];
        response.pivots = vec![PivotColumn::new("P0"), PivotColumn::new("P1")];

        let config = TransposeConfig {
            measure_sort: vec!["1".into(), "0".into()],
            pivot_sort: vec!["5".into()],
            ..TransposeConfig::default()
        };
        let overrides = ResolvedOverrides::resolve(&config, 2, 2);
        let axes = SequencedAxes::new(&response, &overrides);

        let names: Vec<&str> = axes.measures.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["m.b", "m.a"]);
        let keys: Vec<&str> = axes.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["P0", "P1"]);
    }
}
