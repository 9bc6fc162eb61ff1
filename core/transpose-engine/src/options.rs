//! FILENAME: core/transpose-engine/src/options.rs
//! Visualization option schema.
//!
//! Describes the settings the host's configuration panel offers and which of
//! them are visible for a given configuration. The engine itself never reads
//! this table; it exists for the configuration UI.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::definition::{TransposeConfig, DEFAULT_SIG_FIGS};

/// Panel section an option is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionSection {
    Labels,
    Sorts,
    Deltas,
}

/// Input control type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionKind {
    Array,
    Boolean,
    Number,
}

/// Default value shown in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum OptionDefault {
    Boolean(bool),
    Number(f64),
}

/// When an option is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisibilityRule {
    Always,
    /// Only while pivots are shown as deltas.
    WhenDeltas,
    /// Only while deltas are shown and color coded.
    WhenColoredDeltas,
}

impl VisibilityRule {
    pub fn is_visible(self, config: &TransposeConfig) -> bool {
        match self {
            VisibilityRule::Always => true,
            VisibilityRule::WhenDeltas => config.pivots_as_delta,
            VisibilityRule::WhenColoredDeltas => config.pivots_as_delta && config.color_deltas,
        }
    }
}

/// One configurable option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionDescriptor {
    /// Settings key (matches the serialized `TransposeConfig` field).
    pub id: &'static str,
    pub label: &'static str,
    pub section: OptionSection,
    pub kind: OptionKind,
    pub default: Option<OptionDefault>,
    pub placeholder: Option<&'static str>,
    /// Position within the section, when the host should not use declaration order.
    pub order: Option<u8>,
    pub visibility: VisibilityRule,
}

impl OptionDescriptor {
    pub fn is_visible(&self, config: &TransposeConfig) -> bool {
        self.visibility.is_visible(config)
    }
}

/// All options, in declaration order.
pub const OPTIONS: &[OptionDescriptor] = &[
    OptionDescriptor {
        id: "colLabels",
        label: "Override Column Names",
        section: OptionSection::Labels,
        kind: OptionKind::Array,
        default: None,
        placeholder: Some("7 Days Trailing|Last Week,..."),
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "measureLabels",
        label: "Override Measure Names",
        section: OptionSection::Labels,
        kind: OptionKind::Array,
        default: None,
        placeholder: Some("Gpv Fxd Usd|GPV,..."),
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "hideMeasureLabels",
        label: "Hide Measure Names",
        section: OptionSection::Labels,
        kind: OptionKind::Boolean,
        default: Some(OptionDefault::Boolean(false)),
        placeholder: None,
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "measureSort",
        label: "Override Measure Sort Order",
        section: OptionSection::Sorts,
        kind: OptionKind::Array,
        default: None,
        placeholder: Some("0,1,4,2,5,3,..."),
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "measureSortFirst",
        label: "Sort Measures before Dimensions",
        section: OptionSection::Sorts,
        kind: OptionKind::Boolean,
        default: None,
        placeholder: None,
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "pivotSort",
        label: "Override Pivot Sort Order",
        section: OptionSection::Sorts,
        kind: OptionKind::Array,
        default: None,
        placeholder: Some("0,1,4,2,5,3,..."),
        order: None,
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "pivotsAsDelta",
        label: "Display Pivots as Delta from 1st",
        section: OptionSection::Deltas,
        kind: OptionKind::Boolean,
        default: Some(OptionDefault::Boolean(false)),
        placeholder: None,
        order: Some(0),
        visibility: VisibilityRule::Always,
    },
    OptionDescriptor {
        id: "sigFigs",
        label: "Sig Figs",
        section: OptionSection::Deltas,
        kind: OptionKind::Number,
        default: Some(OptionDefault::Number(DEFAULT_SIG_FIGS as f64)),
        placeholder: None,
        order: Some(1),
        visibility: VisibilityRule::WhenDeltas,
    },
    OptionDescriptor {
        id: "colorDeltas",
        label: "Color Code Deltas",
        section: OptionSection::Deltas,
        kind: OptionKind::Boolean,
        default: Some(OptionDefault::Boolean(false)),
        placeholder: None,
        order: Some(2),
        visibility: VisibilityRule::WhenDeltas,
    },
    OptionDescriptor {
        id: "invertedMeasures",
        label: "Invert Colors for Measures",
        section: OptionSection::Deltas,
        kind: OptionKind::Array,
        default: None,
        placeholder: Some("GPV, Revenue, Count,..."),
        order: Some(3),
        visibility: VisibilityRule::WhenColoredDeltas,
    },
];

/// Looks up an option by its settings key.
pub fn find_option(id: &str) -> Option<&'static OptionDescriptor> {
    OPTIONS.iter().find(|o| o.id == id)
}

/// Computes option id -> visible for the given settings.
pub fn option_visibility(config: &TransposeConfig) -> FxHashMap<&'static str, bool> {
    OPTIONS
        .iter()
        .map(|o| (o.id, o.is_visible(config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ids_match_config_keys() {
        let json = serde_json::to_value(TransposeConfig::default()).unwrap();
        let keys = json.as_object().unwrap();
        for option in OPTIONS {
            assert!(keys.contains_key(option.id), "no config key for {}", option.id);
        }
        assert_eq!(keys.len(), OPTIONS.len());
    }

    #[test]
    fn test_delta_options_hidden_by_default() {
        let visibility = option_visibility(&TransposeConfig::default());
        assert_eq!(visibility.len(), OPTIONS.len());
        assert!(visibility["pivotsAsDelta"]);
        assert!(visibility["measureSort"]);
        assert!(!visibility["sigFigs"]);
        assert!(!visibility["colorDeltas"]);
        assert!(!visibility["invertedMeasures"]);
    }

    #[test]
    fn test_inverted_measures_needs_colored_deltas() {
        let mut config = TransposeConfig {
            pivots_as_delta: true,
            ..TransposeConfig::default()
        };
        let visibility = option_visibility(&config);
        assert!(visibility["sigFigs"]);
        assert!(visibility["colorDeltas"]);
        assert!(!visibility["invertedMeasures"]);

        config.color_deltas = true;
        assert!(option_visibility(&config)["invertedMeasures"]);

        config.pivots_as_delta = false;
        assert!(!option_visibility(&config)["invertedMeasures"]);
    }

    #[test]
    fn test_find_option() {
        let sig_figs = find_option("sigFigs").unwrap();
        assert_eq!(sig_figs.kind, OptionKind::Number);
        assert_eq!(sig_figs.section, OptionSection::Deltas);
        assert_eq!(sig_figs.default, Some(OptionDefault::Number(2.0)));
        assert!(find_option("unknown").is_none());
    }
}
