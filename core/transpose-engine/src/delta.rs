//! FILENAME: core/transpose-engine/src/delta.rs
//! Relative deltas between pivot columns.
//!
//! Column 0 is the baseline. Every later column is shown as
//! `baseline / column - 1`, rendered as a percentage, with a color and an
//! arrow describing the direction of the change. When no comparison is
//! possible (zero, missing, or non-numeric operands) the delta is `None`,
//! neutral, and has no arrow.

use serde::{Deserialize, Serialize};

use crate::definition::MAX_SIG_FIGS;

/// Color hint for a delta cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaColor {
    Green,
    Red,
    #[default]
    Neutral,
}

impl DeltaColor {
    /// CSS color name used by the renderer.
    pub fn css_name(self) -> &'static str {
        match self {
            DeltaColor::Green => "green",
            DeltaColor::Red => "red",
            DeltaColor::Neutral => "dimgray",
        }
    }
}

/// Direction marker for a delta cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaArrow {
    Up,
    Down,
    #[default]
    None,
}

impl DeltaArrow {
    pub fn symbol(self) -> &'static str {
        match self {
            DeltaArrow::Up => "▲",
            DeltaArrow::Down => "▼",
            DeltaArrow::None => "",
        }
    }
}

/// Outcome of comparing one pivot column against the baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeltaResult {
    /// Unrounded relative change; `None` when no comparison is possible.
    pub value: Option<f64>,
    /// Percentage text, e.g. `"12.50%"`.
    pub rendered: Option<String>,
    pub color: DeltaColor,
    pub arrow: DeltaArrow,
}

impl DeltaResult {
    /// Result for operands that cannot be compared.
    pub fn unavailable() -> Self {
        DeltaResult::default()
    }
}

/// Computes `numerator / denominator - 1` with color and arrow.
///
/// `inverted` swaps the colors, for measures where a decrease is good.
///
/// Direction is judged on the rendered percentage, not on the sign of the raw
/// value: a change that rounds to zero at `sig_figs` places (e.g. 100001 vs
/// 100000 at 2 places) is neutral with no arrow even though it is positive.
/// Ratios whose percentage is not finite are unavailable.
pub fn compute_delta(
    numerator: Option<f64>,
    denominator: Option<f64>,
    inverted: bool,
    sig_figs: u8,
) -> DeltaResult {
    let (Some(numerator), Some(denominator)) = (numerator, denominator) else {
        return DeltaResult::unavailable();
    };
    if numerator.is_nan() || denominator.is_nan() || denominator == 0.0 {
        return DeltaResult::unavailable();
    }
    let value = numerator / denominator - 1.0;
    // The percentage can overflow even when the ratio does not.
    if !value.is_finite() || !(value * 100.0).is_finite() {
        return DeltaResult::unavailable();
    }

    let rendered = format_delta_percent(value, sig_figs);
    let shown_as_zero = is_zero_percent(&rendered);

    let (up_color, down_color) = if inverted {
        (DeltaColor::Red, DeltaColor::Green)
    } else {
        (DeltaColor::Green, DeltaColor::Red)
    };

    let (color, arrow) = if shown_as_zero {
        (DeltaColor::Neutral, DeltaArrow::None)
    } else if value > 0.0 {
        (up_color, DeltaArrow::Up)
    } else {
        (down_color, DeltaArrow::Down)
    };

    DeltaResult {
        value: Some(value),
        rendered: Some(rendered),
        color,
        arrow,
    }
}

/// Renders a ratio as a percentage with `sig_figs` decimal places.
///
/// Negative zero is printed without its sign.
pub fn format_delta_percent(value: f64, sig_figs: u8) -> String {
    let places = usize::from(sig_figs.min(MAX_SIG_FIGS));
    let mut text = format!("{:.*}", places, value * 100.0);
    if text.starts_with('-') && is_zero_percent(&text) {
        text.remove(0);
    }
    text.push('%');
    text
}

fn is_zero_percent(text: &str) -> bool {
    let mut digits = text.chars().filter(char::is_ascii_digit).peekable();
    digits.peek().is_some() && digits.all(|c| c == '0')
}
