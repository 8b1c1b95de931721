use super::color::Rgb;
use std::fmt;

/// Orientation of a repeating background gradient: Filled cells paint
/// diagonally, pill cells left to right.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GradientDirection {
    Diagonal,
    Horizontal,
}

impl fmt::Display for GradientDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GradientDirection::Diagonal => "45deg",
            GradientDirection::Horizontal => "to right",
        })
    }
}

/// Formats an ordered color sequence as the stop list of a repeating
/// gradient: N equal-width bands with two-decimal percentages, independent
/// of the runtime locale.  A single color collapses to its bare hex form so
/// that no zero-width stops are emitted, and no colors yield an empty
/// string.
pub(crate) fn gradient_stops(colors: &[Rgb]) -> String {
    if let [only] = colors {
        return only.to_string();
    }
    let total = f64::from(u32::try_from(colors.len()).unwrap_or(u32::MAX));
    let mut bands = Vec::with_capacity(colors.len());
    for (i, color) in (0u32..).zip(colors) {
        let start = f64::from(i) * 100.0 / total;
        let end = f64::from(i + 1) * 100.0 / total;
        bands.push(format!("{color} {start:.2}% {end:.2}%"));
    }
    bands.join(", ")
}

/// Wraps the stop list for `colors` in a repeating-gradient directive
/// oriented per `direction`.  An empty color sequence produces an empty
/// value: no background rather than a degenerate directive.
pub(crate) fn background_image(colors: &[Rgb], direction: GradientDirection) -> String {
    let stops = gradient_stops(colors);
    if stops.is_empty() {
        String::new()
    } else {
        format!("repeating-linear-gradient({direction}, {stops})")
    }
}
