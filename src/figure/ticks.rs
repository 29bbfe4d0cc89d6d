//! Axis limits and tick placement

/// Fraction of the data range added on each side of auto limits
pub const AUTO_MARGIN: f64 = 0.05;

/// Preferred number of tick intervals on an axis
const TARGET_INTERVALS: f64 = 5.0;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Data range extended by `margin` of its span on both sides.
///
/// A degenerate range (all values equal) is widened by 0.5 either way so the
/// axis still has a usable scale.
pub fn padded_range(min: f64, max: f64, margin: f64) -> (f64, f64) {
    let span = max - min;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        let center = if min.is_finite() { min } else { 0.0 };
        return (center - 0.5, center + 0.5);
    }
    (min - span * margin, max + span * margin)
}

/// Distance between ticks for a range: 1, 2, 2.5 or 5 times a power of ten
pub fn nice_step(min: f64, max: f64) -> f64 {
    let raw = (max - min).abs() / TARGET_INTERVALS;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_STEPS
        .iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions inside `[min, max]`, multiples of [`nice_step`]
pub fn nice_ticks(min: f64, max: f64) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let step = nice_step(lo, hi);
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Format a tick value with just enough decimals for `step`
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..=6)
        .find(|d| {
            let scaled = step * 10f64.powi(*d);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
        })
        .unwrap_or(6) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0.0, 10.0, AUTO_MARGIN), (-0.5, 10.5));
        assert_eq!(padded_range(3.0, 3.0, AUTO_MARGIN), (2.5, 3.5));
    }

    #[test]
    fn test_nice_steps() {
        assert_eq!(nice_step(0.0, 10.0), 2.0);
        assert!((nice_step(0.0, 1.0) - 0.2).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 12.0), 2.5);
        assert_eq!(nice_step(0.0, 40.0), 10.0);
    }

    #[test]
    fn test_nice_ticks_stay_inside_range() {
        let ticks = nice_ticks(-0.5, 10.5);
        assert_eq!(ticks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(7.5, 2.5), "7.5");
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(-2.0, 1.0), "-2");
    }
}
