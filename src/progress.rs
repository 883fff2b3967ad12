//! progress bar easing, independent of the data pipeline

use rust_decimal::prelude::ToPrimitive;

use crate::decimal::Rate;

/// rate as a bar width in percent
pub fn target_percent(progress: Rate) -> f64 {
    progress.clamp_unit().as_percentage().to_f64().unwrap_or(0.0)
}

/// `1 - (1 - t)^3`, t clamped to [0, 1]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// bar width in percent at `elapsed` (fraction of the animation) between two widths
pub fn animate(from_percent: f64, to_percent: f64, elapsed: f64) -> f64 {
    let from = from_percent.clamp(0.0, 100.0);
    let to = to_percent.clamp(0.0, 100.0);
    from + (to - from) * ease_out_cubic(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_percent() {
        assert_eq!(target_percent(Rate::from_percentage(25)), 25.0);
        assert_eq!(target_percent(Rate::from_percentage(140)), 100.0);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(animate(0.0, 80.0, 0.0), 0.0);
        assert_eq!(animate(0.0, 80.0, 1.0), 80.0);
        assert_eq!(animate(40.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_eases_out() {
        // halfway through time is past halfway in distance
        let mid = animate(0.0, 100.0, 0.5);
        assert!((mid - 87.5).abs() < 1e-9);

        let mut last = 0.0;
        for step in 1..=10 {
            let value = animate(0.0, 100.0, step as f64 / 10.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_inputs_are_clamped() {
        assert_eq!(animate(0.0, 150.0, 2.0), 100.0);
        assert_eq!(animate(-20.0, 50.0, -1.0), 0.0);
    }
}
