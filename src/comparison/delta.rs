use super::types::{Delta, Direction, Magnitude};

/// Delta between two observations of one metric.
///
/// `percentage` is relative to `old`: `|new - old| / |old| * 100`, or 100
/// when `old` is zero and `new` is not. Swapping the arguments flips the
/// direction but generally not the percentage.
pub fn calculate_delta(old: f64, new: f64, significance_threshold: f64) -> Delta {
    let absolute = new - old;
    let percentage = if old != 0.0 {
        absolute.abs() / old.abs() * 100.0
    } else if new != 0.0 {
        100.0
    } else {
        0.0
    };

    let direction = if absolute > 0.0 {
        Direction::Increase
    } else if absolute < 0.0 {
        Direction::Decrease
    } else {
        Direction::Neutral
    };

    Delta {
        absolute,
        percentage,
        direction,
        significant: percentage >= significance_threshold,
        magnitude: Magnitude::from_percentage(percentage),
    }
}

/// Forced delta for an entity that exists only in the current snapshot.
pub(crate) fn added_delta(value: f64) -> Delta {
    Delta {
        absolute: value,
        percentage: 100.0,
        direction: Direction::Increase,
        significant: true,
        magnitude: Magnitude::Moderate,
    }
}

/// Forced delta for an entity that exists only in the baseline snapshot.
pub(crate) fn removed_delta(value: f64) -> Delta {
    Delta {
        absolute: 0.0 - value,
        percentage: 100.0,
        direction: Direction::Decrease,
        significant: true,
        magnitude: Magnitude::Major,
    }
}
