//! Visit duration model.
//!
//! A site visit costs a fixed setup time plus a fixed time per piece of
//! equipment serviced.

/// Minutes spent per equipment unit.
pub const MINUTES_PER_EQUIPMENT: f64 = 15.0;

/// Fixed setup minutes per site visit.
pub const SETUP_MINUTES: f64 = 10.0;

/// Returns the hours required to service `equipment_count` units at one site.
///
/// Negative or non-finite counts are treated as zero, so the result is never
/// below the setup time.
///
/// # Examples
///
/// ```
/// use maintenance_planner::scheduling::duration_hours;
///
/// assert!((duration_hours(10.0) - 2.6667).abs() < 1e-4);
/// assert!((duration_hours(0.0) - 10.0 / 60.0).abs() < 1e-12);
/// ```
pub fn duration_hours(equipment_count: f64) -> f64 {
    let count = if equipment_count.is_finite() {
        equipment_count.max(0.0)
    } else {
        0.0
    };
    count * (MINUTES_PER_EQUIPMENT / 60.0) + SETUP_MINUTES / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // DUR-001: ten units
    // ==========================================================================
    #[test]
    fn test_dur_001_ten_units() {
        let hours = duration_hours(10.0);
        assert!((hours - 2.6667).abs() < 1e-4);
    }

    // ==========================================================================
    // DUR-002: zero units keeps the setup term
    // ==========================================================================
    #[test]
    fn test_dur_002_zero_units_is_setup_only() {
        assert!((duration_hours(0.0) - 0.16667).abs() < 1e-5);
    }

    // ==========================================================================
    // DUR-003: three and twenty units
    // ==========================================================================
    #[test]
    fn test_dur_003_small_and_large_sites() {
        assert!((duration_hours(3.0) - 0.9167).abs() < 1e-4);
        assert!((duration_hours(20.0) - 5.1667).abs() < 1e-4);
    }

    // ==========================================================================
    // DUR-004: bad counts clamp to zero
    // ==========================================================================
    #[test]
    fn test_dur_004_negative_and_nan_clamp() {
        assert_eq!(duration_hours(-4.0), duration_hours(0.0));
        assert_eq!(duration_hours(f64::NAN), duration_hours(0.0));
    }

    #[test]
    fn test_fractional_counts_are_proportional() {
        assert!((duration_hours(2.5) - (0.625 + 10.0 / 60.0)).abs() < 1e-12);
    }
}
