const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Render seconds as `{d}d {h}h {m}m {s}s`, flooring at each unit.
///
/// Fractional seconds are truncated. Negative and non-finite input is
/// rendered as zero.
pub fn format_time(total_secs: f64) -> String {
    let total = if total_secs.is_finite() && total_secs > 0.0 {
        total_secs
    } else {
        0.0
    };

    let days = (total / SECS_PER_DAY).floor() as u64;
    let hours = ((total % SECS_PER_DAY) / SECS_PER_HOUR).floor() as u64;
    let mins = ((total % SECS_PER_HOUR) / SECS_PER_MINUTE).floor() as u64;
    let secs = (total % SECS_PER_MINUTE).floor() as u64;

    format!("{}d {}h {}m {}s", days, hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_unit_boundaries() {
        assert_eq!(format_time(90061.0), "1d 1h 1m 1s");
        assert_eq!(format_time(59.0), "0d 0h 0m 59s");
        assert_eq!(format_time(0.0), "0d 0h 0m 0s");
        assert_eq!(format_time(86400.0), "1d 0h 0m 0s");
        assert_eq!(format_time(3600.0), "0d 1h 0m 0s");
    }

    #[test]
    fn test_format_time_truncates_fractions() {
        assert_eq!(format_time(59.999), "0d 0h 0m 59s");
        assert_eq!(format_time(3000.0 / 1.75), "0d 0h 28m 34s");
    }

    #[test]
    fn test_format_time_clamps_invalid() {
        assert_eq!(format_time(-5.0), "0d 0h 0m 0s");
        assert_eq!(format_time(f64::NAN), "0d 0h 0m 0s");
        assert_eq!(format_time(f64::INFINITY), "0d 0h 0m 0s");
    }
}
