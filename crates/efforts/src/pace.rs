//! Pace, velocity and VDOT derived from a covered distance and elapsed time.

use crate::errors::EffortError;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Linear pace-to-fitness factor: VDOT ~ mph * 4.35.
const VDOT_PER_MPH: f64 = 4.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffortMetrics {
    pub distance_miles: f64,
    pub pace_seconds_per_mile: f64,
    pub velocity_mph: f64,
    pub equivalent_vdot: u32,
}

impl EffortMetrics {
    /// Fails for windows with no distance or no time, which would otherwise
    /// produce an infinite or NaN pace.
    pub fn compute(distance_meters: f64, time_seconds: f64) -> Result<Self, EffortError> {
        let degenerate = || EffortError::DegenerateWindow {
            distance_meters,
            time_seconds,
        };

        if !(distance_meters.is_finite() && distance_meters > 0.0) {
            return Err(degenerate());
        }
        if !(time_seconds.is_finite() && time_seconds > 0.0) {
            return Err(degenerate());
        }

        let distance_miles = distance_meters / METERS_PER_MILE;
        let pace_seconds_per_mile = time_seconds / distance_miles;
        let velocity_mph = distance_miles / (time_seconds / 3600.0);

        Ok(Self {
            distance_miles,
            pace_seconds_per_mile,
            velocity_mph,
            equivalent_vdot: (velocity_mph * VDOT_PER_MPH).round() as u32,
        })
    }

    pub fn pace_formatted(&self) -> String {
        format_duration(self.pace_seconds_per_mile)
    }
}

/// Formats seconds as `M:SS`, or `H:MM:SS` from one hour up.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Short form for an improvement margin: `12s` below a minute, otherwise `M:SS`.
pub fn format_margin(seconds: f64) -> String {
    if seconds < 1.0 {
        "<1s".to_string()
    } else if seconds < 60.0 {
        format!("{}s", seconds.round() as u64)
    } else {
        format_duration(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_minute_mile() {
        let metrics = EffortMetrics::compute(METERS_PER_MILE, 360.0).unwrap();
        assert!((metrics.distance_miles - 1.0).abs() < 1e-12);
        assert!((metrics.pace_seconds_per_mile - 360.0).abs() < 1e-9);
        assert!((metrics.velocity_mph - 10.0).abs() < 1e-9);
        // 43.5 rounds away from zero
        assert_eq!(metrics.equivalent_vdot, 44);
        assert_eq!(metrics.pace_formatted(), "6:00");
    }

    #[test]
    fn test_degenerate_windows_are_errors() {
        assert!(matches!(
            EffortMetrics::compute(0.0, 100.0),
            Err(EffortError::DegenerateWindow { .. })
        ));
        assert!(matches!(
            EffortMetrics::compute(400.0, 0.0),
            Err(EffortError::DegenerateWindow { .. })
        ));
        assert!(EffortMetrics::compute(f64::NAN, 100.0).is_err());
        assert!(EffortMetrics::compute(400.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(59.4), "0:59");
        assert_eq!(format_duration(359.6), "6:00");
        assert_eq!(format_duration(1215.0), "20:15");
        assert_eq!(format_duration(3600.0), "1:00:00");
        assert_eq!(format_duration(11107.0), "3:05:07");
    }

    #[test]
    fn test_format_margin() {
        assert_eq!(format_margin(0.4), "<1s");
        assert_eq!(format_margin(12.2), "12s");
        assert_eq!(format_margin(75.0), "1:15");
    }
}
