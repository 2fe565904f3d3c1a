//! Runner athletic profile.

use super::AthleteProfile;

/// Reference distance for the base speed.
const REFERENCE_METERS: f64 = 5000.0;

/// Athletic profile for running.
///
/// Based on typical recreational to competitive runner performance:
/// - Base pace: ~5:00/km over 5 km (3.33 m/s)
/// - Fade: Riegel-style, time grows with distance^1.06
#[derive(Debug, Clone)]
pub struct RunnerProfile {
    /// Base speed in m/s at the reference distance.
    base_speed: f64,
    /// Riegel fatigue exponent minus one.
    fade_exponent: f64,
    /// Performance variance (coefficient of variation).
    variance: f64,
}

impl Default for RunnerProfile {
    fn default() -> Self {
        Self {
            base_speed: 1000.0 / 300.0, // 5:00/km
            fade_exponent: 0.06,
            variance: 0.04,
        }
    }
}

impl RunnerProfile {
    /// Creates a new runner profile with specified 5 km pace.
    ///
    /// # Arguments
    /// * `pace_min_per_km` - Pace in minutes per kilometer (e.g., 5.0 for 5:00/km)
    pub fn with_pace(pace_min_per_km: f64) -> Self {
        let base_speed = 1000.0 / (pace_min_per_km * 60.0);
        Self {
            base_speed,
            ..Default::default()
        }
    }

    /// Creates an elite runner profile (~3:00/km base pace).
    pub fn elite() -> Self {
        Self {
            variance: 0.02,
            ..Self::with_pace(3.0)
        }
    }

    /// Creates a recreational runner profile (~6:00/km base pace).
    pub fn recreational() -> Self {
        Self {
            fade_exponent: 0.08,
            variance: 0.06,
            ..Self::with_pace(6.0)
        }
    }

    /// Same runner with no day-to-day variance.
    pub fn steady(self) -> Self {
        Self {
            variance: 0.0,
            ..self
        }
    }
}

impl AthleteProfile for RunnerProfile {
    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn fade_factor(&self, distance_meters: f64) -> f64 {
        let ratio = (distance_meters / REFERENCE_METERS).max(0.05);
        ratio.powf(-self.fade_exponent).clamp(0.6, 1.3)
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = RunnerProfile::default();
        assert!((profile.base_speed_mps() - 3.333).abs() < 0.01);
    }

    #[test]
    fn test_fade_factors() {
        let profile = RunnerProfile::default();

        // Reference distance
        assert!((profile.fade_factor(5000.0) - 1.0).abs() < 0.001);

        // Marathon is slower, a mile is faster
        assert!(profile.fade_factor(42195.0) < 1.0);
        assert!(profile.fade_factor(1609.34) > 1.0);

        // Recreational runners fade harder
        let rec = RunnerProfile::recreational();
        assert!(rec.fade_factor(42195.0) < profile.fade_factor(42195.0));
    }

    #[test]
    fn test_steady_has_no_variance() {
        assert_eq!(RunnerProfile::elite().steady().variance(), 0.0);
    }
}
