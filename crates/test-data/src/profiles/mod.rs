//! Athletic performance profiles.
//!
//! Profiles define realistic running speeds over a given distance. They are used by
//! the workout generator to produce plausible lap times.

mod runner;

pub use runner::RunnerProfile;

/// Trait for athletic performance profiles.
///
/// Implementations should provide:
/// - Base speed at the reference distance
/// - Fade factor (speed multiplier as the run gets longer)
/// - Day-to-day variance
pub trait AthleteProfile: Send + Sync {
    /// Sustainable speed over 5 km in meters per second.
    fn base_speed_mps(&self) -> f64;

    /// Speed multiplier for a run of `distance_meters`.
    ///
    /// Returns:
    /// - > 1.0 for runs shorter than 5 km
    /// - < 1.0 for longer runs
    fn fade_factor(&self, distance_meters: f64) -> f64;

    /// Day-to-day performance variance as a coefficient of variation (0.0 - 1.0).
    ///
    /// A value of 0.1 means typical day-to-day variation of ±10%.
    fn variance(&self) -> f64;
}

/// Speed for a whole run, before per-lap noise.
pub fn speed_over(profile: &dyn AthleteProfile, distance_meters: f64, variance_factor: f64) -> f64 {
    let target = profile.base_speed_mps() * profile.fade_factor(distance_meters);

    // Apply variance factor (should be sampled by caller)
    (target * variance_factor).max(0.5) // Minimum 0.5 m/s to avoid division issues
}

/// Samples a variance factor from normal distribution.
/// Returns a multiplier around 1.0.
pub fn sample_variance(profile: &dyn AthleteProfile, rng: &mut impl rand::Rng) -> f64 {
    use rand_distr::{Distribution, Normal};

    let std_dev = profile.variance();
    match Normal::new(1.0, std_dev) {
        Ok(normal) if std_dev > 0.0 => normal.sample(rng).clamp(0.7, 1.4),
        _ => 1.0,
    }
}
