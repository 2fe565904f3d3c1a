//! Policy constants for best-effort analysis.

use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::EffortError;

pub const DEFAULT_NEAR_MISS_THRESHOLD: f64 = 1.02;

/// Longest accepted PR window, in days.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// How one window is chosen when several qualify for the same distance in a
/// single workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSelection {
    /// Earliest start index wins, even if a later window is faster.
    #[default]
    Earliest,
    /// Fastest window wins; ties go to the earliest.
    Fastest,
}

impl std::fmt::Display for WindowSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Earliest => write!(f, "earliest"),
            Self::Fastest => write!(f, "fastest"),
        }
    }
}

impl FromStr for WindowSelection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earliest" => Ok(Self::Earliest),
            "fastest" => Ok(Self::Fastest),
            _ => Err(format!("Unknown window selection: {s}")),
        }
    }
}

/// Configuration for leaderboard, notification and insight policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Efforts retained per distance.
    pub leaderboard_size: usize,

    /// PRs dated within this many days of the evaluation date are "recent".
    pub recent_pr_days: i64,

    /// PRs dated within this many days produce a notification.
    pub notification_days: i64,

    /// Ratio to the record under which a non-PR effort is a near miss.
    pub near_miss_threshold: f64,

    pub window_selection: WindowSelection,

    /// Distinct PR dates needed for a streak insight.
    pub streak_min_dates: usize,

    /// Recent PRs at one distance needed for a specialization insight.
    pub specialization_min_prs: usize,

    /// Summed improvement, in seconds, that must be exceeded for a savings insight.
    pub cumulative_improvement_seconds: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: 10,
            recent_pr_days: 30,
            notification_days: 7,
            near_miss_threshold: DEFAULT_NEAR_MISS_THRESHOLD,
            window_selection: WindowSelection::Earliest,
            streak_min_dates: 3,
            specialization_min_prs: 2,
            cumulative_improvement_seconds: 60.0,
        }
    }
}

impl AnalysisConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, EffortError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EffortError> {
        let defaults = Self::default();
        let config = Self {
            leaderboard_size: parse_or(&lookup, "LEADERBOARD_SIZE", defaults.leaderboard_size)?,
            recent_pr_days: parse_or(&lookup, "RECENT_PR_DAYS", defaults.recent_pr_days)?,
            notification_days: parse_or(&lookup, "PR_NOTIFICATION_DAYS", defaults.notification_days)?,
            near_miss_threshold: parse_or(&lookup, "NEAR_MISS_THRESHOLD", defaults.near_miss_threshold)?,
            window_selection: parse_or(&lookup, "WINDOW_SELECTION", defaults.window_selection)?,
            streak_min_dates: parse_or(&lookup, "INSIGHT_STREAK_DAYS", defaults.streak_min_dates)?,
            specialization_min_prs: parse_or(
                &lookup,
                "INSIGHT_SPECIALIZATION_PRS",
                defaults.specialization_min_prs,
            )?,
            cumulative_improvement_seconds: parse_or(
                &lookup,
                "INSIGHT_IMPROVEMENT_SECONDS",
                defaults.cumulative_improvement_seconds,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EffortError> {
        if self.leaderboard_size == 0 {
            return Err(EffortError::Config("LEADERBOARD_SIZE must be at least 1".into()));
        }
        if self.recent_pr_days < 0 || self.notification_days < 0 {
            return Err(EffortError::Config("PR windows must not be negative".into()));
        }
        if self.recent_pr_days > MAX_WINDOW_DAYS || self.notification_days > MAX_WINDOW_DAYS {
            return Err(EffortError::Config(format!(
                "PR windows must not exceed {MAX_WINDOW_DAYS} days"
            )));
        }
        if !(self.near_miss_threshold.is_finite() && self.near_miss_threshold >= 1.0) {
            return Err(EffortError::Config(format!(
                "NEAR_MISS_THRESHOLD must be a ratio >= 1.0, got {}",
                self.near_miss_threshold
            )));
        }
        Ok(())
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, EffortError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| EffortError::Config(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}
