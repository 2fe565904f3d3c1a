//! Standard race distances that best efforts are matched against.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// One of the fixed canonical race lengths.
///
/// Per-distance state is kept in an [`enum_map::EnumMap`] keyed by this type, so
/// adding a distance is checked at compile time everywhere it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum, Serialize, Deserialize)]
pub enum StandardDistance {
    #[serde(rename = "400m")]
    Meters400,
    #[serde(rename = "800m")]
    Meters800,
    #[serde(rename = "1K")]
    Kilometer,
    #[serde(rename = "1mi")]
    Mile,
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "10mi")]
    TenMile,
    #[serde(rename = "Half Marathon")]
    HalfMarathon,
    #[serde(rename = "Marathon")]
    Marathon,
}

impl StandardDistance {
    /// All distances, shortest first.
    pub const ALL: [StandardDistance; 9] = [
        Self::Meters400,
        Self::Meters800,
        Self::Kilometer,
        Self::Mile,
        Self::FiveK,
        Self::TenK,
        Self::TenMile,
        Self::HalfMarathon,
        Self::Marathon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Meters400 => "400m",
            Self::Meters800 => "800m",
            Self::Kilometer => "1K",
            Self::Mile => "1mi",
            Self::FiveK => "5K",
            Self::TenK => "10K",
            Self::TenMile => "10mi",
            Self::HalfMarathon => "Half Marathon",
            Self::Marathon => "Marathon",
        }
    }

    /// Canonical length in meters.
    pub const fn meters(self) -> f64 {
        match self {
            Self::Meters400 => 400.0,
            Self::Meters800 => 800.0,
            Self::Kilometer => 1000.0,
            Self::Mile => 1609.34,
            Self::FiveK => 5000.0,
            Self::TenK => 10000.0,
            Self::TenMile => 16093.4,
            Self::HalfMarathon => 21097.5,
            Self::Marathon => 42195.0,
        }
    }

    /// Accepted deviation, in meters, for a lap window to count as this distance.
    pub const fn tolerance_meters(self) -> f64 {
        match self {
            Self::Meters400 => 10.0,
            Self::Meters800 => 20.0,
            Self::Kilometer => 25.0,
            Self::Mile => 40.0,
            Self::FiveK => 100.0,
            Self::TenK => 200.0,
            Self::TenMile => 400.0,
            Self::HalfMarathon => 500.0,
            Self::Marathon => 1000.0,
        }
    }

    /// Whether a cumulative distance falls within tolerance (inclusive).
    pub fn matches(self, distance_meters: f64) -> bool {
        (distance_meters - self.meters()).abs() <= self.tolerance_meters()
    }

    /// Whether a cumulative distance has run past the upper tolerance bound.
    pub fn overshot_by(self, distance_meters: f64) -> bool {
        distance_meters > self.meters() + self.tolerance_meters()
    }
}

impl std::fmt::Display for StandardDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StandardDistance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown standard distance: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_variant() {
        assert_eq!(StandardDistance::ALL.len(), <StandardDistance as Enum>::LENGTH);
        for (i, d) in StandardDistance::ALL.iter().enumerate() {
            assert_eq!(d.into_usize(), i);
        }
    }

    #[test]
    fn test_tolerance_never_reaches_neighbour() {
        for pair in StandardDistance::ALL.windows(2) {
            let (short, long) = (pair[0], pair[1]);
            let gap = long.meters() - short.meters();
            assert!(
                short.tolerance_meters() + long.tolerance_meters() < gap,
                "{short} and {long} overlap"
            );
        }
    }

    #[test]
    fn test_tolerance_boundary() {
        assert!(StandardDistance::FiveK.matches(5099.0));
        assert!(StandardDistance::FiveK.matches(4901.0));
        assert!(!StandardDistance::FiveK.matches(5101.0));
        assert!(StandardDistance::FiveK.overshot_by(5101.0));
        assert!(!StandardDistance::FiveK.overshot_by(5099.0));
    }

    #[test]
    fn test_name_round_trip() {
        for d in StandardDistance::ALL {
            assert_eq!(d.name().parse::<StandardDistance>().unwrap(), d);
            assert_eq!(d.to_string(), d.name());
        }
        assert_eq!(
            "half marathon".parse::<StandardDistance>().unwrap(),
            StandardDistance::HalfMarathon
        );
        assert!("3K".parse::<StandardDistance>().is_err());
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&StandardDistance::HalfMarathon).unwrap();
        assert_eq!(json, "\"Half Marathon\"");
        let back: StandardDistance = serde_json::from_str("\"1mi\"").unwrap();
        assert_eq!(back, StandardDistance::Mile);
    }
}
