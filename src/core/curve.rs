//! Easing curves applied to normalized transition progress.

use serde::{Deserialize, Serialize};

/// The fixed registry of interpolation curves.
///
/// Every curve maps `[0, 1]` onto `[0, 1]` with stable endpoints. Names follow
/// the declarative vocabulary (`"quadratic-ease-in"` and so on).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    #[default]
    Linear,
    QuadraticEaseIn,
    QuadraticEaseOut,
    QuadraticEaseInOut,
    CubicEaseIn,
    CubicEaseOut,
    CubicEaseInOut,
}

impl Curve {
    pub const ALL: [Curve; 7] = [
        Curve::Linear,
        Curve::QuadraticEaseIn,
        Curve::QuadraticEaseOut,
        Curve::QuadraticEaseInOut,
        Curve::CubicEaseIn,
        Curve::CubicEaseOut,
        Curve::CubicEaseInOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadraticEaseIn => "quadratic-ease-in",
            Self::QuadraticEaseOut => "quadratic-ease-out",
            Self::QuadraticEaseInOut => "quadratic-ease-in-out",
            Self::CubicEaseIn => "cubic-ease-in",
            Self::CubicEaseOut => "cubic-ease-out",
            Self::CubicEaseInOut => "cubic-ease-in-out",
        }
    }

    /// Look a curve up by its registry name. Surrounding whitespace and case
    /// are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|curve| curve.name() == name)
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadraticEaseIn => t * t,
            Self::QuadraticEaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::QuadraticEaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::CubicEaseIn => t * t * t,
            Self::CubicEaseOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicEaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for curve in Curve::ALL {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for curve in Curve::ALL {
            let a = curve.apply(0.25);
            let b = curve.apply(0.5);
            let c = curve.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }

    #[test]
    fn quadratic_ease_in_squares_progress() {
        assert_eq!(Curve::QuadraticEaseIn.apply(0.5), 0.25);
        assert_eq!(Curve::QuadraticEaseOut.apply(0.5), 0.75);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Curve::Linear.apply(-1.0), 0.0);
        assert_eq!(Curve::CubicEaseIn.apply(2.0), 1.0);
    }

    #[test]
    fn names_round_trip_through_registry() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_name(curve.name()), Some(curve));
        }
        assert_eq!(
            Curve::from_name(" Quadratic-Ease-Out "),
            Some(Curve::QuadraticEaseOut)
        );
        assert_eq!(Curve::from_name("bounce"), None);
    }

    #[test]
    fn serde_uses_registry_names() {
        let json = serde_json::to_string(&Curve::QuadraticEaseInOut).unwrap();
        assert_eq!(json, "\"quadratic-ease-in-out\"");
    }
}
