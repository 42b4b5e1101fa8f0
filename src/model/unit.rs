//! CSS length units understood by the converter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit suffix recognised in source text.
///
/// `Tailwind` stands for a bare number with no suffix, read as a Tailwind
/// spacing step (1 step = 0.25rem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Rem,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Dvw,
    Dvh,
    Lvw,
    Lvh,
    Svw,
    Svh,
    Tailwind,
}

/// Every unit that has a textual suffix, in scanner priority order.
pub const SUFFIXED_UNITS: [Unit; 12] = [
    Unit::Px,
    Unit::Rem,
    Unit::Vw,
    Unit::Vh,
    Unit::Dvw,
    Unit::Dvh,
    Unit::Lvw,
    Unit::Lvh,
    Unit::Svw,
    Unit::Svh,
    Unit::Vmin,
    Unit::Vmax,
];

/// Viewport-relative units only.
pub const VIEWPORT_UNITS: [Unit; 10] = [
    Unit::Vw,
    Unit::Vh,
    Unit::Vmin,
    Unit::Vmax,
    Unit::Dvw,
    Unit::Dvh,
    Unit::Lvw,
    Unit::Lvh,
    Unit::Svw,
    Unit::Svh,
];

/// Absolute units (`px`, `rem`).
pub const ABSOLUTE_UNITS: [Unit; 2] = [Unit::Px, Unit::Rem];

impl Unit {
    /// Suffix as written in CSS. Empty for [`Unit::Tailwind`].
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
            Unit::Dvw => "dvw",
            Unit::Dvh => "dvh",
            Unit::Lvw => "lvw",
            Unit::Lvh => "lvh",
            Unit::Svw => "svw",
            Unit::Svh => "svh",
            Unit::Tailwind => "",
        }
    }

    /// Parse a suffix, ignoring ASCII case. The empty string is not accepted;
    /// bare numbers are classified by the token parser instead.
    pub fn from_suffix(raw: &str) -> Option<Self> {
        SUFFIXED_UNITS
            .iter()
            .copied()
            .find(|unit| unit.suffix().eq_ignore_ascii_case(raw))
    }

    pub fn is_viewport(self) -> bool {
        VIEWPORT_UNITS.contains(&self)
    }

    pub fn is_absolute(self) -> bool {
        matches!(self, Unit::Px | Unit::Rem)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Tailwind => f.write_str("tw"),
            other => f.write_str(other.suffix()),
        }
    }
}

/// Screen axis a `vw`/`vh` conversion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vw,
    Vh,
}

impl Axis {
    pub fn unit(self) -> Unit {
        match self {
            Axis::Vw => Unit::Vw,
            Axis::Vh => Unit::Vh,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vw" => Some(Axis::Vw),
            "vh" => Some(Axis::Vh),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit().suffix())
    }
}

/// Output unit of a viewport → absolute conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    Px,
    Rem,
}

impl OutputUnit {
    pub fn unit(self) -> Unit {
        match self {
            OutputUnit::Px => Unit::Px,
            OutputUnit::Rem => Unit::Rem,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "px" => Some(OutputUnit::Px),
            "rem" => Some(OutputUnit::Rem),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_suffix_ignores_case() {
        assert_eq!(Unit::from_suffix("PX"), Some(Unit::Px));
        assert_eq!(Unit::from_suffix("vMin"), Some(Unit::Vmin));
        assert_eq!(Unit::from_suffix("%"), None);
        assert_eq!(Unit::from_suffix(""), None);
    }

    #[test]
    fn viewport_and_absolute_are_disjoint() {
        for unit in SUFFIXED_UNITS {
            assert!(
                !(unit.is_viewport() && unit.is_absolute()),
                "{unit} cannot be both"
            );
        }
        assert!(!Unit::Tailwind.is_viewport());
        assert!(!Unit::Tailwind.is_absolute());
    }

    #[test]
    fn axis_parse_accepts_known_values_only() {
        assert_eq!(Axis::parse(" VH "), Some(Axis::Vh));
        assert_eq!(Axis::parse("vmin"), None);
    }
}
