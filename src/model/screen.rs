//! Reference screen sizes.

use crate::model::error::ScreenError;
use crate::model::Unit;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Design screen a viewport conversion is computed against.
///
/// Both dimensions are always positive: the only constructor is
/// [`Screen::parse`] (or [`Screen::new`]), which rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Screen {
    width: u32,
    height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Result<Self, ScreenError> {
        if width == 0 || height == 0 {
            return Err(ScreenError::ZeroDimension(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Parse `WIDTHxHEIGHT`, e.g. `1440x900`.
    ///
    /// Digits only on both sides of a lowercase `x`; surrounding whitespace
    /// is ignored.
    pub fn parse(raw: &str) -> Result<Self, ScreenError> {
        let trimmed = raw.trim();
        let malformed = || ScreenError::Malformed(trimmed.to_string());

        let (w, h) = trimmed.split_once('x').ok_or_else(malformed)?;
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(w) || !all_digits(h) {
            return Err(malformed());
        }
        let width: u32 = w.parse().map_err(|_| malformed())?;
        let height: u32 = h.parse().map_err(|_| malformed())?;
        if width == 0 || height == 0 {
            return Err(ScreenError::ZeroDimension(trimmed.to_string()));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel length that 100 units of `unit` spans on this screen.
    ///
    /// `*vw` units use the width, `*vh` units the height, `vmin`/`vmax` the
    /// smaller/larger side. Non-viewport units fall back to the width.
    pub fn denominator(&self, unit: Unit) -> f64 {
        let value = match unit {
            Unit::Vw | Unit::Dvw | Unit::Lvw | Unit::Svw => self.width,
            Unit::Vh | Unit::Dvh | Unit::Lvh | Unit::Svh => self.height,
            Unit::Vmin => self.width.min(self.height),
            Unit::Vmax => self.width.max(self.height),
            Unit::Px | Unit::Rem | Unit::Tailwind => self.width,
        };
        f64::from(value)
    }
}

impl FromStr for Screen {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::parse(s)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_width_by_height() {
        let screen = Screen::parse("1440x900").unwrap();
        assert_eq!(screen.width(), 1440);
        assert_eq!(screen.height(), 900);
        assert_eq!(screen.to_string(), "1440x900");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(Screen::parse("  390x844 ").is_ok());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for raw in ["", "1440", "1440X900", "1440x", "x900", "-1x900", "14.5x900", "1440 x 900"] {
            assert!(
                matches!(Screen::parse(raw), Err(ScreenError::Malformed(_))),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn parse_rejects_zero_dimension() {
        assert!(matches!(
            Screen::parse("0x900"),
            Err(ScreenError::ZeroDimension(_))
        ));
        assert!(matches!(
            Screen::parse("1440x0"),
            Err(ScreenError::ZeroDimension(_))
        ));
        assert!(Screen::new(0, 10).is_err());
    }

    #[test]
    fn denominator_follows_unit_family() {
        let screen = Screen::parse("1440x900").unwrap();
        assert_eq!(screen.denominator(Unit::Vw), 1440.0);
        assert_eq!(screen.denominator(Unit::Svw), 1440.0);
        assert_eq!(screen.denominator(Unit::Dvh), 900.0);
        assert_eq!(screen.denominator(Unit::Vmin), 900.0);
        assert_eq!(screen.denominator(Unit::Vmax), 1440.0);
    }
}
