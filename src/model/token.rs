//! Parsed numeric tokens.

use crate::model::Unit;
use serde::Serialize;

/// A numeric literal with its unit, as found in source text.
///
/// `value` carries the sign of the number itself. `prefix` is decoration
/// written before an opening bracket (the `-` of Tailwind's `-[12px]`); it is
/// only ever non-empty when `bracketed` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub value: f64,
    pub unit: Unit,
    pub prefix: String,
    pub bracketed: bool,
}

impl Token {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit,
            prefix: String::new(),
            bracketed: false,
        }
    }

    pub fn bracketed(value: f64, unit: Unit, prefix: impl Into<String>) -> Self {
        Self {
            value,
            unit,
            prefix: prefix.into(),
            bracketed: true,
        }
    }

    /// Value in CSS pixels, given the root font size. `None` for units that
    /// need a screen to resolve.
    pub fn to_px(&self, base_font_size: f64) -> Option<f64> {
        match self.unit {
            Unit::Px => Some(self.value),
            Unit::Rem => Some(self.value * base_font_size),
            Unit::Tailwind => Some(self.value * base_font_size / 4.0),
            _ => None,
        }
    }
}

/// A token located in a line or selection. `start..end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMatch {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl TokenMatch {
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}
