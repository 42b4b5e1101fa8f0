//! Screen list handling and the converter's status label.

use crate::convert::format::{clamp_precision, to_fixed_trim};
use crate::model::{ConversionError, Screen};

/// Parse every configured `WIDTHxHEIGHT` string. The first bad entry fails
/// the whole list.
pub fn parse_screens<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Screen>, ConversionError> {
    if raw.is_empty() {
        return Err(ConversionError::NoScreens);
    }
    raw.iter()
        .map(|s| Screen::parse(s.as_ref()).map_err(ConversionError::from))
        .collect()
}

/// Screens with `last_used` moved to the front, when it is in the list.
pub fn order_screens(screens: &[Screen], last_used: Option<Screen>) -> Vec<Screen> {
    let mut ordered = screens.to_vec();
    if let Some(last) = last_used {
        if let Some(pos) = ordered.iter().position(|s| *s == last) {
            let screen = ordered.remove(pos);
            ordered.insert(0, screen);
        }
    }
    ordered
}

/// The screen after `current`, wrapping around. An unknown or missing
/// `current` yields the first screen.
pub fn next_screen(screens: &[Screen], current: Option<Screen>) -> Option<Screen> {
    let first = *screens.first()?;
    let Some(current) = current else {
        return Some(first);
    };
    match screens.iter().position(|s| *s == current) {
        Some(pos) => Some(screens[(pos + 1) % screens.len()]),
        None => Some(first),
    }
}

/// `1440×900 | 16px | p4`
pub fn status_label(screen: &Screen, base_font_size: f64, precision: i32) -> String {
    let base = to_fixed_trim(base_font_size, 2);
    format!(
        "{}×{} | {base}px | p{}",
        screen.width(),
        screen.height(),
        clamp_precision(precision)
    )
}
