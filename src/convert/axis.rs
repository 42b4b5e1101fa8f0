//! Axis inference from the CSS property on a line.

use crate::model::Axis;

/// Properties measured along the inline (horizontal) axis.
const WIDTH_PROPERTIES: &[&str] = &[
    "width",
    "min-width",
    "max-width",
    "left",
    "right",
    "margin-left",
    "margin-right",
    "padding-left",
    "padding-right",
    "margin-inline-start",
    "margin-inline-end",
    "padding-inline-start",
    "padding-inline-end",
    "inline-size",
    "min-inline-size",
    "max-inline-size",
    "gap",
    "column-gap",
    "letter-spacing",
    "word-spacing",
    "text-indent",
    "translatex",
    "translate-x",
    "transform",
];

/// Properties measured along the block (vertical) axis.
const HEIGHT_PROPERTIES: &[&str] = &[
    "height",
    "min-height",
    "max-height",
    "top",
    "bottom",
    "margin-top",
    "margin-bottom",
    "padding-top",
    "padding-bottom",
    "line-height",
    "row-gap",
    "block-size",
    "min-block-size",
    "max-block-size",
    "translatey",
    "translate-y",
];

/// Leading identifier of a `name: value` or `name = value` line.
///
/// Grammar: optional whitespace, an identifier starting with a letter, `_`
/// or `-` and continuing with letters, digits, `_` or `-`, optional
/// whitespace, then `:` or `=`.
fn property_name(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let bytes = rest.as_bytes();
    let first = *bytes.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_' || first == b'-') {
        return None;
    }
    let end = bytes
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_' || b == b'-'))
        .unwrap_or(bytes.len());
    let after = rest[end..].trim_start();
    if after.starts_with(':') || after.starts_with('=') {
        Some(&rest[..end])
    } else {
        None
    }
}

/// `paddingLeft` → `padding-left`.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
        prev = Some(ch);
    }
    out
}

/// Guess `vw` or `vh` from the property a line assigns to.
///
/// ```
/// use toolbelt::convert::guess_axis;
/// use toolbelt::model::Axis;
///
/// assert_eq!(guess_axis("margin-top: "), Some(Axis::Vh));
/// assert_eq!(guess_axis("paddingLeft:"), Some(Axis::Vw));
/// assert_eq!(guess_axis("color:"), None);
/// ```
pub fn guess_axis(line: &str) -> Option<Axis> {
    let name = to_kebab_case(property_name(line)?);
    if WIDTH_PROPERTIES.contains(&name.as_str()) {
        Some(Axis::Vw)
    } else if HEIGHT_PROPERTIES.contains(&name.as_str()) {
        Some(Axis::Vh)
    } else {
        None
    }
}

/// Pick the axis for one conversion.
///
/// An explicit choice wins. Otherwise, with auto detection on, the line's
/// property decides; when that fails (or detection is off) `fallback` is
/// used, normally the last axis the user picked.
pub fn resolve_axis(line: &str, explicit: Option<Axis>, auto_detect: bool, fallback: Axis) -> Axis {
    if let Some(axis) = explicit {
        return axis;
    }
    if auto_detect {
        if let Some(axis) = guess_axis(line) {
            return axis;
        }
    }
    fallback
}
