//! Pixel ↔ viewport-unit arithmetic.

use crate::convert::format::to_fixed_trim;
use crate::model::{Axis, OutputUnit, Screen, Token, Unit};

/// Everything a single conversion needs besides the token itself.
///
/// Built by the host for each operation; the engine keeps no state between
/// calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionContext {
    pub screen: Screen,
    pub axis: Axis,
    pub base_font_size: f64,
    /// Decimal digits; clamped to `0..=8` wherever it is used.
    pub precision: i32,
}

/// `px` as a percentage of `dimension`, formatted with `precision` digits.
///
/// Returns `None` when `dimension` is zero so callers can report a
/// configuration error instead of printing `inf`.
pub fn to_viewport(px: f64, dimension: f64, precision: i32) -> Option<String> {
    if dimension == 0.0 || !dimension.is_finite() || !px.is_finite() {
        return None;
    }
    Some(to_fixed_trim(px / dimension * 100.0, precision))
}

/// Convert a viewport-relative `value` back to px, or to rem when
/// `output` is [`OutputUnit::Rem`].
pub fn from_viewport(
    value: f64,
    unit: Unit,
    screen: &Screen,
    output: OutputUnit,
    base_font_size: f64,
    precision: i32,
) -> String {
    let px = value / 100.0 * screen.denominator(unit);
    let out = match output {
        OutputUnit::Px => px,
        OutputUnit::Rem => px / base_font_size,
    };
    to_fixed_trim(out, precision)
}

/// px/rem token → `<n><axis>` text, e.g. `16px` → `1.1111vw`.
pub fn token_to_viewport(token: &Token, ctx: &ConversionContext) -> Option<String> {
    if !token.unit.is_absolute() {
        return None;
    }
    let px = token.to_px(ctx.base_font_size)?;
    let dimension = ctx.screen.denominator(ctx.axis.unit());
    let number = to_viewport(px, dimension, ctx.precision)?;
    Some(format!("{number}{}", ctx.axis))
}

/// Viewport token → `<n>px` or `<n>rem` text.
pub fn token_from_viewport(
    token: &Token,
    ctx: &ConversionContext,
    output: OutputUnit,
) -> Option<String> {
    if !token.unit.is_viewport() {
        return None;
    }
    let number = from_viewport(
        token.value,
        token.unit,
        &ctx.screen,
        output,
        ctx.base_font_size,
        ctx.precision,
    );
    Some(format!("{number}{}", output.unit().suffix()))
}

/// One step of the per-axis toggle: px/rem go to the axis unit, a value
/// already in the axis unit goes back to px. Anything else is left alone.
pub fn token_axis_cycle(token: &Token, ctx: &ConversionContext) -> Option<String> {
    if token.unit == ctx.axis.unit() {
        return token_from_viewport(token, ctx, OutputUnit::Px);
    }
    token_to_viewport(token, ctx)
}
