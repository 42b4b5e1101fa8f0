//! Edit planning: turn a cursor or selection into text replacements.
//!
//! Planners never touch a buffer. They return [`Replacement`]s in reverse
//! source order so a host can apply them one after another without earlier
//! edits shifting the offsets of later ones.

use crate::convert::scan::{self, Grammar};
use crate::convert::tailwind::{cycle_tailwind_unit, render_token};
use crate::convert::viewport::{
    token_axis_cycle, token_from_viewport, token_to_viewport, ConversionContext,
};
use crate::model::{OutputUnit, Token, TokenMatch, Unit, ABSOLUTE_UNITS, VIEWPORT_UNITS};
use serde::Serialize;
use tracing::debug;

/// Where an operation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Empty selection: the token under the cursor on `line`.
    /// `column` is a byte offset into `line`.
    Cursor { line: &'a str, column: usize },
    /// Non-empty selection: every matching token inside `text`.
    Selection { text: &'a str },
}

/// Replace `start..end` (byte offsets into the target text) with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Replacement {
    /// Apply replacements produced by a planner to `source`.
    ///
    /// Expects reverse source order, as planners return them.
    pub fn apply_all(source: &str, replacements: &[Replacement]) -> String {
        let mut out = source.to_string();
        for edit in replacements {
            out.replace_range(edit.start..edit.end, &edit.text);
        }
        out
    }
}

/// Conversions a host can offer for the token under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeAction {
    /// px/rem → vw/vh
    ToViewport,
    /// vw/vh/... → px/rem
    FromViewport,
}

impl CodeAction {
    pub fn title(self) -> &'static str {
        match self {
            CodeAction::ToViewport => "Convert to vw/vh",
            CodeAction::FromViewport => "Convert vw/vh to px/rem",
        }
    }
}

fn replacement_for<F>(found: &TokenMatch, convert: &mut F) -> Option<Replacement>
where
    F: FnMut(&Token) -> Option<String>,
{
    match convert(&found.token) {
        Some(text) => Some(Replacement {
            start: found.start,
            end: found.end,
            text,
        }),
        None => {
            debug!(start = found.start, end = found.end, unit = %found.token.unit, "token skipped");
            None
        }
    }
}

fn plan<F>(target: Target<'_>, grammar: Grammar, units: &[Unit], mut convert: F) -> Vec<Replacement>
where
    F: FnMut(&Token) -> Option<String>,
{
    match target {
        Target::Cursor { line, column } => scan::detect_token_at_cursor(line, column, grammar)
            .and_then(|found| replacement_for(&found, &mut convert))
            .into_iter()
            .collect(),
        Target::Selection { text } => {
            let mut edits: Vec<Replacement> = scan::scan_selection(text, units)
                .iter()
                .filter_map(|found| replacement_for(found, &mut convert))
                .collect();
            edits.reverse();
            edits
        }
    }
}

/// px/rem → the context's axis unit.
pub fn plan_to_viewport(target: Target<'_>, ctx: &ConversionContext) -> Vec<Replacement> {
    plan(target, Grammar::Strict, &ABSOLUTE_UNITS, |token| {
        token_to_viewport(token, ctx)
    })
}

/// Any viewport unit → px or rem.
pub fn plan_from_viewport(
    target: Target<'_>,
    ctx: &ConversionContext,
    output: OutputUnit,
) -> Vec<Replacement> {
    plan(target, Grammar::Strict, &VIEWPORT_UNITS, |token| {
        token_from_viewport(token, ctx, output)
    })
}

/// Toggle between px/rem and the context's axis unit.
pub fn plan_axis_cycle(target: Target<'_>, ctx: &ConversionContext) -> Vec<Replacement> {
    let units = [Unit::Px, Unit::Rem, ctx.axis.unit()];
    plan(target, Grammar::Strict, &units, |token| token_axis_cycle(token, ctx))
}

/// One step of the Tailwind cycle.
///
/// With a cursor the loose grammar finds the token; a selection is parsed as
/// a single token and replaced as a whole.
pub fn plan_tailwind_cycle(target: Target<'_>, base_font_size: f64) -> Vec<Replacement> {
    let cycle = |token: &Token| match token.unit {
        Unit::Px | Unit::Rem | Unit::Tailwind => {
            Some(render_token(&cycle_tailwind_unit(token, base_font_size)))
        }
        _ => None,
    };
    match target {
        Target::Cursor { .. } => plan(target, Grammar::Loose, &[], cycle),
        Target::Selection { text } => scan::parse_token(text)
            .and_then(|token| cycle(&token))
            .map(|replacement| Replacement {
                start: 0,
                end: text.len(),
                text: replacement,
            })
            .into_iter()
            .collect(),
    }
}

/// Which conversions apply to the strict token under the cursor.
pub fn available_actions(line: &str, column: usize) -> Vec<CodeAction> {
    let Some(found) = scan::detect_token_at_cursor(line, column, Grammar::Strict) else {
        return Vec::new();
    };
    if found.token.unit.is_absolute() {
        vec![CodeAction::ToViewport]
    } else if found.token.unit.is_viewport() {
        vec![CodeAction::FromViewport]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
