//! Unit Converter Engine.
//!
//! Stateless conversions between px/rem, the viewport unit family and
//! Tailwind spacing steps. Every call takes its context explicitly; "last
//! used" choices live in [`crate::state`].

mod axis;
mod edit;
mod format;
mod scan;
mod screens;
mod tailwind;
mod viewport;

pub use axis::{guess_axis, resolve_axis, to_kebab_case};
pub use edit::{
    available_actions, plan_axis_cycle, plan_from_viewport, plan_tailwind_cycle,
    plan_to_viewport, CodeAction, Replacement, Target,
};
pub use format::{clamp_precision, format_for_unit, to_fixed, to_fixed_trim, MAX_PRECISION};
pub use scan::{
    detect_token_at_cursor, parse_token, scan_loose, scan_selection, scan_strict, Grammar,
};
pub use screens::{next_screen, order_screens, parse_screens, status_label};
pub use tailwind::{cycle_tailwind_unit, render_token};
pub use viewport::{
    from_viewport, to_viewport, token_axis_cycle, token_from_viewport, token_to_viewport,
    ConversionContext,
};
