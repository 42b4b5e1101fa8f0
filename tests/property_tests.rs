//! Property-based tests for the conversion and env parsing invariants.
//!
//! Tests validate:
//! 1. px → viewport → px recovers the input within 10^-p
//! 2. Formatted numbers never end in `.` or a trailing fractional zero
//! 3. The Tailwind cycle returns to its start after three steps
//! 4. Scanners and the env parser accept arbitrary text without panicking
//! 5. Switching twice to the same block is a no-op

use proptest::prelude::*;
use toolbelt::convert::{
    cycle_tailwind_unit, detect_token_at_cursor, from_viewport, parse_token, scan_loose,
    scan_selection, scan_strict, to_fixed_trim, to_viewport, Grammar,
};
use toolbelt::env::{parse_env_file, plan_switch, SwitchOutcome};
use toolbelt::model::{OutputUnit, Screen, Token, Unit, SUFFIXED_UNITS};

// ===== Property 1: Viewport Round Trip =====

proptest! {
    #[test]
    fn viewport_round_trip_within_precision(
        px in 0.01f64..5000.0,
        width in 1u32..4000,
        height in 1u32..4000,
        precision in 0i32..=8,
    ) {
        let screen = Screen::new(width, height).unwrap();
        let vw = to_viewport(px, f64::from(width), precision).unwrap();
        let vw: f64 = vw.parse().unwrap();
        let back: f64 = from_viewport(vw, Unit::Vw, &screen, OutputUnit::Px, 16.0, 8)
            .parse()
            .unwrap();

        // the viewport value is off by at most half a unit in the last place,
        // scaled back by width / 100
        let bound = 0.5 * 10f64.powi(-precision) * f64::from(width) / 100.0 + 1e-6;
        prop_assert!(
            (back - px).abs() <= bound,
            "px={px} vw={vw} back={back} bound={bound}"
        );
    }

    #[test]
    fn zero_dimension_never_converts(px in any::<f64>(), precision in any::<i32>()) {
        prop_assert!(to_viewport(px, 0.0, precision).is_none());
    }
}

// ===== Property 2: Trim Formatting =====

proptest! {
    #[test]
    fn formatted_numbers_have_no_trailing_zeros(
        value in -1.0e6f64..1.0e6,
        precision in -4i32..12,
    ) {
        let text = to_fixed_trim(value, precision);
        prop_assert!(!text.ends_with('.'), "{text}");
        if text.contains('.') {
            prop_assert!(!text.ends_with('0'), "{text}");
        }
    }
}

// ===== Property 3: Tailwind 3-Cycle =====

proptest! {
    #[test]
    fn tailwind_cycle_returns_after_three_steps(steps in 0u32..400, base in prop::sample::select(vec![8.0, 10.0, 16.0, 20.0])) {
        let px = f64::from(steps) * base / 4.0;
        let start = Token::new(px, Unit::Px);
        let once = cycle_tailwind_unit(&start, base);
        let twice = cycle_tailwind_unit(&once, base);
        let thrice = cycle_tailwind_unit(&twice, base);

        prop_assert_eq!(once.unit, Unit::Rem);
        prop_assert_eq!(twice.unit, Unit::Tailwind);
        prop_assert_eq!(thrice.unit, Unit::Px);
        prop_assert!((thrice.value - px).abs() < 1e-9, "{} != {}", thrice.value, px);
    }
}

// ===== Property 4: No Panics =====

proptest! {
    #[test]
    fn scanners_accept_any_text(line in ".{0,80}", column in 0usize..100) {
        let _ = parse_token(&line);
        let _ = scan_strict(&line);
        let _ = scan_loose(&line);
        let _ = scan_selection(&line, &SUFFIXED_UNITS);
        let _ = detect_token_at_cursor(&line, column, Grammar::Strict);
        let _ = detect_token_at_cursor(&line, column, Grammar::Loose);
    }

    #[test]
    fn scanned_spans_are_char_boundaries(line in ".{0,80}") {
        for found in scan_strict(&line).iter().chain(scan_loose(&line).iter()) {
            prop_assert!(line.is_char_boundary(found.start));
            prop_assert!(line.is_char_boundary(found.end));
            prop_assert!(found.start < found.end);
        }
    }

    #[test]
    fn env_parser_accepts_any_text(text in "(#? ?[A-Za-z_=]{0,8}\n){0,12}") {
        let parsed = parse_env_file(&text);
        prop_assert_eq!(parsed.render(), text);
    }
}

// ===== Property 5: Idempotent Switch =====

proptest! {
    #[test]
    fn second_switch_is_a_no_op(
        text in "(# [A-C]\n|#? ?[A-Z]{1,3}=[a-z]{0,3}\n|\n){0,12}",
        target in "[A-C]",
    ) {
        match plan_switch(&text, &target) {
            Ok(SwitchOutcome::Rewritten { content }) => {
                prop_assert_eq!(plan_switch(&content, &target).unwrap(), SwitchOutcome::Unchanged);
                // the first header with the name is the one switched on
                let target_has_entries = parse_env_file(&text)
                    .block(&target)
                    .is_some_and(|b| !b.entries.is_empty());
                let expected = target_has_entries.then(|| target.clone());
                let after = parse_env_file(&content);
                prop_assert_eq!(after.active.clone(), expected);
                prop_assert!(after.conflicting().is_empty(), "{:?}", after.conflicting());
            }
            Ok(SwitchOutcome::Unchanged) => {
                prop_assert!(parse_env_file(&text).conflicting().is_empty());
            }
            Ok(SwitchOutcome::NoBlocks) => {}
            Err(_) => {
                prop_assert!(parse_env_file(&text).block(&target).is_none());
            }
        }
    }
}
