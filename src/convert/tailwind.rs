//! Tailwind spacing cycle: `px → rem → step → px`.
//!
//! One Tailwind spacing step is a quarter rem, so with a 16px root font the
//! cycle reads `16px → 1rem → 4 → 16px`. px and rem results are written as
//! arbitrary values (`[1rem]`), steps as bare numbers.

use crate::convert::format::format_for_unit;
use crate::model::{Token, Unit};

/// Rem per Tailwind spacing step.
const REM_PER_STEP: f64 = 0.25;

/// Advance `token` one position in the cycle.
///
/// The magnitude is converted; the sign and the decoration in front of the
/// bracket are carried over. An unbracketed negative token (the `-4` of
/// `mt-4` as scanned) turns its dash into the bracket prefix, so `mt-4`
/// becomes `mt-[16px]` and back. Viewport units are returned as-is.
pub fn cycle_tailwind_unit(token: &Token, base_font_size: f64) -> Token {
    let magnitude = token.value.abs();
    let negative = token.value < 0.0;

    let (value, unit) = match token.unit {
        Unit::Px => (magnitude / base_font_size, Unit::Rem),
        Unit::Rem => (magnitude / REM_PER_STEP, Unit::Tailwind),
        Unit::Tailwind => (magnitude * REM_PER_STEP * base_font_size, Unit::Px),
        _ => return token.clone(),
    };

    // Outer decoration and inner sign, as they will be written.
    let (prefix, inner_negative) = if token.bracketed {
        (token.prefix.clone(), negative)
    } else if negative {
        ("-".to_string(), false)
    } else {
        (String::new(), false)
    };
    let signed = if inner_negative { -value } else { value };

    match unit {
        Unit::Tailwind => {
            // Bare step: the outer dash stays in front of the number.
            let signed = if prefix == "-" { -signed.abs() } else { signed };
            Token::new(signed, unit)
        }
        _ => Token::bracketed(signed, unit, prefix),
    }
}

/// Write a token back as source text using the cycle's fixed precision.
///
/// ```
/// use toolbelt::convert::{parse_token, render_token};
///
/// let token = parse_token("-[0.75rem]").unwrap();
/// assert_eq!(render_token(&token), "-[0.75rem]");
/// ```
pub fn render_token(token: &Token) -> String {
    let sign = if token.value < 0.0 { "-" } else { "" };
    let number = format_for_unit(token.value.abs(), token.unit);
    let number = if number == "0" { number } else { format!("{sign}{number}") };
    let body = format!("{number}{}", token.unit.suffix());
    if token.bracketed {
        format!("{}[{body}]", token.prefix)
    } else {
        body
    }
}
