//! Hand-written scanners for numeric CSS tokens.
//!
//! Three grammars share one number rule, `digits? ('.' digits)?` with at
//! least one digit and no dangling point (`5.` reads as `5`):
//!
//! * **Strict** - `'-'? number unit`, unit one of the twelve CSS suffixes,
//!   lowercase, written directly after the number. Used for cursor detection.
//! * **Loose** - `'-'? '['? '-'? number ('px'|'rem')? ']'?`, not followed by
//!   an ASCII letter or `%`. Matches bare numbers and Tailwind's bracketed
//!   arbitrary values. Used by the Tailwind cycle.
//! * **Selection** - `'-'? number whitespace* unit`, unit from a caller
//!   filter, ASCII case ignored, followed by a non-word character or the end.
//!   Used to replace every occurrence inside a selection.
//!
//! Offsets are byte offsets. Matches never start on a non-ASCII byte, so they
//! always fall on character boundaries.

use crate::model::{Token, TokenMatch, Unit, SUFFIXED_UNITS};
use tracing::debug;

/// Cursor-detection grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// A recognised unit suffix is required.
    Strict,
    /// Bare numbers and bracketed px/rem values are accepted too.
    Loose,
}

/// End of the number starting at `start`, if there is one.
fn number_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - start;
    if pos + 1 < bytes.len() && bytes[pos] == b'.' && bytes[pos + 1].is_ascii_digit() {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        return Some(pos);
    }
    (int_digits > 0).then_some(pos)
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// First unit of `candidates` written at `pos`.
fn unit_at(text: &str, pos: usize, candidates: &[Unit], ignore_case: bool) -> Option<Unit> {
    let rest = &text.as_bytes()[pos..];
    candidates.iter().copied().find(|unit| {
        let suffix = unit.suffix().as_bytes();
        rest.len() >= suffix.len()
            && if ignore_case {
                rest[..suffix.len()].eq_ignore_ascii_case(suffix)
            } else {
                &rest[..suffix.len()] == suffix
            }
    })
}

/// Parse a standalone token such as `-1.5rem`, `12`, `[0.75rem]` or `-[12px]`.
///
/// Surrounding whitespace and whitespace between number and unit are
/// ignored; the unit is matched without regard to ASCII case. Without
/// brackets a leading `-` is the sign of the number; with brackets it is kept
/// as the token's prefix. A bare number is a [`Unit::Tailwind`] step.
///
/// Returns `None` for anything else, including unknown units such as `%`.
pub fn parse_token(text: &str) -> Option<Token> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut pos = 0;

    let lead_dash = bytes.first() == Some(&b'-');
    if lead_dash {
        pos += 1;
    }
    let bracketed = bytes.get(pos) == Some(&b'[');
    if bracketed {
        pos += 1;
    }
    let inner_dash = bytes.get(pos) == Some(&b'-');
    if inner_dash {
        if lead_dash && !bracketed {
            return None;
        }
        pos += 1;
    }

    let num_start = pos;
    let num_end = number_end(bytes, num_start)?;
    let magnitude = parse_number(&text[num_start..num_end])?;
    pos = num_end;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let unit = match unit_at(text, pos, &SUFFIXED_UNITS, true) {
        Some(unit) => {
            pos += unit.suffix().len();
            unit
        }
        None => Unit::Tailwind,
    };

    if bracketed && bytes.get(pos) == Some(&b']') {
        pos += 1;
    }
    if pos != bytes.len() {
        return None;
    }

    let negative = if bracketed { inner_dash } else { lead_dash || inner_dash };
    let value = if negative { -magnitude } else { magnitude };
    Some(if bracketed {
        Token::bracketed(value, unit, if lead_dash { "-" } else { "" })
    } else {
        Token::new(value, unit)
    })
}

fn strict_at(line: &str, start: usize) -> Option<TokenMatch> {
    let bytes = line.as_bytes();
    let num_start = if bytes[start] == b'-' { start + 1 } else { start };
    let num_end = number_end(bytes, num_start)?;
    let unit = unit_at(line, num_end, &SUFFIXED_UNITS, false)?;
    let value = parse_number(&line[start..num_end])?;
    Some(TokenMatch {
        token: Token::new(value, unit),
        start,
        end: num_end + unit.suffix().len(),
    })
}

fn loose_at(line: &str, start: usize) -> Option<TokenMatch> {
    let bytes = line.as_bytes();
    let mut pos = start;

    let lead_dash = bytes[pos] == b'-';
    if lead_dash {
        pos += 1;
    }
    let bracketed = bytes.get(pos) == Some(&b'[');
    if bracketed {
        pos += 1;
    }
    let inner_dash = bytes.get(pos) == Some(&b'-');
    if inner_dash {
        if lead_dash && !bracketed {
            return None;
        }
        pos += 1;
    }

    let num_start = pos;
    let num_end = number_end(bytes, num_start)?;
    let magnitude = parse_number(&line[num_start..num_end])?;
    pos = num_end;

    let unit = match unit_at(line, pos, &[Unit::Px, Unit::Rem], false) {
        Some(unit) => {
            pos += unit.suffix().len();
            unit
        }
        None => Unit::Tailwind,
    };
    if bracketed && bytes.get(pos) == Some(&b']') {
        pos += 1;
    }
    if let Some(&next) = bytes.get(pos) {
        if next.is_ascii_alphabetic() || next == b'%' {
            return None;
        }
    }

    let negative = if bracketed { inner_dash } else { lead_dash || inner_dash };
    let value = if negative { -magnitude } else { magnitude };
    let token = if bracketed {
        Token::bracketed(value, unit, if lead_dash { "-" } else { "" })
    } else {
        Token::new(value, unit)
    };
    Some(TokenMatch {
        token,
        start,
        end: pos,
    })
}

fn selection_at(text: &str, start: usize, units: &[Unit]) -> Option<TokenMatch> {
    let bytes = text.as_bytes();
    let num_start = if bytes[start] == b'-' { start + 1 } else { start };
    let num_end = number_end(bytes, num_start)?;
    let value = parse_number(&text[start..num_end])?;

    let mut pos = num_end;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    let unit = unit_at(text, pos, units, true)?;
    let end = pos + unit.suffix().len();
    if bytes.get(end).is_some_and(|&b| is_word_byte(b)) {
        return None;
    }
    Some(TokenMatch {
        token: Token::new(value, unit),
        start,
        end,
    })
}

/// Leftmost-first, non-overlapping matches of `matcher` over `text`.
fn scan_with<F>(text: &str, mut matcher: F) -> Vec<TokenMatch>
where
    F: FnMut(&str, usize) -> Option<TokenMatch>,
{
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let byte = bytes[pos];
        let can_start = byte.is_ascii_digit() || matches!(byte, b'-' | b'.' | b'[');
        if can_start {
            if let Some(found) = matcher(text, pos) {
                pos = found.end;
                matches.push(found);
                continue;
            }
        }
        pos += 1;
    }
    matches
}

/// Every strict-grammar token in `line`.
pub fn scan_strict(line: &str) -> Vec<TokenMatch> {
    scan_with(line, strict_at)
}

/// Every loose-grammar token in `line`.
pub fn scan_loose(line: &str) -> Vec<TokenMatch> {
    scan_with(line, loose_at)
}

/// Every selection-grammar token in `text` whose unit is in `units`.
pub fn scan_selection(text: &str, units: &[Unit]) -> Vec<TokenMatch> {
    scan_with(text, |t, pos| selection_at(t, pos, units))
}

/// The first token whose span contains `column` (a byte offset, inclusive at
/// both ends so a cursor right after the unit still hits).
pub fn detect_token_at_cursor(line: &str, column: usize, grammar: Grammar) -> Option<TokenMatch> {
    let matches = match grammar {
        Grammar::Strict => scan_strict(line),
        Grammar::Loose => scan_loose(line),
    };
    let hit = matches.into_iter().find(|m| m.contains(column));
    if hit.is_none() {
        debug!(column, ?grammar, "no token under cursor");
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(matches: &[TokenMatch]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn parse_token_signed_rem() {
        let token = parse_token("-1.5rem").unwrap();
        assert_eq!(token.value, -1.5);
        assert_eq!(token.unit, Unit::Rem);
        assert!(!token.bracketed);
        assert_eq!(token.prefix, "");
    }

    #[test]
    fn parse_token_bare_number_is_tailwind() {
        let token = parse_token("12").unwrap();
        assert_eq!(token.value, 12.0);
        assert_eq!(token.unit, Unit::Tailwind);
    }

    #[test]
    fn parse_token_rejects_unknown_unit() {
        assert_eq!(parse_token("12%"), None);
        assert_eq!(parse_token("12em"), None);
        assert_eq!(parse_token("px"), None);
        assert_eq!(parse_token(""), None);
        assert_eq!(parse_token("1.2.3px"), None);
        assert_eq!(parse_token("--4"), None);
    }

    #[test]
    fn parse_token_brackets_keep_outer_dash_as_prefix() {
        let token = parse_token("-[12px]").unwrap();
        assert_eq!(token.value, 12.0);
        assert_eq!(token.unit, Unit::Px);
        assert_eq!(token.prefix, "-");
        assert!(token.bracketed);

        let inner = parse_token("[-0.5rem]").unwrap();
        assert_eq!(inner.value, -0.5);
        assert_eq!(inner.prefix, "");
    }

    #[test]
    fn parse_token_allows_space_and_any_case() {
        let token = parse_token(" 24 PX ").unwrap();
        assert_eq!(token.value, 24.0);
        assert_eq!(token.unit, Unit::Px);
        assert_eq!(parse_token(".5vmin").unwrap().unit, Unit::Vmin);
    }

    #[test]
    fn strict_scan_finds_all_units() {
        let line = "margin: 10px 2.5rem -4vw 50dvh;";
        let found = scan_strict(line);
        assert_eq!(found.len(), 4);
        assert_eq!(&line[found[2].start..found[2].end], "-4vw");
        assert_eq!(found[2].token.value, -4.0);
        assert_eq!(found[3].token.unit, Unit::Dvh);
    }

    #[test]
    fn strict_scan_is_case_sensitive_and_needs_adjacent_unit() {
        assert!(scan_strict("10PX").is_empty());
        assert!(scan_strict("10 px").is_empty());
        assert!(scan_strict("12.px").is_empty());
    }

    #[test]
    fn strict_scan_does_not_require_word_boundary() {
        let found = scan_strict("12pxx");
        assert_eq!(spans(&found), vec![(0, 4)]);
    }

    #[test]
    fn strict_scan_restarts_inside_malformed_number() {
        let line = "1.2.3px";
        let found = scan_strict(line);
        assert_eq!(spans(&found), vec![(2, 7)]);
        assert_eq!(found[0].token.value, 2.3);
    }

    #[test]
    fn detect_cursor_inclusive_at_both_ends() {
        let line = "width: 16px;";
        assert!(detect_token_at_cursor(line, 7, Grammar::Strict).is_some());
        assert!(detect_token_at_cursor(line, 11, Grammar::Strict).is_some());
        assert!(detect_token_at_cursor(line, 12, Grammar::Strict).is_none());
        assert!(detect_token_at_cursor(line, 2, Grammar::Strict).is_none());
    }

    #[test]
    fn loose_scan_reads_tailwind_classes() {
        let line = r#"class="mt-4 w-[12px] -mx-[0.5rem] p-2.5""#;
        let found = scan_loose(line);
        let texts: Vec<&str> = found.iter().map(|m| &line[m.start..m.end]).collect();
        assert_eq!(texts, vec!["-4", "-[12px]", "-[0.5rem]", "-2.5"]);
        assert_eq!(found[0].token.unit, Unit::Tailwind);
        assert_eq!(found[1].token.prefix, "-");
        assert_eq!(found[1].token.value, 12.0);
    }

    #[test]
    fn loose_scan_skips_other_units() {
        assert!(scan_loose("12vw").is_empty());
        assert!(scan_loose("50%").is_empty());
        assert!(scan_loose("12pxs").is_empty());
    }

    #[test]
    fn selection_scan_filters_units_and_respects_boundary() {
        let text = "a: 10px; b: 2 REM; c: 5vw; d: 3pxs";
        let found = scan_selection(text, &[Unit::Px, Unit::Rem]);
        let texts: Vec<&str> = found.iter().map(|m| &text[m.start..m.end]).collect();
        assert_eq!(texts, vec!["10px", "2 REM"]);
        assert_eq!(found[1].token.unit, Unit::Rem);
    }

    #[test]
    fn scanners_survive_non_ascii_text() {
        let line = "größe: 12px — 3rem";
        let found = scan_strict(line);
        assert_eq!(found.len(), 2);
        assert_eq!(&line[found[1].start..found[1].end], "3rem");
    }
}
