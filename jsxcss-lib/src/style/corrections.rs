//! Layout fix-ups applied to a parsed declaration before it is registered.
//!
//! Design-tool exports pin frames with absolute pixel offsets. Large offsets
//! are swapped for a 50% offset plus a centering translate so the frame stays
//! centered when the viewport changes. Order matters: the vertical pass reads
//! the transform the horizontal pass wrote.

use crate::style::declaration::StyleDeclaration;

/// Offsets strictly above this many pixels get centered.
pub const DEFAULT_CENTERING_THRESHOLD: i64 = 100;

const CENTERED_OFFSET: &str = "50%";
const CENTER_HORIZONTALLY: &str = "translateX(-50%)";
const CENTER_VERTICALLY: &str = "translateY(-50%)";

pub fn apply_corrections(declaration: &mut StyleDeclaration, centering_threshold: i64) {
    if declaration.get("display") == Some("inline-flex") {
        declaration.insert("display", "flex");
    }

    if declaration.get("position") != Some("absolute") {
        return;
    }

    if exceeds(declaration.get("left"), centering_threshold) {
        declaration.insert("left", CENTERED_OFFSET);
        push_transform(declaration, CENTER_HORIZONTALLY);
    }
    if exceeds(declaration.get("top"), centering_threshold) {
        declaration.insert("top", CENTERED_OFFSET);
        push_transform(declaration, CENTER_VERTICALLY);
    }
}

fn exceeds(offset: Option<&str>, threshold: i64) -> bool {
    offset
        .and_then(leading_integer)
        .map(|n| n > threshold)
        .unwrap_or(false)
}

fn push_transform(declaration: &mut StyleDeclaration, function: &str) {
    let transform = match declaration.get("transform") {
        Some(existing) if !existing.trim().is_empty() && existing.trim() != "none" => {
            format!("{} {}", existing.trim(), function)
        }
        _ => function.to_string(),
    };
    declaration.insert("transform", transform);
}

/// Reads the integer prefix of a length, so `"288px"` gives 288 and
/// `"12.9"` gives 12. Prefixes too long for an `i64` saturate.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}
