//! Property-name normalization from JSX camelCase to CSS dash-case.

/// Converts a camelCase style key to its dash-separated CSS form.
///
/// Every uppercase letter becomes a dash followed by its lowercase form, so a
/// vendor-prefixed key such as `WebkitFontSmoothing` gains a leading dash.
/// Nothing else is touched.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
