//! Placemark name labels carrying a track's length, e.g. `"Day 3 (12.4M)"`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a trailing `(12M)` / `(12.4M)` length suffix.
static LENGTH_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.*\(\d+(\.\d+)?M\)$").expect("length suffix pattern is valid")
});

/// Replace any existing length suffix of `name` with `miles` to one decimal.
///
/// ```
/// use track_editor::labels::length_label;
///
/// assert_eq!(length_label("Day 3", 12.44), "Day 3 (12.4M)");
/// assert_eq!(length_label("Day 3 (9.1M)", 12.44), "Day 3 (12.4M)");
/// ```
pub fn length_label(name: &str, miles: f64) -> String {
    let base = LENGTH_SUFFIX.replace(name, "");
    let base = base.trim();
    if base.is_empty() {
        format!("({miles:.1}M)")
    } else {
        format!("{base} ({miles:.1}M)")
    }
}
