use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator pattern is valid"))
}

/// Normalize display text for comparison
/// - NFD decomposition with combining marks removed
/// - Lowercase
/// - Collapse internal whitespace and trim
pub fn normalize_text(s: &str) -> String {
    let folded: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build a stable, locale-independent facet key from display text
/// "Mercedes-Benz" and "mercedes benz" both become "mercedes-benz"
pub fn facet_key(s: &str) -> String {
    let normalized = normalize_text(s);
    separator_pattern()
        .replace_all(&normalized, "-")
        .trim_matches('-')
        .to_string()
}
