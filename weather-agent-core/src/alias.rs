//! Static table of city aliases and the resolver over it.

/// City used when nothing in the message looks like a place.
pub const DEFAULT_CITY: &str = "bangalore";

/// Canonical city name followed by the lowercase substrings that select it.
///
/// Order matters: resolution returns the first city with any matching alias.
pub const CITY_ALIASES: &[(&str, &[&str])] = &[
    ("bangalore", &["bangalore", "banglore", "blr", "bengaluru", "bengalooru"]),
    ("chennai", &["chennai", "madras"]),
    ("mumbai", &["mumbai", "bombay"]),
    ("delhi", &["delhi", "dilli", "new delhi"]),
    ("hyderabad", &["hyderabad", "hyd"]),
    ("kolkata", &["kolkata", "calcutta"]),
];

/// Returns the canonical city whose alias occurs anywhere in `text`.
///
/// Matching is a plain substring test walked in table order, so the first city
/// listed wins even when a later alias is longer or appears earlier in the text.
pub fn resolve_alias(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();

    CITY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| lower.contains(alias)))
        .map(|(city, _)| *city)
}
