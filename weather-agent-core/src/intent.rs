//! Keyword heuristics that turn a chat message into a weather query.
//!
//! Each detector is an ordered rule list evaluated top to bottom; the first rule
//! that matches decides the result.

use crate::{alias::resolve_alias, model::Horizon};

/// Substrings that mark a message as weather-related.
pub const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temperature",
    "climate",
    "hot",
    "cold",
    "warm",
    "cool",
    "rain",
    "raining",
    "rainfall",
    "wind",
    "windy",
    "forecast",
    "umbrella",
    "jacket",
    "outside",
    "tell me in",
    "how is it in",
    "climate in",
];

/// Horizon rules in priority order.
const HORIZON_RULES: &[(&[&str], Horizon)] = &[
    (&["tomorrow"], Horizon::Tomorrow),
    (&["next 3 days", "next three days"], Horizon::Next3Days),
    (&["next week", "next 7 days", "next seven days"], Horizon::Next7Days),
];

/// Tokens that never form part of a city name.
pub const STOPWORDS: &[&str] = &[
    "tomorrow",
    "today",
    "now",
    "next",
    "week",
    "day",
    "weather",
    "temperature",
    "climate",
];

pub fn is_weather_question(text: &str) -> bool {
    let lower = text.to_lowercase();
    WEATHER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

pub fn detect_horizon(text: &str) -> Horizon {
    let lower = text.to_lowercase();

    HORIZON_RULES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| lower.contains(p)))
        .map(|(_, horizon)| *horizon)
        .unwrap_or(Horizon::Now)
}

/// Best-effort city name from free text, lowercased. Empty when nothing qualifies.
///
/// Tries, in order: a known alias, the words after "in" up to the first stopword,
/// then the last word that is not a stopword.
pub fn extract_city(text: &str) -> String {
    if let Some(city) = resolve_alias(text) {
        return city.to_string();
    }

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    if let Some(idx) = words.iter().position(|w| *w == "in") {
        let city_words: Vec<&str> = words[idx + 1..]
            .iter()
            .take_while(|w| !is_stopword(w))
            .copied()
            .collect();

        if !city_words.is_empty() {
            return city_words.join(" ");
        }
    }

    words
        .iter()
        .rev()
        .find(|w| !is_stopword(w))
        .map(|w| w.to_string())
        .unwrap_or_default()
}

/// Strips ASCII punctuation and surrounding whitespace from a candidate city name.
pub fn clean_city_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_questions_are_recognised() {
        assert!(is_weather_question("What's the weather like?"));
        assert!(is_weather_question("Do I need an UMBRELLA"));
        assert!(is_weather_question("how is it in Pune"));
        assert!(!is_weather_question("hello there"));
        assert!(!is_weather_question(""));
    }

    #[test]
    fn keyword_test_is_substring_based() {
        // "hot" inside "photo" still counts.
        assert!(is_weather_question("send me a photo"));
    }

    #[test]
    fn horizon_defaults_to_now() {
        assert_eq!(detect_horizon("weather in delhi"), Horizon::Now);
        assert_eq!(detect_horizon(""), Horizon::Now);
    }

    #[test]
    fn horizon_phrases() {
        assert_eq!(detect_horizon("Rain TOMORROW?"), Horizon::Tomorrow);
        assert_eq!(detect_horizon("next 3 days in goa"), Horizon::Next3Days);
        assert_eq!(detect_horizon("next three days"), Horizon::Next3Days);
        assert_eq!(detect_horizon("forecast for next week"), Horizon::Next7Days);
        assert_eq!(detect_horizon("next 7 days"), Horizon::Next7Days);
        assert_eq!(detect_horizon("next seven days"), Horizon::Next7Days);
    }

    #[test]
    fn tomorrow_takes_priority() {
        assert_eq!(detect_horizon("next week or tomorrow"), Horizon::Tomorrow);
        assert_eq!(detect_horizon("next 3 days, next week"), Horizon::Next3Days);
    }

    #[test]
    fn city_after_in_stops_at_stopword() {
        assert_eq!(extract_city("weather in New York tomorrow"), "new york");
        assert_eq!(extract_city("climate in san francisco next week"), "san francisco");
    }

    #[test]
    fn alias_beats_in_pattern() {
        assert_eq!(extract_city("weather in bombay tomorrow"), "mumbai");
    }

    #[test]
    fn falls_back_to_last_non_stopword() {
        assert_eq!(extract_city("paris weather"), "paris");
        assert_eq!(extract_city("is it cold in"), "in");
    }

    #[test]
    fn nothing_left_yields_empty() {
        assert_eq!(extract_city("weather tomorrow"), "");
        assert_eq!(extract_city(""), "");
    }

    #[test]
    fn extractor_keeps_punctuation() {
        assert_eq!(extract_city("weather in paris?"), "paris?");
    }

    #[test]
    fn cleaning_strips_punctuation() {
        assert_eq!(clean_city_name("paris?"), "paris");
        assert_eq!(clean_city_name(" st. louis! "), "st louis");
        assert_eq!(clean_city_name("?!"), "");
    }
}
