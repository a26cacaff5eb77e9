//! Rule-based advice for current conditions.

pub const INCOMPLETE_DATA: &str = "Weather data is incomplete.";

/// Temperature bands, highest threshold first. Each band covers `[threshold, previous)`.
const TEMPERATURE_BANDS: &[(f64, &str)] = &[
    (35.0, "It's extremely hot — avoid noon sun."),
    (30.0, "It's hot — wear light clothes and drink water."),
    (20.0, "The weather is pleasant — light clothing is fine."),
    (10.0, "It's cool — a light jacket is good."),
];

const COLD: &str = "Very cold — wear warm clothing.";

const WIND_BANDS: &[(f64, &str)] = &[
    (30.0, "Strong winds — avoid two-wheelers."),
    (15.0, "Slightly windy — be cautious."),
];

/// One temperature sentence, optionally followed by a wind caution.
///
/// `temperature` is in °C and `windspeed` in km/h.
pub fn advise(temperature: Option<f64>, windspeed: Option<f64>) -> String {
    let Some(temp) = temperature else {
        return INCOMPLETE_DATA.to_string();
    };

    let mut advice = band(TEMPERATURE_BANDS, temp).unwrap_or(COLD).to_string();

    if let Some(wind) = windspeed.and_then(|w| band(WIND_BANDS, w)) {
        advice.push(' ');
        advice.push_str(wind);
    }

    advice
}

fn band(bands: &[(f64, &'static str)], value: f64) -> Option<&'static str> {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_heat_with_strong_wind() {
        let advice = advise(Some(36.0), Some(40.0));
        assert!(advice.contains("extremely hot"));
        assert!(advice.contains("Strong winds"));
    }

    #[test]
    fn missing_temperature() {
        assert_eq!(advise(None, Some(10.0)), "Weather data is incomplete.");
        assert_eq!(advise(None, None), INCOMPLETE_DATA);
    }

    #[test]
    fn band_edges_are_inclusive_at_the_bottom() {
        assert!(advise(Some(35.0), None).contains("extremely hot"));
        assert!(advise(Some(34.9), None).starts_with("It's hot"));
        assert!(advise(Some(30.0), None).starts_with("It's hot"));
        assert!(advise(Some(20.0), None).contains("pleasant"));
        assert!(advise(Some(10.0), None).contains("cool"));
        assert_eq!(advise(Some(9.9), None), "Very cold — wear warm clothing.");
        assert_eq!(advise(Some(-5.0), None), COLD);
    }

    #[test]
    fn wind_suffix() {
        assert_eq!(
            advise(Some(25.0), Some(15.0)),
            "The weather is pleasant — light clothing is fine. Slightly windy — be cautious."
        );
        assert_eq!(advise(Some(25.0), Some(14.9)), "The weather is pleasant — light clothing is fine.");
        assert!(advise(Some(25.0), Some(30.0)).ends_with("Strong winds — avoid two-wheelers."));
    }

    #[test]
    fn exactly_one_temperature_sentence() {
        for t in [-10.0, 0.0, 12.0, 22.0, 31.0, 40.0] {
            let advice = advise(Some(t), None);
            let hits = TEMPERATURE_BANDS
                .iter()
                .map(|(_, s)| *s)
                .chain([COLD])
                .filter(|s| advice.contains(s))
                .count();
            assert_eq!(hits, 1, "{advice}");
        }
    }
}
