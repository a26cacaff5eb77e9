//! Per-message orchestration: classify, extract, fetch, advise, phrase.

use std::fmt::Write as _;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    advice::advise,
    intent::{clean_city_name, detect_horizon, extract_city, is_weather_question},
    model::{CurrentWeather, Forecast, GeoLocation},
    provider::Services,
};

/// Failures surfaced to the user. The display text is what the user sees; the
/// underlying cause is only logged.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Could not find that city. Try: 'weather in Bangalore'.")]
    Geocode(#[source] anyhow::Error),

    #[error("Error fetching weather.")]
    Weather(#[source] anyhow::Error),

    #[error("Error fetching forecast.")]
    Forecast(#[source] anyhow::Error),

    #[error("Sorry, I could not compose a reply right now.")]
    Language(#[source] anyhow::Error),
}

/// Stateless weather agent. Every call to [`Agent::handle`] is independent.
#[derive(Debug, Clone)]
pub struct Agent {
    services: Services,
    default_city: String,
}

impl Agent {
    pub fn new(services: Services, default_city: impl Into<String>) -> Self {
        Self { services, default_city: default_city.into() }
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Reply to one message. Errors are rendered as their user-facing text.
    pub async fn handle(&self, input: &str) -> String {
        match self.respond(input).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = ?err, "Turn failed");
                err.to_string()
            }
        }
    }

    pub async fn respond(&self, input: &str) -> Result<String, AgentError> {
        if !is_weather_question(input) {
            return Ok(format!("You said → {input}"));
        }

        let horizon = detect_horizon(input);
        let city = self.city_for(input);
        debug!(%horizon, city = %city, "Extracted query");

        let geo = self
            .services
            .geocoder
            .get_coordinates(&city)
            .await
            .map_err(AgentError::Geocode)?;
        info!(city = %geo.city, country = %geo.country, "Resolved location");

        let context = match horizon.forecast_days() {
            None => {
                let weather = self
                    .services
                    .weather
                    .get_current_weather(geo.latitude, geo.longitude)
                    .await
                    .map_err(AgentError::Weather)?;
                current_context(input, &geo, &weather)
            }
            Some(days) => {
                let forecast = self
                    .services
                    .weather
                    .get_daily_forecast(geo.latitude, geo.longitude, days)
                    .await
                    .map_err(AgentError::Forecast)?;
                forecast_context(input, &geo, &forecast)
            }
        };

        self.services
            .llm
            .generate_response(&context)
            .await
            .map_err(AgentError::Language)
    }

    /// Extracted and cleaned city, or the configured default.
    fn city_for(&self, input: &str) -> String {
        let city = clean_city_name(&extract_city(input));
        if city.is_empty() { self.default_city.clone() } else { city }
    }
}

pub fn current_context(question: &str, geo: &GeoLocation, weather: &CurrentWeather) -> String {
    let advice = advise(weather.temperature, weather.windspeed);

    format!(
        "User question: {question}\n\
         Location: {}, {}\n\
         Current temperature: {}°C\n\
         Wind speed: {} km/h\n\
         Rule-based advice: {advice}\n",
        geo.city,
        geo.country,
        fmt_value(weather.temperature),
        fmt_value(weather.windspeed),
    )
}

pub fn forecast_context(question: &str, geo: &GeoLocation, forecast: &Forecast) -> String {
    let mut out = format!(
        "User question: {question}\n\
         Location: {}, {}\n\
         \n\
         Forecast Data:\n",
        geo.city, geo.country,
    );

    for day in &forecast.days {
        let _ = writeln!(
            out,
            "Date: {}, Max: {}°C, Min: {}°C, Rain chance: {}%",
            day.date,
            fmt_value(day.temp_max),
            fmt_value(day.temp_min),
            fmt_value(day.precip_prob),
        );
    }

    out.push_str(
        "\nExplain this forecast clearly for a non-technical user.\n\
         Mention if they should carry umbrella, jacket, etc.\n",
    );
    out
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
