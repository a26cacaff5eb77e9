use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::model::{CurrentWeather, DailyForecast, Forecast, GeoLocation};

use super::{Geocoder, WeatherSource, truncate_body};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_GEOCODING_URL.to_string(), DEFAULT_FORECAST_URL.to_string())
    }

    pub fn with_base_urls(geocoding_url: String, forecast_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for Open-Meteo")?;

        Ok(Self {
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        debug!(url, what, "Open-Meteo request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    #[serde(default)]
    results: Vec<OmPlace>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    current_weather: Option<OmCurrent>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature: Option<f64>,
    windspeed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmDailyResponse {
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

impl OmDaily {
    fn into_forecast(self) -> Forecast {
        let column = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let days = self
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| DailyForecast {
                date: *date,
                temp_max: column(&self.temperature_2m_max, i),
                temp_min: column(&self.temperature_2m_min, i),
                precip_prob: column(&self.precipitation_probability_max, i),
            })
            .collect();

        Forecast { days }
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn get_coordinates(&self, city: &str) -> Result<GeoLocation> {
        let url = format!("{}/v1/search", self.geocoding_url);
        let query = [
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let parsed: OmGeocodeResponse = self.get_json(&url, &query, "geocoding").await?;

        let place = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("City '{city}' not found"))?;

        Ok(GeoLocation {
            latitude: place.latitude,
            longitude: place.longitude,
            city: place.name,
            country: place.country.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn get_current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("current_weather", "true".to_string()),
        ];

        let parsed: OmCurrentResponse = self.get_json(&url, &query, "current weather").await?;

        let current = parsed
            .current_weather
            .ok_or_else(|| anyhow!("Open-Meteo response contained no current weather"))?;

        Ok(CurrentWeather {
            temperature: current.temperature,
            windspeed: current.windspeed,
        })
    }

    async fn get_daily_forecast(&self, lat: f64, lon: f64, days: u32) -> Result<Forecast> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            (
                "daily",
                "temperature_2m_max,temperature_2m_min,precipitation_probability_max".to_string(),
            ),
            ("forecast_days", days.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let parsed: OmDailyResponse = self.get_json(&url, &query, "daily forecast").await?;
        let forecast = parsed.daily.into_forecast();

        if forecast.days.is_empty() {
            return Err(anyhow!("Open-Meteo forecast response contained no days"));
        }

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_columns_are_zipped_by_index() {
        let daily: OmDaily = serde_json::from_value(serde_json::json!({
            "time": ["2026-10-17", "2026-10-18"],
            "temperature_2m_max": [29.1, null],
            "temperature_2m_min": [19.4],
            "precipitation_probability_max": [40, 85]
        }))
        .unwrap();

        let forecast = daily.into_forecast();
        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].temp_max, Some(29.1));
        assert_eq!(forecast.days[1].temp_max, None);
        assert_eq!(forecast.days[1].temp_min, None);
        assert_eq!(forecast.days[1].precip_prob, Some(85.0));
        assert_eq!(forecast.days[1].date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn base_urls_lose_trailing_slash() {
        let om = OpenMeteo::with_base_urls("http://geo/".into(), "http://wx//".into()).unwrap();
        assert_eq!(om.geocoding_url, "http://geo");
        assert_eq!(om.forecast_url, "http://wx");
    }

    #[test]
    fn default_endpoints_build() {
        let om = OpenMeteo::new().unwrap();
        assert_eq!(om.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(om.forecast_url, DEFAULT_FORECAST_URL);
    }
}
