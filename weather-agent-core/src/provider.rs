use crate::{
    Config,
    model::{CurrentWeather, Forecast, GeoLocation},
    provider::{open_meteo::OpenMeteo, openai::OpenAiChat},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;
pub mod openai;

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn get_coordinates(&self, city: &str) -> anyhow::Result<GeoLocation>;
}

/// Current conditions and daily forecasts for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn get_current_weather(&self, lat: f64, lon: f64) -> anyhow::Result<CurrentWeather>;

    async fn get_daily_forecast(&self, lat: f64, lon: f64, days: u32) -> anyhow::Result<Forecast>;
}

/// Turns an assembled context block into the final reply.
#[async_trait]
pub trait LanguageModel: Send + Sync + Debug {
    async fn generate_response(&self, context: &str) -> anyhow::Result<String>;
}

/// The three collaborators the agent talks to.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherSource>,
    pub llm: Arc<dyn LanguageModel>,
}

/// Build the HTTP-backed services described by `config`.
pub fn services_from_config(config: &Config) -> anyhow::Result<Services> {
    build_services(config, config.llm_api_key())
}

fn build_services(config: &Config, api_key: Option<String>) -> anyhow::Result<Services> {
    let meteo = Arc::new(OpenMeteo::with_base_urls(
        config.endpoints.geocoding_url.clone(),
        config.endpoints.forecast_url.clone(),
    )?);

    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No language model API key configured.\n\
             Hint: run `weather-agent configure` or set OPENAI_API_KEY."
        )
    })?;

    let llm = OpenAiChat::new(api_key, &config.llm)?;

    Ok(Services {
        geocoder: meteo.clone(),
        weather: meteo,
        llm: Arc::new(llm),
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
