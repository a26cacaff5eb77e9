//! Core library for the `weather-agent` chat CLI.
//!
//! This crate defines:
//! - Keyword heuristics that classify a message and pull out city and time horizon
//! - A rule-based advice engine for current conditions
//! - Collaborator traits for geocoding, weather data and language-model phrasing,
//!   with Open-Meteo and OpenAI-compatible implementations
//! - The per-message orchestrator, session transcript and registered-user store
//! - Configuration handling
//!
//! It is used by `weather-agent-cli`, but the [`Agent`] can be embedded in any front-end.

pub mod advice;
pub mod agent;
pub mod alias;
pub mod config;
pub mod conversation;
pub mod intent;
pub mod model;
pub mod provider;
pub mod users;

pub use advice::advise;
pub use agent::{Agent, AgentError};
pub use alias::{DEFAULT_CITY, resolve_alias};
pub use config::{Config, EndpointConfig, LlmConfig};
pub use conversation::{Conversation, Sender, Turn};
pub use intent::{clean_city_name, detect_horizon, extract_city, is_weather_question};
pub use model::{CurrentWeather, DailyForecast, Forecast, GeoLocation, Horizon};
pub use provider::{Geocoder, LanguageModel, Services, WeatherSource, services_from_config};
pub use users::UserStore;
