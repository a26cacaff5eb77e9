use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time window a weather question is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Now,
    Tomorrow,
    Next3Days,
    Next7Days,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Now => "now",
            Horizon::Tomorrow => "tomorrow",
            Horizon::Next3Days => "next_3_days",
            Horizon::Next7Days => "next_7_days",
        }
    }

    /// Number of daily records to request, or `None` when current conditions are wanted.
    ///
    /// "Tomorrow" asks for two days because the first daily row is today.
    pub fn forecast_days(&self) -> Option<u32> {
        match self {
            Horizon::Now => None,
            Horizon::Tomorrow => Some(2),
            Horizon::Next3Days => Some(3),
            Horizon::Next7Days => Some(7),
        }
    }

    pub const fn all() -> &'static [Horizon] {
        &[Horizon::Now, Horizon::Tomorrow, Horizon::Next3Days, Horizon::Next7Days]
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Kilometres per hour.
    pub windspeed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    /// Maximum precipitation probability for the day, in percent.
    pub precip_prob: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<DailyForecast>,
}
