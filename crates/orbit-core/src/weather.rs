//! Weather domain types and the provider capability.
//!
//! Fetching is left to implementors of [`WeatherProvider`]. Provider condition
//! codes map onto a closed [`WeatherCondition`]; a code outside the known
//! tables is an error, never a silent fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sun,
    Cloud,
    Rain,
    Storm,
    Snow,
}

// WeatherAPI.com condition codes.
const SUN_CODES: &[u32] = &[1000];
const CLOUD_CODES: &[u32] = &[1003, 1006, 1009, 1030, 1135, 1147];
const RAIN_CODES: &[u32] = &[
    1063, 1150, 1153, 1168, 1171, 1180, 1183, 1186, 1189, 1192, 1195, 1198, 1201, 1240, 1243,
    1246,
];
const STORM_CODES: &[u32] = &[1087, 1273, 1276, 1279, 1282];
const SNOW_CODES: &[u32] = &[
    1066, 1069, 1072, 1114, 1117, 1204, 1207, 1210, 1213, 1216, 1219, 1222, 1225, 1237, 1249,
    1252, 1255, 1258, 1261, 1264,
];

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 5] = [
        WeatherCondition::Sun,
        WeatherCondition::Cloud,
        WeatherCondition::Rain,
        WeatherCondition::Storm,
        WeatherCondition::Snow,
    ];

    /// Map a provider condition code.
    pub fn from_code(code: u32) -> Result<Self, WeatherError> {
        let tables = [
            (SUN_CODES, WeatherCondition::Sun),
            (CLOUD_CODES, WeatherCondition::Cloud),
            (RAIN_CODES, WeatherCondition::Rain),
            (STORM_CODES, WeatherCondition::Storm),
            (SNOW_CODES, WeatherCondition::Snow),
        ];
        tables
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, condition)| *condition)
            .ok_or(WeatherError::UnmappedCondition(code))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sun => "sun",
            WeatherCondition::Cloud => "cloud",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Storm => "storm",
            WeatherCondition::Snow => "snow",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WeatherError::UnknownCondition(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    /// Average temperature in Celsius.
    pub temp: i32,
    pub icon: WeatherCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// "City, Country".
    pub city: String,
    /// Celsius.
    pub temp: i32,
    pub condition: WeatherCondition,
    pub high: i32,
    pub low: i32,
    /// Percent.
    pub humidity: u8,
    /// km/h.
    pub wind_speed: u32,
    pub description: String,
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

/// Anything that can produce a weather snapshot for a city.
pub trait WeatherProvider {
    fn name(&self) -> &str;

    fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(WeatherSnapshot);

    impl WeatherProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
            if self.0.city.starts_with(city) {
                Ok(self.0.clone())
            } else {
                Err(WeatherError::CityNotFound(city.to_string()))
            }
        }
    }

    #[test]
    fn maps_known_codes() {
        assert_eq!(WeatherCondition::from_code(1000), Ok(WeatherCondition::Sun));
        assert_eq!(WeatherCondition::from_code(1009), Ok(WeatherCondition::Cloud));
        assert_eq!(WeatherCondition::from_code(1195), Ok(WeatherCondition::Rain));
        assert_eq!(WeatherCondition::from_code(1276), Ok(WeatherCondition::Storm));
        assert_eq!(WeatherCondition::from_code(1225), Ok(WeatherCondition::Snow));
    }

    #[test]
    fn unknown_code_is_an_error() {
        assert_eq!(
            WeatherCondition::from_code(4242),
            Err(WeatherError::UnmappedCondition(4242))
        );
    }

    #[test]
    fn code_tables_are_disjoint() {
        let all = [SUN_CODES, CLOUD_CODES, RAIN_CODES, STORM_CODES, SNOW_CODES];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert!(a.iter().all(|code| !b.contains(code)));
            }
        }
    }

    #[test]
    fn condition_names_parse() {
        assert_eq!("Storm".parse::<WeatherCondition>(), Ok(WeatherCondition::Storm));
        assert!("moon".parse::<WeatherCondition>().is_err());
        let json = serde_json::to_string(&WeatherCondition::Snow).unwrap();
        assert_eq!(json, "\"snow\"");
    }

    #[test]
    fn provider_trait_object() {
        let snapshot = WeatherSnapshot {
            city: "Oslo, Norway".into(),
            temp: -3,
            condition: WeatherCondition::Snow,
            high: 0,
            low: -7,
            humidity: 80,
            wind_speed: 12,
            description: "Frozen precipitation imminent.".into(),
            forecast: vec![DailyForecast {
                day: "Mon".into(),
                temp: -2,
                icon: WeatherCondition::Cloud,
            }],
        };
        let provider: Box<dyn WeatherProvider> = Box::new(FixedProvider(snapshot));
        assert_eq!(provider.name(), "fixed");
        assert_eq!(
            provider.fetch_weather("Oslo").unwrap().condition,
            WeatherCondition::Snow
        );
        assert_eq!(
            provider.fetch_weather("Lima").unwrap_err(),
            WeatherError::CityNotFound("Lima".into())
        );
    }
}
