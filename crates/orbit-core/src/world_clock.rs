//! World clock: a built-in city catalog and per-city local time readings.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldClockCity {
    pub city: &'static str,
    /// Country or state.
    pub region: &'static str,
    /// Continent grouping used when browsing the catalog.
    pub area: &'static str,
    pub timezone: Tz,
    pub lat: f64,
    pub lng: f64,
}

macro_rules! city {
    ($city:expr, $region:expr, $area:expr, $tz:expr, $lat:expr, $lng:expr) => {
        WorldClockCity {
            city: $city,
            region: $region,
            area: $area,
            timezone: $tz,
            lat: $lat,
            lng: $lng,
        }
    };
}

use chrono_tz::{Africa, America, Asia, Australia, Europe, Pacific};

static CATALOG: &[WorldClockCity] = &[
    city!("New York", "USA", "North America", America::New_York, 40.7128, -74.0060),
    city!("Los Angeles", "USA", "North America", America::Los_Angeles, 34.0522, -118.2437),
    city!("Chicago", "USA", "North America", America::Chicago, 41.8781, -87.6298),
    city!("Denver", "USA", "North America", America::Denver, 39.7392, -104.9903),
    city!("Toronto", "Canada", "North America", America::Toronto, 43.6532, -79.3832),
    city!("Vancouver", "Canada", "North America", America::Vancouver, 49.2827, -123.1207),
    city!("Mexico City", "Mexico", "North America", America::Mexico_City, 19.4326, -99.1332),
    city!("São Paulo", "Brazil", "South America", America::Sao_Paulo, -23.5505, -46.6333),
    city!("Buenos Aires", "Argentina", "South America", America::Argentina::Buenos_Aires, -34.6037, -58.3816),
    city!("Lima", "Peru", "South America", America::Lima, -12.0464, -77.0428),
    city!("Bogotá", "Colombia", "South America", America::Bogota, 4.7110, -74.0721),
    city!("London", "UK", "Europe", Europe::London, 51.5074, -0.1278),
    city!("Paris", "France", "Europe", Europe::Paris, 48.8566, 2.3522),
    city!("Berlin", "Germany", "Europe", Europe::Berlin, 52.5200, 13.4050),
    city!("Madrid", "Spain", "Europe", Europe::Madrid, 40.4168, -3.7038),
    city!("Rome", "Italy", "Europe", Europe::Rome, 41.9028, 12.4964),
    city!("Amsterdam", "Netherlands", "Europe", Europe::Amsterdam, 52.3676, 4.9041),
    city!("Stockholm", "Sweden", "Europe", Europe::Stockholm, 59.3293, 18.0686),
    city!("Lisbon", "Portugal", "Europe", Europe::Lisbon, 38.7223, -9.1393),
    city!("Athens", "Greece", "Europe", Europe::Athens, 37.9838, 23.7275),
    city!("Moscow", "Russia", "Europe", Europe::Moscow, 55.7558, 37.6173),
    city!("Istanbul", "Turkey", "Europe", Europe::Istanbul, 41.0082, 28.9784),
    city!("Tokyo", "Japan", "Asia", Asia::Tokyo, 35.6762, 139.6503),
    city!("Shanghai", "China", "Asia", Asia::Shanghai, 31.2304, 121.4737),
    city!("Hong Kong", "China", "Asia", Asia::Hong_Kong, 22.3193, 114.1694),
    city!("Singapore", "Singapore", "Asia", Asia::Singapore, 1.3521, 103.8198),
    city!("Seoul", "South Korea", "Asia", Asia::Seoul, 37.5665, 126.9780),
    city!("Mumbai", "India", "Asia", Asia::Kolkata, 19.0760, 72.8777),
    city!("New Delhi", "India", "Asia", Asia::Kolkata, 28.6139, 77.2090),
    city!("Bangkok", "Thailand", "Asia", Asia::Bangkok, 13.7563, 100.5018),
    city!("Dubai", "UAE", "Asia", Asia::Dubai, 25.2048, 55.2708),
    city!("Kathmandu", "Nepal", "Asia", Asia::Kathmandu, 27.7172, 85.3240),
    city!("Cairo", "Egypt", "Africa", Africa::Cairo, 30.0444, 31.2357),
    city!("Lagos", "Nigeria", "Africa", Africa::Lagos, 6.5244, 3.3792),
    city!("Johannesburg", "South Africa", "Africa", Africa::Johannesburg, -26.2041, 28.0473),
    city!("Nairobi", "Kenya", "Africa", Africa::Nairobi, -1.2921, 36.8219),
    city!("Casablanca", "Morocco", "Africa", Africa::Casablanca, 33.5731, -7.5898),
    city!("Sydney", "Australia", "Oceania", Australia::Sydney, -33.8688, 151.2093),
    city!("Perth", "Australia", "Oceania", Australia::Perth, -31.9505, 115.8605),
    city!("Auckland", "New Zealand", "Oceania", Pacific::Auckland, -36.8485, 174.7633),
    city!("Honolulu", "Hawaii, USA", "Oceania", Pacific::Honolulu, 21.3069, -157.8583),
];

pub const DEFAULT_CITIES: [&str; 4] = ["New York", "London", "Tokyo", "Sydney"];

/// Every built-in city.
pub fn catalog() -> &'static [WorldClockCity] {
    CATALOG
}

/// Continent groupings in catalog order.
pub fn areas() -> Vec<&'static str> {
    let mut areas: Vec<&'static str> = Vec::new();
    for c in CATALOG {
        if !areas.contains(&c.area) {
            areas.push(c.area);
        }
    }
    areas
}

/// Exact (case-insensitive) lookup by city name.
pub fn find_city(name: &str) -> Option<&'static WorldClockCity> {
    let name = name.trim();
    CATALOG.iter().find(|c| c.city.eq_ignore_ascii_case(name))
}

/// Case-insensitive substring search over city and region names.
pub fn search(query: &str) -> Vec<&'static WorldClockCity> {
    let q = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|c| c.city.to_lowercase().contains(&q) || c.region.to_lowercase().contains(&q))
        .collect()
}

/// One city's clock at a given instant.
#[derive(Debug, Clone, Serialize)]
pub struct ClockReading {
    pub city: &'static str,
    pub region: &'static str,
    pub timezone: String,
    pub local_time: NaiveDateTime,
    /// Hours ahead (+) or behind (-) the observer. Fractional for zones
    /// such as India (+5.5) or Nepal (+5.75).
    pub offset_hours: f64,
    pub is_day: bool,
}

impl ClockReading {
    /// `Local Time` when the offset is zero, else e.g. `+9 HRS` / `-4.5 HRS`.
    pub fn offset_label(&self) -> String {
        if self.offset_hours == 0.0 {
            "Local Time".to_string()
        } else {
            let sign = if self.offset_hours > 0.0 { "+" } else { "" };
            format!("{sign}{} HRS", self.offset_hours)
        }
    }
}

/// The user's list of cities, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct WorldClock {
    cities: Vec<&'static WorldClockCity>,
}

impl WorldClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from city names, skipping unknown names and duplicates.
    /// Returns the clock and the names that were not found.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> (Self, Vec<String>) {
        let mut clock = Self::new();
        let mut unknown = Vec::new();
        for name in names {
            match find_city(name.as_ref()) {
                Some(city) => {
                    clock.add(city);
                }
                None => unknown.push(name.as_ref().to_string()),
            }
        }
        (clock, unknown)
    }

    pub fn cities(&self) -> &[&'static WorldClockCity] {
        &self.cities
    }

    /// Returns false if the city was already present.
    pub fn add(&mut self, city: &'static WorldClockCity) -> bool {
        if self.cities.iter().any(|c| c.city == city.city) {
            return false;
        }
        self.cities.push(city);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<&'static WorldClockCity> {
        if index < self.cities.len() {
            Some(self.cities.remove(index))
        } else {
            None
        }
    }

    /// Readings for every city at `now`, relative to `observer`.
    pub fn readings(&self, now: DateTime<Utc>, observer: FixedOffset) -> Vec<ClockReading> {
        self.cities.iter().map(|c| reading(c, now, observer)).collect()
    }

    /// Readings relative to the system's local zone.
    pub fn readings_now(&self) -> Vec<ClockReading> {
        let now = Utc::now();
        let observer = Local.from_utc_datetime(&now.naive_utc()).offset().fix();
        self.readings(now, observer)
    }
}

pub fn reading(city: &WorldClockCity, now: DateTime<Utc>, observer: FixedOffset) -> ClockReading {
    let local = now.with_timezone(&city.timezone);
    let city_offset = local.offset().fix().local_minus_utc();
    let diff_secs = city_offset - observer.local_minus_utc();
    let hour = local.hour();
    ClockReading {
        city: city.city,
        region: city.region,
        timezone: city.timezone.name().to_string(),
        local_time: local.naive_local(),
        offset_hours: diff_secs as f64 / 3600.0,
        is_day: (6..18).contains(&hour),
    }
}
