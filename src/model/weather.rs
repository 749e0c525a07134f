//! Weather payloads and forecast reduction
//!
//! https://openweathermap.org/current and https://openweathermap.org/forecast5

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Distinct calendar days kept from the forecast
pub const FORECAST_DAYS: usize = 7;
/// Days plotted on the temperature chart
pub const FORECAST_CHART_DAYS: usize = 5;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Coarse condition bucket used to pick a glyph and colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    Clouds,
    Rain,
    Snow,
    Other,
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self.main.to_lowercase().as_str() {
            "clear" => ConditionKind::Clear,
            "clouds" => ConditionKind::Clouds,
            "rain" | "drizzle" | "thunderstorm" => ConditionKind::Rain,
            "snow" => ConditionKind::Snow,
            _ => ConditionKind::Other,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub sys: CurrentSys,
    #[serde(default)]
    pub timezone: i32,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CurrentSys {
    #[serde(default)]
    pub country: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

/// One 3-hour slot of the forecast
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    /// Calendar date of the slot, from `dt_txt` when present, else from the timestamp
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDateTime::parse_from_str(&self.dt_txt, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .ok()
            .or_else(|| DateTime::from_timestamp(self.dt, 0).map(|dt| dt.date_naive()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurrentConditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: Option<Condition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Offset from UTC in seconds
    pub timezone: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    /// Condition of the first slot of the day
    pub condition: Option<Condition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub location: Location,
    pub forecast: Vec<DailyForecast>,
}

impl WeatherReport {
    pub fn from_responses(current: CurrentResponse, forecast: ForecastResponse) -> Self {
        Self {
            current: CurrentConditions {
                temp: current.main.temp,
                feels_like: current.main.feels_like,
                humidity: current.main.humidity,
                wind_speed: current.wind.speed,
                condition: current.weather.into_iter().next(),
            },
            location: Location {
                name: current.name,
                country: current.sys.country,
                timezone: current.timezone,
            },
            forecast: daily_forecast(&forecast.list),
        }
    }
}

/// Group 3-hour slots by calendar date and keep the first [`FORECAST_DAYS`] dates
pub fn daily_forecast(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    let mut days: BTreeMap<NaiveDate, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        match entry.date() {
            Some(date) => days.entry(date).or_default().push(entry),
            None => tracing::warn!(dt = entry.dt, dt_txt = %entry.dt_txt, "Skipping forecast entry without a date"),
        }
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, slots)| {
            let temps = slots.iter().map(|slot| slot.main.temp);
            let min = temps.clone().fold(f64::INFINITY, f64::min);
            let max = temps.fold(f64::NEG_INFINITY, f64::max);
            DailyForecast {
                date,
                min,
                max,
                condition: slots.first().and_then(|slot| slot.weather.first().cloned()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt_txt: &str, temp: f64, main: &str) -> ForecastEntry {
        ForecastEntry {
            dt: 0,
            dt_txt: dt_txt.to_string(),
            main: MainReadings { temp, feels_like: temp, humidity: 50 },
            weather: vec![Condition {
                main: main.to_string(),
                description: main.to_lowercase(),
                icon: "01d".to_string(),
            }],
        }
    }

    #[test]
    fn test_keeps_first_seven_dates() {
        let mut entries = Vec::new();
        for day in 1..=10 {
            entries.push(entry(&format!("2024-05-{day:02} 09:00:00"), 10.0 + day as f64, "Clear"));
            entries.push(entry(&format!("2024-05-{day:02} 15:00:00"), 20.0 + day as f64, "Rain"));
        }

        let forecast = daily_forecast(&entries);
        assert_eq!(forecast.len(), 7);
        for (i, day) in forecast.iter().enumerate() {
            let n = (i + 1) as f64;
            assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 5, i as u32 + 1).unwrap());
            assert_eq!(day.min, 10.0 + n);
            assert_eq!(day.max, 20.0 + n);
            assert_eq!(day.condition.as_ref().unwrap().main, "Clear");
        }
    }

    #[test]
    fn test_dates_come_out_chronological() {
        let entries = vec![
            entry("2024-05-03 00:00:00", 5.0, "Snow"),
            entry("2024-05-01 00:00:00", 1.0, "Clouds"),
            entry("2024-05-02 00:00:00", 3.0, "Clear"),
            entry("2024-05-01 03:00:00", -2.0, "Clear"),
        ];

        let forecast = daily_forecast(&entries);
        let dates: Vec<u32> = forecast.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(dates, vec![1, 2, 3]);
        assert_eq!(forecast[0].min, -2.0);
        assert_eq!(forecast[0].max, 1.0);
        assert_eq!(forecast[0].condition.as_ref().unwrap().kind(), ConditionKind::Clouds);
    }

    #[test]
    fn test_timestamp_fallback() {
        let mut slot = entry("", 12.0, "Clear");
        slot.dt = 1_716_552_000; // 2024-05-24T12:00:00Z
        assert_eq!(slot.date(), NaiveDate::from_ymd_opt(2024, 5, 24));
    }

    #[test]
    fn test_report_from_responses() {
        let current: CurrentResponse = serde_json::from_str(
            r#"{
                "name": "San Francisco",
                "sys": {"country": "US"},
                "timezone": -25200,
                "main": {"temp": 16.4, "feels_like": 15.9, "humidity": 72},
                "wind": {"speed": 5.1},
                "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}]
            }"#,
        )
        .unwrap();
        let forecast: ForecastResponse = serde_json::from_str(
            r#"{"list": [
                {"dt": 1716552000, "dt_txt": "2024-05-24 12:00:00",
                 "main": {"temp": 17.0, "feels_like": 16.0, "humidity": 70},
                 "weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}]}
            ]}"#,
        )
        .unwrap();

        let report = WeatherReport::from_responses(current, forecast);
        assert_eq!(report.location.name, "San Francisco");
        assert_eq!(report.location.country, "US");
        assert_eq!(report.current.humidity, 72);
        assert_eq!(report.current.condition.as_ref().unwrap().kind(), ConditionKind::Clouds);
        assert_eq!(report.forecast.len(), 1);
        assert_eq!(report.forecast[0].max, 17.0);
    }
}
