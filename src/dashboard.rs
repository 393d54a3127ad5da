use chrono::{DateTime, Local};
use serde::Serialize;

use crate::air_quality::{AirQuality, Aqi};
use crate::chart::BarChart;
use crate::config::DashboardConfig;
use crate::feed::FeedSource;
use crate::pollutants::{self, DisplayRow, PollutantDescriptions};

pub const FETCH_FAILURE_MESSAGE: &str = "Unable to fetch data for the selected city.";

#[derive(Serialize, Debug, Clone)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// Rendered on every page, whatever happened upstream.
#[derive(Serialize, Debug, Clone)]
pub struct Sidebar {
    pub title: String,
    pub prompt: String,
    pub selector_label: String,
    pub cities: Vec<String>,
    pub selected: String,
    pub note_heading: String,
    pub note: String,
    pub link: Link,
}

impl Sidebar {
    pub fn new(cities: &[String], selected: &str) -> Self {
        Sidebar {
            title: "Air Quality Tracker".to_string(),
            prompt: "Select a city to see its air quality details:".to_string(),
            selector_label: "Select a city:".to_string(),
            cities: cities.to_vec(),
            selected: selected.to_string(),
            note_heading: "Note:".to_string(),
            note: "Data fetched from World Air Quality Index project.".to_string(),
            link: Link {
                text: "Learn more about AQI".to_string(),
                href: "https://aqicn.org/faq/".to_string(),
            },
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Metric {
    pub label: String,
    pub value: Aqi,
}

#[derive(Serialize, Debug, Clone)]
pub struct Details {
    pub heading: String,
    pub caption: String,
    pub lines: Vec<String>,
}

/// Everything shown for a city whose reading came back.
#[derive(Serialize, Debug, Clone)]
pub struct CityReport {
    pub city: String,
    pub title: String,
    pub metric: Metric,
    pub table_heading: String,
    pub table: Vec<DisplayRow>,
    pub chart: BarChart,
    pub details: Details,
    pub fetched_at: DateTime<Local>,
}

impl CityReport {
    pub fn new(city: &str, reading: &AirQuality, descriptions: &PollutantDescriptions) -> Self {
        let table = pollutants::to_display_table(&reading.iaqi, descriptions);
        let chart = BarChart::from_table(&table);

        CityReport {
            city: city.to_string(),
            title: format!("Air Quality in {}", city),
            metric: Metric {
                label: "Air Quality Index (AQI)".to_string(),
                value: reading.aqi.clone(),
            },
            table_heading: "Current Pollutants".to_string(),
            table,
            chart,
            details: Details {
                heading: "Detailed Pollutant Information".to_string(),
                caption: "Click to see detailed pollutant information".to_string(),
                lines: pollutants::detail_lines(&reading.iaqi, descriptions),
            },
            fetched_at: reading.fetched_at,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Content {
    Success(CityReport),
    Failure { message: String },
}

/// The complete view state for one interaction.
#[derive(Serialize, Debug, Clone)]
pub struct Page {
    pub sidebar: Sidebar,
    pub content: Content,
}

/// Managed state: configuration, descriptions and the feed.
pub struct Dashboard {
    config: DashboardConfig,
    descriptions: PollutantDescriptions,
    source: Box<dyn FeedSource>,
}

impl Dashboard {
    pub fn new(
        config: DashboardConfig,
        descriptions: PollutantDescriptions,
        source: Box<dyn FeedSource>,
    ) -> Self {
        Dashboard {
            config,
            descriptions,
            source,
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.config.cities
    }

    /// Maps the requested city onto the configured list; no request means the
    /// first city.
    pub fn resolve_city(&self, requested: Option<&str>) -> Option<&str> {
        match requested {
            Some(name) => self.config.find_city(name),
            None => self.config.default_city(),
        }
    }

    /// Fetches `city` and builds the page. Feed errors end up as the failure
    /// content, never as an error.
    pub async fn handle(&self, city: &str) -> Page {
        let content = match self.source.fetch(city).await {
            Ok(reading) => {
                tracing::info!("fetched air quality for {} (aqi {})", city, reading.aqi);
                if reading.iaqi.is_empty() {
                    tracing::debug!("{} reported no individual readings", city);
                }
                Content::Success(CityReport::new(city, &reading, &self.descriptions))
            }
            Err(e) => {
                tracing::warn!("unable to fetch air quality for {}: {}", city, e);
                Content::Failure {
                    message: FETCH_FAILURE_MESSAGE.to_string(),
                }
            }
        };

        Page {
            sidebar: Sidebar::new(&self.config.cities, city),
            content,
        }
    }
}
