use serde::Serialize;

use crate::air_quality::Readings;

const STANDARD: [(&str, &str); 12] = [
    ("pm25", "PM2.5 (Fine Particulate Matter)"),
    ("pm10", "PM10 (Respirable Particulate Matter)"),
    ("no2", "NO2 (Nitrogen Dioxide)"),
    ("so2", "SO2 (Sulfur Dioxide)"),
    ("o3", "O3 (Ozone)"),
    ("co", "CO (Carbon Monoxide)"),
    ("t", "Temperature"),
    ("h", "Humidity"),
    ("p", "Pressure"),
    ("w", "Wind Speed"),
    ("wg", "Wind Gust"),
    ("dew", "Dew Point"),
];

/// Display names for parameter codes.
#[derive(Debug, Clone, Copy)]
pub struct PollutantDescriptions {
    entries: &'static [(&'static str, &'static str)],
}

impl PollutantDescriptions {
    pub fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        PollutantDescriptions { entries }
    }

    /// The twelve codes the World Air Quality Index feed commonly reports.
    pub fn standard() -> Self {
        PollutantDescriptions::new(&STANDARD)
    }

    pub fn describe(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, description)| *description)
    }

    /// The description, or the raw code for unknown parameters.
    pub fn label_for<'a>(&self, code: &'a str) -> &'a str {
        self.describe(code).unwrap_or(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub label: String,
    pub concentration: f64,
}

/// One row per reading, labelled, in reading order. Both the table and the
/// chart are drawn from this.
pub fn to_display_table(readings: &Readings, labels: &PollutantDescriptions) -> Vec<DisplayRow> {
    readings
        .iter()
        .map(|m| DisplayRow {
            label: labels.label_for(&m.code).to_string(),
            concentration: m.concentration(),
        })
        .collect()
}

/// `"{description}: {value}"` for every described code present in the
/// reading, in description order. Values print as the feed wrote them.
pub fn detail_lines(readings: &Readings, labels: &PollutantDescriptions) -> Vec<String> {
    labels
        .iter()
        .filter_map(|(code, description)| {
            readings
                .get(code)
                .map(|value| format!("{}: {}", description, value))
        })
        .collect()
}
