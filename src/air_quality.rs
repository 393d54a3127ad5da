use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Overall index of a city reading.
///
/// The feed reports an integer most of the time; stations without a current
/// index send a placeholder string such as `"-"`, which is shown verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Aqi {
    Index(i64),
    Value(f64),
    Reported(String),
}

impl fmt::Display for Aqi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aqi::Index(index) => write!(f, "{}", index),
            Aqi::Value(value) => write!(f, "{}", value),
            Aqi::Reported(text) => f.write_str(text),
        }
    }
}

/// One measured parameter (`pm25`, `t`, ...) and its value `v`, kept as the
/// feed wrote it (`10` and `10.0` stay distinct).
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub code: String,
    pub v: Number,
}

impl Measurement {
    pub fn concentration(&self) -> f64 {
        self.v.as_f64().unwrap_or_default()
    }
}

/// Individual readings keyed by parameter code, in feed order.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Map<String, Value>")]
pub struct Readings(Vec<Measurement>);

impl Readings {
    pub fn new(measurements: Vec<Measurement>) -> Self {
        Readings(measurements)
    }

    pub fn get(&self, code: &str) -> Option<&Number> {
        self.0.iter().find(|m| m.code == code).map(|m| &m.v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Entries without a numeric `v` are treated like absent keys.
impl From<Map<String, Value>> for Readings {
    fn from(map: Map<String, Value>) -> Self {
        Readings::new(
            map.into_iter()
                .filter_map(|(code, reading)| match reading.get("v") {
                    Some(Value::Number(v)) => Some(Measurement { code, v: v.clone() }),
                    _ => None,
                })
                .collect(),
        )
    }
}

/// The `data` payload of a successful feed response.
#[derive(Deserialize, Debug, Clone)]
pub struct AirQuality {
    pub aqi: Aqi,
    #[serde(default)]
    pub iaqi: Readings,
    #[serde(skip_deserializing, default = "Local::now")]
    pub fetched_at: DateTime<Local>,
}
