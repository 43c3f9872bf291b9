use serde::{Deserialize, Serialize};

/// Decoded body of the county forecast dataset.
///
/// Only the fields the pipeline needs are modelled; everything else in the
/// feed (`success`, `result`, ...) is ignored by serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub records: Records,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Records {
    #[serde(rename = "datasetDescription", default, skip_serializing_if = "Option::is_none")]
    pub dataset_description: Option<String>,

    #[serde(rename = "location")]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "locationName")]
    pub name: String,

    #[serde(rename = "weatherElement")]
    pub elements: Vec<WeatherElement>,
}

/// One named weather variable (`Wx`, `PoP`, `MaxT`, `MinT`, `CI`, ...)
/// reported over a sequence of intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherElement {
    #[serde(rename = "elementName")]
    pub name: String,

    #[serde(rename = "time")]
    pub intervals: Vec<TimeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    #[serde(rename = "startTime")]
    pub start: String,

    #[serde(rename = "endTime")]
    pub end: String,

    pub parameter: Parameter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Display value. Numeric elements encode their number here as a string.
    #[serde(rename = "parameterName")]
    pub name: String,
}

impl TimeValue {
    /// Key used to group values of different elements covering the same period.
    pub fn interval_key(&self) -> String {
        format!("{}~{}", self.start, self.end)
    }

    pub fn value(&self) -> &str {
        &self.parameter.name
    }
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
