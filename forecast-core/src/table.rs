use serde::Serialize;

use crate::{
    ForecastError, Result,
    model::ForecastResponse,
    reshape::{IntervalRecord, IntervalRecords, reshape},
    selector::find_location,
};

/// Description shown when an interval has no `Wx` value.
pub const MISSING_DESCRIPTION: &str = "\u{2014}";

pub const ELEMENT_DESCRIPTION: &str = "Wx";
pub const ELEMENT_RAIN_PROBABILITY: &str = "PoP";
pub const ELEMENT_MAX_TEMP: &str = "MaxT";
pub const ELEMENT_MIN_TEMP: &str = "MinT";

/// One interval of the final forecast table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub interval: String,
    pub description: String,
    pub rain_probability: f64,
    pub max_temp: f64,
    pub min_temp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TempType {
    MaxTemp,
    MinTemp,
}

impl TempType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempType::MaxTemp => "max_temp",
            TempType::MinTemp => "min_temp",
        }
    }
}

/// Long-format row: one temperature series value for one interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRowLong {
    pub interval: String,
    pub temp_type: TempType,
    pub temp_value: f64,
}

/// Build one row per interval key, keeping the mapping's order.
pub fn to_rows(records: &IntervalRecords) -> Result<Vec<ForecastRow>> {
    records
        .iter()
        .map(|(interval, record)| -> Result<ForecastRow> {
            Ok(ForecastRow {
                interval: interval.clone(),
                description: record
                    .get(ELEMENT_DESCRIPTION)
                    .cloned()
                    .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
                rain_probability: numeric(record, interval, ELEMENT_RAIN_PROBABILITY)?,
                max_temp: numeric(record, interval, ELEMENT_MAX_TEMP)?,
                min_temp: numeric(record, interval, ELEMENT_MIN_TEMP)?,
            })
        })
        .collect()
}

/// Explode each row into a `max_temp` row followed by a `min_temp` row.
pub fn to_long_form(rows: &[ForecastRow]) -> Vec<ForecastRowLong> {
    rows.iter()
        .flat_map(|row| {
            [(TempType::MaxTemp, row.max_temp), (TempType::MinTemp, row.min_temp)].map(
                |(temp_type, temp_value)| ForecastRowLong {
                    interval: row.interval.clone(),
                    temp_type,
                    temp_value,
                },
            )
        })
        .collect()
}

// Absent elements count as zero; present but non-numeric ones are an error.
fn numeric(record: &IntervalRecord, interval: &str, element: &str) -> Result<f64> {
    let Some(raw) = record.get(element) else {
        return Ok(0.0);
    };

    raw.trim().parse::<f64>().map_err(|_| ForecastError::Parse {
        element: element.to_string(),
        interval: interval.to_string(),
        value: raw.clone(),
    })
}

/// Tabulated forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location: String,
    pub rows: Vec<ForecastRow>,
}

impl Forecast {
    pub fn long_form(&self) -> Vec<ForecastRowLong> {
        to_long_form(&self.rows)
    }
}

/// Select `name` from `resp`, reshape it and tabulate it.
pub fn build_forecast(resp: &ForecastResponse, name: &str) -> Result<Forecast> {
    let loc = find_location(resp, name)?;
    let rows = to_rows(&reshape(loc))?;

    log::info!("Built {} forecast rows for '{}'", rows.len(), name);

    Ok(Forecast { location: loc.name.clone(), rows })
}
