use crate::{ForecastError, Location, Result, model::ForecastResponse};

/// Location names in feed order, duplicates included.
pub fn list_names(resp: &ForecastResponse) -> Vec<&str> {
    resp.records.locations.iter().map(|loc| loc.name.as_str()).collect()
}

/// First location whose name matches `name` exactly (case-sensitive).
pub fn find_location<'a>(resp: &'a ForecastResponse, name: &str) -> Result<&'a Location> {
    resp.records
        .locations
        .iter()
        .find(|loc| loc.name == name)
        .ok_or_else(|| ForecastError::NotFound(name.to_string()))
}
