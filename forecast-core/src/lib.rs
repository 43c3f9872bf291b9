//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The typed forecast feed schema and its HTTP/file sources
//! - The select → reshape → tabulate pipeline producing table rows
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod reshape;
pub mod selector;
pub mod source;
pub mod table;

pub use config::{Config, DEFAULT_ENDPOINT};
pub use error::{ForecastError, Result};
pub use model::{ForecastResponse, Location, TimeValue, WeatherElement};
pub use reshape::{IntervalRecord, IntervalRecords, reshape};
pub use selector::{find_location, list_names};
pub use source::{CwaClient, FileSource, ForecastSource, fetch, source_from_config};
pub use table::{
    Forecast, ForecastRow, ForecastRowLong, TempType, build_forecast, to_long_form, to_rows,
};
