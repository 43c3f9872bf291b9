use thiserror::Error;

/// Errors produced while fetching and tabulating a forecast.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Transport failure: DNS, TLS, connect, or reading the body.
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("Forecast request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body is not JSON, or does not match the forecast schema.
    #[error("Malformed forecast payload")]
    Format(#[from] serde_json::Error),

    /// No location with exactly this name exists in the response.
    #[error("Location '{0}' not found in forecast")]
    NotFound(String),

    /// A numeric element carried a value that is not a number.
    #[error("Invalid {element} value '{value}' for interval {interval}")]
    Parse {
        element: String,
        interval: String,
        value: String,
    },

    /// Reading a saved payload from disk failed.
    #[error("Failed to read forecast file")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
