use thiserror::Error;

/// Errors raised while preparing engine inputs (config, colors).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Failed to parse engine config RON: {0}")]
    ConfigParse(String),

    #[error("invalid hex color '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    #[error("Engine config field '{field}' = {value} out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}
