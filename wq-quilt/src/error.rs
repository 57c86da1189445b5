/// Error types for the weather quilt engine
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for quilt operations.
///
/// Missing measurements are not errors; they map to a scale's missing color.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuiltError {
    /// Malformed color table or legend sampling parameters
    #[error("Invalid color scale configuration: {0}")]
    Configuration(String),

    /// A day record violates a field invariant (e.g. negative precipitation)
    #[error("Invalid weather record for {date}: {reason}")]
    InvalidRecord { date: NaiveDate, reason: String },

    /// Date picker or view parameter that cannot be applied
    #[error("Invalid view input: {0}")]
    InvalidViewInput(String),

    /// ACIS StnData response that cannot be read
    #[error("Failed to parse ACIS response: {0}")]
    AcisParse(String),
}

/// Type alias for Results using QuiltError
pub type Result<T> = std::result::Result<T, QuiltError>;
