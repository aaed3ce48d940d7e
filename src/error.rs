//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Nearly every variant is a configuration error: the calculation itself never
//! fails on unusual business values, it reports them as computed.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Calculation Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingConfigValue {
///     field: "fund_a.ceiling".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing configuration value: fund_a.ceiling");
/// assert!(error.is_configuration_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The income tax bracket table has gaps, overlaps or is otherwise malformed.
    #[error("Invalid tax bracket table: {message}")]
    InvalidBracketTable {
        /// A description of what is wrong with the table.
        message: String,
    },

    /// A required configuration value is absent.
    #[error("Missing configuration value: {field}")]
    MissingConfigValue {
        /// The dotted path of the missing field.
        field: String,
    },

    /// A configuration value is present but outside its legal range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfigValue {
        /// The dotted path of the invalid field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No rate configuration is effective on the requested date.
    #[error("No rate configuration effective on {date}")]
    RateConfigurationNotFound {
        /// The date for which a configuration was requested.
        date: NaiveDate,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors an operator has to fix in the configuration.
    ///
    /// These abort a whole pay run rather than a single employee.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, EngineError::CalculationError { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
