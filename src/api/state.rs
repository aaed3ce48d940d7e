//! Application state for the Payroll Calculation Engine API.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{ConfigLoader, RateConfiguration};
use crate::error::EngineResult;

/// Shared application state.
///
/// The regime configuration is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns an owned snapshot of the rates effective on `date`, for handing
    /// to pay-run workers.
    pub fn rate_snapshot(&self, date: NaiveDate) -> EngineResult<Arc<RateConfiguration>> {
        self.config
            .rate_configuration(date)
            .map(|rates| Arc::new(rates.clone()))
    }
}
