//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! regime configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RateConfiguration, RegimeMetadata};

/// Loads and provides access to a payroll regime configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate configuration, and answers which one is effective
/// on a given date.
///
/// # Directory Structure
///
/// ```text
/// config/mauritania/
/// ├── regime.yaml          # Regime metadata
/// └── rates/
///     └── 2024-01-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/mauritania").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let rates = loader.rate_configuration(date).unwrap();
/// println!("Fund-A ceiling: {:?}", rates.fund_a.ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: RegimeMetadata,
    /// Sorted oldest first.
    rates: Vec<RateConfiguration>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any rate configuration fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        Self::from_parts(metadata, rates)
    }

    /// Builds a loader from already-parsed parts, validating every configuration.
    pub fn from_parts(
        metadata: RegimeMetadata,
        mut rates: Vec<RateConfiguration>,
    ) -> EngineResult<Self> {
        for rate_config in &rates {
            rate_config.validate()?;
        }
        rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Ok(Self { metadata, rates })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfiguration>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfiguration>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns all rate configurations, oldest first.
    pub fn rates(&self) -> &[RateConfiguration] {
        &self.rates
    }

    /// Gets the rate configuration effective on a given date.
    ///
    /// The most recent configuration whose effective date is on or before
    /// `date` wins.
    pub fn rate_configuration(&self, date: NaiveDate) -> EngineResult<&RateConfiguration> {
        self.rates
            .iter()
            .rfind(|rc| rc.effective_date <= date)
            .ok_or(EngineError::RateConfigurationNotFound { date })
    }
}
