//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides functionality to load payroll regime configurations
//! from YAML files: contribution ceilings and rates, the income tax bracket
//! table, the abatement, and payroll settings.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mauritania").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BenefitsInKindTaxation, ContributionRates, IncomeTaxConfig, PayrollSettings,
    RateConfiguration, RegimeMetadata, TaxBracket, validate_brackets,
};
