//! Payroll Calculation Engine for Mauritanian labor law.
//!
//! This crate turns a period's compensation line items and a rate configuration
//! (contribution ceilings and rates, income tax brackets, abatement) into a fully
//! itemized pay result: gross, social contributions, tax tranches and net salary.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pay_run;
