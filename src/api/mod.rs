//! HTTP API module for the Payroll Calculation Engine.
//!
//! This module provides the REST endpoints for single calculations and
//! batch pay runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
