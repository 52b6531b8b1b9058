//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for payroll calculation, payslip
//! rendering, employee lookup and attendance clock events.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockRequest, PayrollRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
