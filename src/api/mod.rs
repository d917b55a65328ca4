//! HTTP API module for the on-call report engine.
//!
//! Exposes report generation over HTTP: `POST /report` takes a billing
//! period and schedule coverage and returns the priced report, and
//! `GET /health` answers liveness probes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ReportPeriodRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
