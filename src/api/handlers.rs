//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::attendance_entry;
use crate::engine::PayrollEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEntry, PayrollSummary};
use crate::report::render_payslip_text;

use super::request::{ClockRequest, PayrollRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/payslip", post(payslip_handler))
        .route("/employees/:id", get(employee_handler))
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .with_state(state)
}

/// Handler for POST /payroll.
///
/// Returns the full payroll summary, audit trace included.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match summarize(&state, &request, correlation_id).await {
        Ok(summary) => json_response(StatusCode::OK, &summary),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payslip.
///
/// Same body as `/payroll`; answers with the rendered text payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match summarize(&state, &request, correlation_id).await {
        Ok(summary) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_payslip_text(&summary),
        )
            .into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:id.
async fn employee_handler(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Looking up employee");

    let employees = state.employees().read().await;
    match employees.get(id) {
        Some(employee) => json_response(StatusCode::OK, employee),
        None => error_response(correlation_id, EngineError::EmployeeNotFound { employee_id: id }),
    }
}

/// Handler for POST /attendance/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    clock(state, payload, ClockEvent::In).await
}

/// Handler for POST /attendance/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    clock(state, payload, ClockEvent::Out).await
}

#[derive(Debug, Clone, Copy)]
enum ClockEvent {
    In,
    Out,
}

async fn clock(
    state: AppState,
    payload: Result<Json<ClockRequest>, JsonRejection>,
    event: ClockEvent,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, event = ?event, "Processing clock request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match record_clock_event(&state, &request, event).await {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                date = %entry.record.date,
                status = entry.metrics.status.as_str(),
                "Clock event recorded"
            );
            json_response(StatusCode::OK, &entry)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

async fn record_clock_event(
    state: &AppState,
    request: &ClockRequest,
    event: ClockEvent,
) -> EngineResult<AttendanceEntry> {
    let now = Local::now().naive_local();
    let (date, time) = request.resolve(now.date(), now.time())?;

    if state.employees().read().await.get(request.employee_id).is_none() {
        return Err(EngineError::EmployeeNotFound {
            employee_id: request.employee_id,
        });
    }

    let mut attendance = state.attendance().write().await;
    let previous = attendance.get(request.employee_id, date).cloned();
    let record = match event {
        ClockEvent::In => attendance.clock_in(request.employee_id, date, time)?,
        ClockEvent::Out => attendance.clock_out(request.employee_id, date, time)?,
    };
    if let Some(path) = state.attendance_file() {
        // The in-memory store must not get ahead of the file.
        if let Err(err) = attendance.save_json(path) {
            attendance.restore(request.employee_id, date, previous);
            return Err(err);
        }
    }

    Ok(attendance_entry(record, state.config().schedule()))
}

/// Resolves the request range and runs the engine over the shared stores.
async fn summarize(
    state: &AppState,
    request: &PayrollRequest,
    correlation_id: Uuid,
) -> EngineResult<PayrollSummary> {
    let (start, end) = request.resolve_range(Local::now().date_naive());

    let employees = state.employees().read().await;
    let attendance = state.attendance().read().await;
    let engine = PayrollEngine::new(&*employees, &*attendance, state.config().config().clone())?;

    let started = Instant::now();
    let summary = engine.calculate_payroll(request.employee_id, start, end)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        start = %start,
        end = %end,
        net_pay = %summary.net_pay.round_dp(2),
        duration_us = started.elapsed().as_micros(),
        "Payroll calculated"
    );
    Ok(summary)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
