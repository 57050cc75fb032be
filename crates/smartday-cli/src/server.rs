//! HTTP transport for the planner.
//!
//! Endpoints:
//! - POST /plan   - Plan a day from a JSON `PlanRequest`
//! - GET  /health - Static status and version

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use smartday_core::{health, Config, DayScheduler, PlanRequest};
use tracing::{info, warn};

/// Application state shared across handlers.
pub struct AppState {
    scheduler: DayScheduler,
    default_start: NaiveTime,
    /// Source of the date stamped on each plan.
    today: fn() -> NaiveDate,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            scheduler: DayScheduler::with_config(config.planner.scheduler_config()),
            default_start: config.planner.default_start(),
            today: local_today,
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub field: String,
    pub code: String,
}

impl ErrorResponse {
    fn unprocessable(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// Decode a plan request, naming the offending field on schema errors.
///
/// Syntax errors and errors at the document root are reported against `body`.
fn decode_plan_request(body: &[u8]) -> Result<PlanRequest, ErrorResponse> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let decoded = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        let field = match e.inner().classify() {
            Category::Data if path != "." => path,
            _ => "body".to_string(),
        };
        ErrorResponse {
            error: e.inner().to_string(),
            field,
            code: "invalid_body".to_string(),
        }
    })?;
    de.end().map_err(|e| ErrorResponse {
        error: e.to_string(),
        field: "body".to_string(),
        code: "invalid_body".to_string(),
    })?;
    Ok(decoded)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", post(plan_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn serve(bind: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "smartday listening");
    axum::serve(listener, router(Arc::new(AppState::from_config(config)))).await?;
    Ok(())
}

/// POST /plan
pub async fn plan_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = match decode_plan_request(&body) {
        Ok(request) => request,
        Err(rejection) => {
            warn!(field = %rejection.field, error = %rejection.error, "malformed plan request");
            return rejection.unprocessable();
        }
    };

    let today = (state.today)();
    match state
        .scheduler
        .plan_request(&request, state.default_start, today)
    {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => {
            warn!(field = e.field(), error = %e, "rejected plan request");
            ErrorResponse {
                error: e.to_string(),
                field: e.field().to_string(),
                code: "validation_error".to_string(),
            }
            .unprocessable()
        }
    }
}

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    Json(health())
}
