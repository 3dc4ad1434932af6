use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use super::engine::DecisionEngine;
use super::outcome::{Decision, DecisionError, ErrorKind, LoanRequest};

/// Message returned for any failure outside the decision error taxonomy.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload!";

/// Wire shape of every decision response. Exactly one side is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub loan_amount: Option<u32>,
    pub loan_period: Option<u32>,
    pub error_message: Option<String>,
}

impl DecisionResponse {
    pub fn approved(decision: Decision) -> Self {
        Self {
            loan_amount: Some(decision.loan_amount),
            loan_period: Some(decision.loan_period),
            error_message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            loan_amount: None,
            loan_period: None,
            error_message: Some(message.into()),
        }
    }
}

/// Router exposing `POST /loan/decision`, open to cross-origin callers.
pub fn decision_router(engine: Arc<DecisionEngine>) -> Router {
    Router::new()
        .route("/loan/decision", post(decision_handler))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

pub(crate) async fn decision_handler(
    State(engine): State<Arc<DecisionEngine>>,
    payload: Result<Json<LoanRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable decision request");
            let body = DecisionResponse::rejected(INVALID_PAYLOAD_MESSAGE);
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match engine.decide_today(&request) {
        Ok(decision) => (StatusCode::OK, Json(DecisionResponse::approved(decision))).into_response(),
        Err(err) => rejection_response(&err),
    }
}

pub(crate) fn rejection_response(err: &DecisionError) -> Response {
    let (status, message) = match err.kind() {
        ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, err.to_string()),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        ErrorKind::Internal => {
            error!(error = %err, "loan decision failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED_ERROR_MESSAGE.to_string(),
            )
        }
    };

    (status, Json(DecisionResponse::rejected(message))).into_response()
}
