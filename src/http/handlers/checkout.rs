use crate::domain::payment::{
    ErrorEnvelope, ErrorPayload, RedirectMethod, RequestOutcome, ReturnOutcome,
};
use crate::error::PaymentError;
use crate::service::return_handler::ReturnParams;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct StartPaymentResponse {
    pub redirect_url: String,
    pub redirect_method: RedirectMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureBody>,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    #[serde(rename = "trackId")]
    pub track_id: Option<String>,
    pub status: Option<String>,
    pub success: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}

pub async fn start_payment(State(state): State<AppState>, Path(order_id): Path<i64>) -> Response {
    let order = match state.orders.find(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => return order_not_found(order_id),
        Err(e) => return internal(&e.to_string()),
    };

    match state.initiator.create_request(&order).await {
        Ok(RequestOutcome::Redirect(redirect)) => (
            axum::http::StatusCode::OK,
            Json(StartPaymentResponse {
                redirect_url: redirect.url,
                redirect_method: redirect.method,
                failure: None,
            }),
        )
            .into_response(),
        // Recoverable: the payer goes back to checkout review with the
        // gateway's message, not to an error page.
        Ok(RequestOutcome::Rejected { code, message }) => (
            axum::http::StatusCode::OK,
            Json(StartPaymentResponse {
                redirect_url: review_url(order_id),
                redirect_method: RedirectMethod::Get,
                failure: Some(FailureBody {
                    code,
                    message: message.to_string(),
                }),
            }),
        )
            .into_response(),
        Err(e) => payment_error(order_id, e),
    }
}

pub async fn payment_return(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Query(query): Query<ReturnQuery>,
    headers: HeaderMap,
) -> Response {
    let order = match state.orders.find(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => return order_not_found(order_id),
        Err(e) => return internal(&e.to_string()),
    };

    let client_ip = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let params = ReturnParams {
        track_id: query.track_id,
        status: query.status,
        success: query.success,
    };

    match state
        .return_handler
        .handle_return(&order, &params, client_ip.as_deref())
        .await
    {
        Ok(ReturnOutcome::VerifiedSuccess { .. }) => {
            Redirect::to(&format!("/checkout/{order_id}/complete")).into_response()
        }
        Ok(ReturnOutcome::DuplicateRejected) => back_to_review(order_id, "duplicate"),
        Ok(ReturnOutcome::UserCanceled { .. }) => back_to_review(order_id, "canceled"),
        Ok(ReturnOutcome::AmountMismatch { .. }) => back_to_review(order_id, "amount_mismatch"),
        Ok(ReturnOutcome::VerifiedFailed { code, .. }) => {
            Redirect::to(&format!(
                "{}?payment_error=rejected&code={code}",
                review_url(order_id)
            ))
            .into_response()
        }
        Err(PaymentError::Network(e)) => {
            // Outcome unknown on the gateway side; never mapped to success
            // or failure.
            tracing::warn!(order_id, error = %e, "gateway call failed during return handling");
            back_to_review(order_id, "gateway_unavailable")
        }
        Err(e) => payment_error(order_id, e),
    }
}

fn review_url(order_id: i64) -> String {
    format!("/checkout/{order_id}/review")
}

fn back_to_review(order_id: i64, marker: &str) -> Response {
    Redirect::to(&format!("{}?payment_error={marker}", review_url(order_id))).into_response()
}

fn order_not_found(order_id: i64) -> Response {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(ErrorEnvelope {
            error: ErrorPayload {
                code: "ORDER_NOT_FOUND".to_string(),
                message: format!("order {order_id} does not exist"),
                details: None,
            },
        }),
    )
        .into_response()
}

fn internal(details: &str) -> Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope {
            error: ErrorPayload {
                code: "INTERNAL_ERROR".to_string(),
                message: "internal error".to_string(),
                details: Some(details.to_string()),
            },
        }),
    )
        .into_response()
}

fn payment_error(order_id: i64, e: PaymentError) -> Response {
    match e {
        PaymentError::Config(msg) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope {
                error: ErrorPayload {
                    code: "GATEWAY_CONFIG".to_string(),
                    message: msg,
                    details: None,
                },
            }),
        )
            .into_response(),
        PaymentError::Network(e) => {
            tracing::warn!(order_id, error = %e, "gateway call failed; outcome unknown");
            (
                axum::http::StatusCode::BAD_GATEWAY,
                Json(ErrorEnvelope {
                    error: ErrorPayload {
                        code: "GATEWAY_UNAVAILABLE".to_string(),
                        message: "gateway call failed; transaction outcome unknown".to_string(),
                        details: Some(e.to_string()),
                    },
                }),
            )
                .into_response()
        }
        PaymentError::Storage(e) => internal(&e.to_string()),
    }
}
