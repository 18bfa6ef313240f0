use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    Completed,
    Failed,
}

/// Append-only record of a finished gateway transaction. `remote_state`
/// holds the gateway trackId; at most one record may ever carry a given
/// trackId.
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub payment_id: Uuid,
    pub order_id: i64,
    pub state: PaymentState,
    pub amount_minor: i64,
    pub currency_code: String,
    pub test: bool,
    pub remote_id: String,
    pub remote_state: String,
    pub authorized_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectMethod {
    Post,
    Get,
}

#[derive(Debug, Clone)]
pub struct RedirectInstruction {
    pub url: String,
    pub method: RedirectMethod,
}

/// What the payer should be shown after a payment request.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    /// Gateway accepted the request; send the payer to its start page.
    Redirect(RedirectInstruction),
    /// Gateway rejected the request. Recoverable: the payer goes back to
    /// checkout review, not to an error page.
    Rejected { code: i64, message: &'static str },
}

/// Terminal states of the return callback. There is no retry within a
/// session.
#[derive(Debug, Clone)]
pub enum ReturnOutcome {
    VerifiedSuccess { record: PaymentRecord },
    VerifiedFailed { code: i64, message: &'static str },
    AmountMismatch { expected: i64, reported: Option<i64> },
    DuplicateRejected,
    UserCanceled { status: String, message: &'static str },
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
