use serde::{Deserialize, Deserializer, Serialize};

pub mod codes;
pub mod http;
pub mod mock;

/// Result code the gateway uses for an accepted/confirmed call.
pub const SUCCESS_RESULT: i64 = 100;

/// Callback status meaning "paid, awaiting confirmation". Anything else is a
/// non-payment outcome and must not reach verify.
pub const PAID_PENDING_STATUS: &str = "2";

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub merchant: String,
    pub amount: i64,
    pub description: String,
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest {
    pub merchant: String,
    #[serde(rename = "trackId")]
    pub track_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestReply {
    pub result: i64,
    #[serde(rename = "trackId", default, deserialize_with = "opt_string_or_number")]
    pub track_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyReply {
    pub result: i64,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(rename = "refNumber", default, deserialize_with = "opt_string_or_number")]
    pub ref_number: Option<String>,
}

// The gateway encodes trackId and refNumber as bare JSON numbers in some
// responses and strings in others.
fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// The call itself failed; the gateway may or may not have completed the
/// transaction, so callers must not map this to success or failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected gateway response: {0}")]
    Response(String),
}

#[async_trait::async_trait]
pub trait GatewayClient: Send + Sync {
    async fn request(&self, request: &PaymentRequest) -> Result<RequestReply, GatewayError>;
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyReply, GatewayError>;
}
