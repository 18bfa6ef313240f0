use crate::gateway::{
    GatewayClient, GatewayError, PaymentRequest, RequestReply, VerifyReply, VerifyRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted stand-in for the real gateway. Records every call so tests can
/// assert on what was sent and how often.
pub struct MockGatewayClient {
    pub request_result: i64,
    pub track_id: Option<String>,
    pub verify_result: i64,
    pub verify_amount: Option<i64>,
    pub ref_number: Option<String>,
    pub fail_transport: bool,
    pub request_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub last_request: Mutex<Option<PaymentRequest>>,
    pub last_verify: Mutex<Option<VerifyRequest>>,
}

impl MockGatewayClient {
    fn base() -> Self {
        Self {
            request_result: 100,
            track_id: None,
            verify_result: 100,
            verify_amount: None,
            ref_number: None,
            fail_transport: false,
            request_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_verify: Mutex::new(None),
        }
    }

    pub fn succeeding(track_id: &str, amount: i64, ref_number: &str) -> Self {
        Self {
            track_id: Some(track_id.to_string()),
            verify_amount: Some(amount),
            ref_number: Some(ref_number.to_string()),
            ..Self::base()
        }
    }

    pub fn rejecting(code: i64) -> Self {
        Self {
            request_result: code,
            verify_result: code,
            ..Self::base()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_transport: true,
            ..Self::base()
        }
    }
}

#[async_trait::async_trait]
impl GatewayClient for MockGatewayClient {
    async fn request(&self, request: &PaymentRequest) -> Result<RequestReply, GatewayError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail_transport {
            return Err(GatewayError::Response("mock transport failure".to_string()));
        }
        Ok(RequestReply {
            result: self.request_result,
            track_id: self.track_id.clone(),
        })
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyReply, GatewayError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_verify.lock().unwrap() = Some(request.clone());
        if self.fail_transport {
            return Err(GatewayError::Response("mock transport failure".to_string()));
        }
        Ok(VerifyReply {
            result: self.verify_result,
            amount: self.verify_amount,
            ref_number: self.ref_number.clone(),
        })
    }
}
