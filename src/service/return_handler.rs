use crate::config::GatewayConfig;
use crate::currency::normalize_amount;
use crate::domain::order::Order;
use crate::domain::payment::{PaymentRecord, PaymentState, ReturnOutcome};
use crate::error::PaymentError;
use crate::gateway::codes::{result_code_message, status_code_message, UNKNOWN_CODE_MESSAGE};
use crate::gateway::{GatewayClient, VerifyRequest, PAID_PENDING_STATUS, SUCCESS_RESULT};
use crate::repo::payments_repo::{PaymentInsert, PaymentRepository};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

const INVALID_TRACK_ID_RESULT: i64 = 203;

/// One lock per trackId, so the existence check, the verify call, and the
/// record insert never interleave for the same transaction.
#[derive(Default)]
pub struct TrackIdLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TrackIdLocks {
    async fn acquire(&self, track_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(track_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    fn release(&self, track_id: &str) {
        self.locks
            .remove_if(track_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Query parameters from the gateway's return redirect. Attacker-controlled.
#[derive(Debug, Clone, Default)]
pub struct ReturnParams {
    pub track_id: Option<String>,
    pub status: Option<String>,
    pub success: Option<String>,
}

pub struct ReturnHandler {
    pub config: GatewayConfig,
    pub gateway: Arc<dyn GatewayClient>,
    pub payments: Arc<dyn PaymentRepository>,
    pub locks: TrackIdLocks,
}

impl ReturnHandler {
    pub async fn handle_return(
        &self,
        order: &Order,
        params: &ReturnParams,
        client_ip: Option<&str>,
    ) -> Result<ReturnOutcome, PaymentError> {
        let track_id = match params.track_id.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Ok(ReturnOutcome::VerifiedFailed {
                    code: INVALID_TRACK_ID_RESULT,
                    message: result_code_message(INVALID_TRACK_ID_RESULT),
                })
            }
        };

        let guard = self.locks.acquire(track_id).await;
        let outcome = self.guarded_return(order, track_id, params, client_ip).await;
        drop(guard);
        self.locks.release(track_id);
        outcome
    }

    async fn guarded_return(
        &self,
        order: &Order,
        track_id: &str,
        params: &ReturnParams,
        client_ip: Option<&str>,
    ) -> Result<ReturnOutcome, PaymentError> {
        if self.payments.remote_state_exists(track_id).await? {
            tracing::error!(
                order_id = order.order_id,
                track_id,
                client_ip = client_ip.unwrap_or("unknown"),
                "double spending attempt rejected"
            );
            return Ok(ReturnOutcome::DuplicateRejected);
        }

        let status = params.status.clone().unwrap_or_default();
        if status != PAID_PENDING_STATUS {
            let message = match status.parse::<i64>() {
                Ok(code) => status_code_message(code),
                Err(_) => UNKNOWN_CODE_MESSAGE,
            };
            return Ok(ReturnOutcome::UserCanceled { status, message });
        }

        let expected = normalize_amount(order.total_minor, &order.currency_code);
        let request = VerifyRequest {
            merchant: self.config.merchant()?.to_string(),
            track_id: track_id.to_string(),
        };
        let reply = self.gateway.verify(&request).await?;

        if reply.result != SUCCESS_RESULT {
            return Ok(ReturnOutcome::VerifiedFailed {
                code: reply.result,
                message: result_code_message(reply.result),
            });
        }

        // An accepted verify with the wrong amount is still a failure.
        if reply.amount != Some(expected) {
            tracing::error!(
                order_id = order.order_id,
                track_id,
                expected,
                reported = ?reply.amount,
                "verified amount does not match order total"
            );
            return Ok(ReturnOutcome::AmountMismatch {
                expected,
                reported: reply.amount,
            });
        }

        let record = PaymentRecord {
            payment_id: Uuid::new_v4(),
            order_id: order.order_id,
            state: PaymentState::Completed,
            amount_minor: order.total_minor,
            currency_code: order.currency_code.clone(),
            test: self.config.is_test(),
            remote_id: reply.ref_number.unwrap_or_default(),
            remote_state: track_id.to_string(),
            authorized_at: chrono::Utc::now(),
        };

        match self.payments.insert(&record).await? {
            PaymentInsert::Inserted => {
                tracing::info!(order_id = order.order_id, track_id, "payment verified and recorded");
                Ok(ReturnOutcome::VerifiedSuccess { record })
            }
            PaymentInsert::DuplicateRemoteState => Ok(ReturnOutcome::DuplicateRejected),
        }
    }
}
