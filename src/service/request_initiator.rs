use crate::config::GatewayConfig;
use crate::currency::normalize_amount;
use crate::domain::order::Order;
use crate::domain::payment::{RedirectInstruction, RedirectMethod, RequestOutcome};
use crate::error::PaymentError;
use crate::gateway::codes::result_code_message;
use crate::gateway::{GatewayClient, GatewayError, PaymentRequest, SUCCESS_RESULT};
use std::sync::Arc;

pub struct RequestInitiator {
    pub config: GatewayConfig,
    pub gateway: Arc<dyn GatewayClient>,
    pub gateway_base_url: String,
    pub public_base_url: String,
}

impl RequestInitiator {
    pub async fn create_request(&self, order: &Order) -> Result<RequestOutcome, PaymentError> {
        let merchant = self.config.merchant()?.to_string();
        let amount = normalize_amount(order.total_minor, &order.currency_code);

        let request = PaymentRequest {
            merchant,
            amount,
            description: order.store_label.clone(),
            callback_url: format!(
                "{}/checkout/{}/payment/return",
                self.public_base_url, order.order_id
            ),
        };

        let reply = self.gateway.request(&request).await?;
        if reply.result != SUCCESS_RESULT {
            tracing::info!(
                order_id = order.order_id,
                code = reply.result,
                "gateway rejected payment request"
            );
            return Ok(RequestOutcome::Rejected {
                code: reply.result,
                message: result_code_message(reply.result),
            });
        }

        let track_id = reply
            .track_id
            .ok_or_else(|| GatewayError::Response("result 100 without trackId".to_string()))?;

        Ok(RequestOutcome::Redirect(RedirectInstruction {
            url: format!("{}/start/{}", self.gateway_base_url, track_id),
            method: RedirectMethod::Post,
        }))
    }
}
