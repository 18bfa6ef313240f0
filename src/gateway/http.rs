use crate::gateway::{
    GatewayClient, GatewayError, PaymentRequest, RequestReply, VerifyReply, VerifyRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct HttpGatewayClient {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl HttpGatewayClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    // Single JSON POST, no retries, transport-default timeout.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/v1/{}", self.base_url, path);
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Response(format!(
                "http {}: {}",
                status.as_u16(),
                text.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::Response(e.to_string()))
    }
}

#[async_trait::async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn request(&self, request: &PaymentRequest) -> Result<RequestReply, GatewayError> {
        self.post_json("request", request).await
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyReply, GatewayError> {
        self.post_json("verify", request).await
    }
}
