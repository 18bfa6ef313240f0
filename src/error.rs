use crate::gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("gateway configuration error: {0}")]
    Config(String),

    /// The gateway call itself failed. The transaction may or may not have
    /// completed server-side, so this must never be collapsed into a
    /// success or failure outcome.
    #[error("gateway call failed with ambiguous outcome: {0}")]
    Network(#[from] GatewayError),

    #[error("payment storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
