use axum::routing::{get, post};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use zibal_gateway::config::{AppConfig, GatewayConfig};
use zibal_gateway::gateway::http::HttpGatewayClient;
use zibal_gateway::repo::orders_repo::PgOrdersRepo;
use zibal_gateway::repo::payments_repo::PgPaymentsRepo;
use zibal_gateway::service::request_initiator::RequestInitiator;
use zibal_gateway::service::return_handler::{ReturnHandler, TrackIdLocks};
use zibal_gateway::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let gateway_config = GatewayConfig::from_app(&cfg)?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let gateway = Arc::new(HttpGatewayClient::new(cfg.gateway_base_url.clone()));
    let payments_repo = PgPaymentsRepo { pool: pool.clone() };
    let orders_repo = PgOrdersRepo { pool: pool.clone() };

    let initiator = RequestInitiator {
        config: gateway_config.clone(),
        gateway: gateway.clone(),
        gateway_base_url: cfg.gateway_base_url.clone(),
        public_base_url: cfg.public_base_url.clone(),
    };
    let return_handler = ReturnHandler {
        config: gateway_config,
        gateway,
        payments: Arc::new(payments_repo),
        locks: TrackIdLocks::default(),
    };

    let state = AppState {
        initiator: Arc::new(initiator),
        return_handler: Arc::new(return_handler),
        orders: Arc::new(orders_repo),
    };

    let app = Router::new()
        .route("/health", get(zibal_gateway::http::handlers::checkout::health))
        .route(
            "/checkout/:order_id/payment",
            post(zibal_gateway::http::handlers::checkout::start_payment),
        )
        .route(
            "/checkout/:order_id/payment/return",
            get(zibal_gateway::http::handlers::checkout::payment_return),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
