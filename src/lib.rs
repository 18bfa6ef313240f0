pub mod config;
pub mod currency;
pub mod error;
pub mod domain {
    pub mod order;
    pub mod payment;
}
pub mod gateway;
pub mod http {
    pub mod handlers {
        pub mod checkout;
    }
}
pub mod repo {
    pub mod memory;
    pub mod orders_repo;
    pub mod payments_repo;
}
pub mod service {
    pub mod request_initiator;
    pub mod return_handler;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub initiator: Arc<service::request_initiator::RequestInitiator>,
    pub return_handler: Arc<service::return_handler::ReturnHandler>,
    pub orders: Arc<dyn domain::order::OrderStore>,
}
