use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: i64,
    pub total_minor: i64,
    pub currency_code: String,
    pub store_label: String,
}

/// Order persistence lives outside this crate; the checkout flow only needs
/// to look orders up.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    async fn find(&self, order_id: i64) -> Result<Option<Order>>;
}
