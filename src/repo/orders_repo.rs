use crate::domain::order::{Order, OrderStore};
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgOrdersRepo {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl OrderStore for PgOrdersRepo {
    async fn find(&self, order_id: i64) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT order_id, total_minor, currency_code, store_label FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Order {
            order_id: r.get("order_id"),
            total_minor: r.get("total_minor"),
            currency_code: r.get("currency_code"),
            store_label: r.get("store_label"),
        }))
    }
}
