use crate::domain::payment::PaymentRecord;
use anyhow::Result;
use sqlx::PgPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentInsert {
    Inserted,
    /// A record already carries this remote_state; the caller lost the race.
    DuplicateRemoteState,
}

/// Payment persistence capability. Insert must be atomic with respect to the
/// remote_state uniqueness rule so that two racing writers cannot both
/// record the same trackId.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn remote_state_exists(&self, track_id: &str) -> Result<bool>;
    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsert>;
}

#[derive(Clone)]
pub struct PgPaymentsRepo {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl PaymentRepository for PgPaymentsRepo {
    async fn remote_state_exists(&self, track_id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM payments WHERE remote_state = $1 LIMIT 1")
            .bind(track_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsert> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, order_id, state, amount_minor, currency_code,
                test, remote_id, remote_state, authorized_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (remote_state) DO NOTHING
            "#,
        )
        .bind(record.payment_id)
        .bind(record.order_id)
        .bind(format!("{:?}", record.state).to_uppercase())
        .bind(record.amount_minor)
        .bind(record.currency_code.clone())
        .bind(record.test)
        .bind(record.remote_id.clone())
        .bind(record.remote_state.clone())
        .bind(record.authorized_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(PaymentInsert::DuplicateRemoteState)
        } else {
            Ok(PaymentInsert::Inserted)
        }
    }
}
