use crate::domain::order::{Order, OrderStore};
use crate::domain::payment::PaymentRecord;
use crate::repo::payments_repo::{PaymentInsert, PaymentRepository};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keyed by remote_state, which gives the same uniqueness the database
/// constraint provides.
#[derive(Clone, Default)]
pub struct InMemoryPayments {
    inner: Arc<Mutex<HashMap<String, PaymentRecord>>>,
}

impl InMemoryPayments {
    pub fn seed(&self, record: PaymentRecord) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(record.remote_state.clone(), record);
        }
    }

    pub fn records(&self) -> Vec<PaymentRecord> {
        self.inner
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PaymentRepository for InMemoryPayments {
    async fn remote_state_exists(&self, track_id: &str) -> Result<bool> {
        let map = self.inner.lock().map_err(|_| anyhow!("payments map poisoned"))?;
        Ok(map.contains_key(track_id))
    }

    async fn insert(&self, record: &PaymentRecord) -> Result<PaymentInsert> {
        let mut map = self.inner.lock().map_err(|_| anyhow!("payments map poisoned"))?;
        if map.contains_key(&record.remote_state) {
            return Ok(PaymentInsert::DuplicateRemoteState);
        }
        map.insert(record.remote_state.clone(), record.clone());
        Ok(PaymentInsert::Inserted)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOrders {
    inner: Arc<Mutex<HashMap<i64, Order>>>,
}

impl InMemoryOrders {
    pub fn seed(&self, order: Order) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(order.order_id, order);
        }
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrders {
    async fn find(&self, order_id: i64) -> Result<Option<Order>> {
        let map = self.inner.lock().map_err(|_| anyhow!("orders map poisoned"))?;
        Ok(map.get(&order_id).cloned())
    }
}
