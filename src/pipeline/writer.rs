//! Persistence of validated orders.

use crate::model::Order;
use crate::store::{Item, OrderStore, StoreError};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Source of the `createdAt` stamp.
pub type Clock = fn() -> DateTime<Utc>;

/// Writes one validated order as one item.
///
/// Every write is an unconditional upsert keyed by `orderId`. There is no
/// existence check and no retry.
pub struct PersistenceWriter<S: OrderStore> {
    store: S,
    table: String,
    clock: Clock,
}

impl<S: OrderStore> PersistenceWriter<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock used for `createdAt`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Builds the item for `order`, stamped with the current time.
    pub fn item_for(&self, order: &Order) -> Item {
        order.to_item((self.clock)())
    }

    /// Persists `order`. Exactly one store write is issued.
    #[instrument(name = "persist", skip_all, fields(order_id = %order.order_id))]
    pub async fn write(&self, order: &Order) -> Result<(), StoreError> {
        let item = self.item_for(order);
        debug!(table = %self.table, ?item, "Writing item");
        self.store.put_item(&self.table, item).await?;
        info!(order_id = %order.order_id, "Order saved successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;
    use crate::store::mock::MockStore;
    use chrono::TimeZone;
    use serde_json::Number;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn order(id: &str) -> Order {
        Order {
            order_id: OrderId::from(id),
            user_id: "u1".into(),
            item_name: "Widget".into(),
            quantity: Number::from(0),
            status: "NEW".into(),
            timestamp: "t".into(),
        }
    }

    #[tokio::test]
    async fn test_write_issues_one_put_with_created_at() {
        let mut mock = MockStore::new();
        mock.expect_put("o1").return_ok();

        let writer = PersistenceWriter::new(mock.clone(), "Orders").with_clock(fixed_clock);
        writer.write(&order("o1")).await.unwrap();

        mock.verify();
        let writes = mock.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].table, "Orders");
        assert_eq!(writes[0].item.get_s("createdAt"), Some("2024-01-02T03:04:05.000Z"));
    }

    #[tokio::test]
    async fn test_write_surfaces_store_errors() {
        let mut mock = MockStore::new();
        mock.expect_put("o1")
            .return_err(StoreError::Rejected("conditional check failed".into()));

        let writer = PersistenceWriter::new(mock.clone(), "Orders");
        let err = writer.write(&order("o1")).await.unwrap_err();

        assert!(matches!(err, StoreError::Rejected(_)));
        mock.verify();
    }
}
