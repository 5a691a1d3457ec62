use crate::error::DbError;
use crate::store::CustomerStore;
use async_trait::async_trait;
use core_types::{Customer, CustomerId, CustomerPatch, NewCustomer};
use tokio::sync::RwLock;

/// A process-local [`CustomerStore`] that keeps records in creation order.
///
/// Used by the test suites and by `memberdesk serve --in-memory`. Nothing is
/// persisted across restarts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<Customer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Customer>, DbError> {
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, id: CustomerId) -> Result<Option<Customer>, DbError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, DbError> {
        let customer = Customer::from_new(CustomerId::generate(), new);
        self.records.write().await.push(customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, DbError> {
        let mut records = self.records.write().await;
        let Some(customer) = records.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        customer.apply(patch);
        Ok(Some(customer.clone()))
    }

    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, DbError> {
        let mut records = self.records.write().await;
        let removed = records
            .iter()
            .position(|c| c.id == id)
            .map(|index| records.remove(index));
        Ok(removed)
    }
}
