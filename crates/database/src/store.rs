use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Customer, CustomerId, CustomerPatch, NewCustomer};

/// The CRUD contract over customer records.
///
/// Lookups that miss return `Ok(None)`; `Err` is reserved for the store itself
/// failing. Inputs are already validated by the caller.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All records, in creation order.
    async fn list(&self) -> Result<Vec<Customer>, DbError>;

    async fn find(&self, id: CustomerId) -> Result<Option<Customer>, DbError>;

    /// Inserts a record under a freshly generated identifier.
    async fn insert(&self, new: NewCustomer) -> Result<Customer, DbError>;

    /// Applies `patch` and returns the record as it is after the update.
    async fn update(&self, id: CustomerId, patch: CustomerPatch)
    -> Result<Option<Customer>, DbError>;

    /// Hard-deletes the record and returns its prior value.
    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, DbError>;
}
