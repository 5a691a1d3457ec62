pub mod customer;
pub mod dates;
pub mod error;
pub mod payload;

// Re-export the core types to provide a clean public API.
pub use customer::{Customer, CustomerId, CustomerPatch, NewCustomer};
pub use error::{CoreError, ValidationError};
pub use payload::CustomerPayload;
