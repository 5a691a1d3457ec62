//! # Customer Database Crate
//!
//! The persistence connector for customer records.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic behind the
//!   [`CustomerStore`] trait. Handlers never see SQL.
//! - **Explicit lifecycle:** The pool is created once at startup by [`connect`],
//!   handed to [`DbRepository`], and closed on shutdown. There is no global handle.
//! - **Swappable:** [`InMemoryStore`] implements the same trait for tests and for
//!   running the server without PostgreSQL.
//!
//! ## Public API
//!
//! - `connect`: establishes the connection pool from the database settings.
//! - `run_migrations`: applies the embedded migrations.
//! - `CustomerStore`: the CRUD contract.
//! - `DbRepository` / `InMemoryStore`: the two implementations.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryStore;
pub use repository::DbRepository;
pub use store::CustomerStore;
