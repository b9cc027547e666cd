//! Common library for the store backend
//!
//! This crate provides the persistence layer used by the store service:
//! PostgreSQL connectivity, the document store abstraction and its
//! backends, and the database error type.

pub mod database;
pub mod document;
pub mod error;

pub use document::{Document, DocumentStore, MemoryDocumentStore, PgDocumentStore};
pub use error::{DatabaseError, DatabaseResult};

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, ensure_schema, health_check, init_pool};
/// use common::{DocumentStore, PgDocumentStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     ensure_schema(&pool).await?;
///     println!("Database health check: {}", health_check(&pool).await?);
///
///     let store = PgDocumentStore::new(pool);
///     let items = store.find_all("items").await?;
///     println!("{} items", items.len());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
