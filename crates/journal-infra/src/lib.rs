//! # Journal Infrastructure
//!
//! Concrete implementations of the ports defined in `journal-core`:
//! the SeaORM post repository, an in-memory repository, and the local
//! filesystem image store.

pub mod database;
pub mod images;

pub use database::{DatabaseConfig, InMemoryPostRepository, SeaOrmPostRepository};
pub use images::LocalImageStore;
