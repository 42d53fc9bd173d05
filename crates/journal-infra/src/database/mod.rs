//! Database connection management and repositories.

mod base;
mod connections;
mod memory;
pub mod entity;
pub mod post_repo;

pub use base::SeaOrmBaseRepository;
pub use connections::{DatabaseConfig, connect};
pub use memory::InMemoryPostRepository;
pub use post_repo::SeaOrmPostRepository;
