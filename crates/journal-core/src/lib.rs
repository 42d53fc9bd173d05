//! # Journal Core
//!
//! The domain layer of the journal.
//! This crate contains the post/user model and the ports the infrastructure
//! implements. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
