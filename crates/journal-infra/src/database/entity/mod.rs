//! SeaORM entities backing the journal tables.

pub mod post;
pub mod user;
