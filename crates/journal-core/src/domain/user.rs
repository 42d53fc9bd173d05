use serde::{Deserialize, Serialize};

/// Name recorded for entries submitted without one.
pub const ANONYMOUS: &str = "Anonymous";

/// User entity - an author, identified by a unique name.
///
/// Users are created on their first post and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
}
