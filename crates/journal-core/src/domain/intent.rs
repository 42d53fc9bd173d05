use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Which mutation a form submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    Update,
    Delete,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::Update => "update",
            Intent::Delete => "delete",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Intent::Create),
            "update" => Ok(Intent::Update),
            "delete" => Ok(Intent::Delete),
            other => Err(DomainError::Validation(format!("unknown intent '{other}'"))),
        }
    }
}
