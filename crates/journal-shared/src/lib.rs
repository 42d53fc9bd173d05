//! # Journal Shared
//!
//! Wire types shared by the server and its clients: query strings,
//! JSON envelopes and problem responses.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
