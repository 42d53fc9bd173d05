//! Image store implementations.

mod local;

pub use local::{DEFAULT_URL_PREFIX, LocalImageStore};
