//! Domain entities - the core business objects.

mod intent;
mod post;
mod user;

pub use intent::Intent;
pub use post::{Post, PostInput, PostWithUser};
pub use user::{ANONYMOUS, User};
