//! Domain entities - the core business objects.

mod group;
mod post;
mod user;

pub use group::Group;
pub use post::{Author, NewPost, Post, PostChanges};
pub use user::User;
