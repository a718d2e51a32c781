//! SeaORM entities for the users, groups, and posts tables.

pub mod group;
pub mod post;
pub mod user;
