use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named category that posts may belong to.
///
/// Groups are created administratively and immutable afterwards;
/// the slug is the URL key for the group feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }
}
