use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Group;

/// Post author as embedded in the read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// Post entity - a single user-authored text entry, optionally grouped.
///
/// This is the hydrated read model: listings and the detail view render
/// the author's username and the group label, so repositories return
/// posts with both relations already loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author: Author,
    pub group: Option<Group>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a post. The id and timestamp are assigned at insert;
/// the author comes from the acting identity, never from client data.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
}

/// The fields an edit may rewrite. Author and creation time are immutable.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<Uuid>,
}
