//! Per-route presentation contexts.
//!
//! Rendering is out of scope; the contract with the presentation
//! collaborator is the shape of these context mappings, one per route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::domain::{Author, Group, Post, User};
use scribe_core::services::{Feed, FieldErrors, PostInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub username: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            username: author.username,
        }
    }
}

impl From<User> for AuthorView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i64,
    pub text: String,
    pub author: AuthorView,
    pub group: Option<GroupView>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text: post.text,
            author: post.author.into(),
            group: post.group.map(Into::into),
            created_at: post.created_at,
        }
    }
}

/// One page of a listing plus its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContext {
    pub number: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub items: Vec<PostView>,
}

impl From<Feed> for PageContext {
    fn from(feed: Feed) -> Self {
        Self {
            number: feed.number,
            total_pages: feed.total_pages,
            has_next: feed.has_next(),
            has_previous: feed.has_previous(),
            items: feed.posts.into_iter().map(Into::into).collect(),
        }
    }
}

/// `GET /` - the site-wide feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexContext {
    pub page: PageContext,
}

/// `GET /group/{slug}/` - a group's feed plus the group itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupContext {
    pub group: GroupView,
    pub page: PageContext,
}

/// `GET /profile/{username}/` - an author's feed plus the author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileContext {
    pub author: AuthorView,
    pub page: PageContext,
}

/// `GET /posts/{id}/` - the single-post detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailContext {
    pub post: PostView,
}

/// The submitted (or pre-filled) form values, echoed back as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormValues {
    pub text: String,
    pub group: String,
}

impl From<&PostInput> for FormValues {
    fn from(input: &PostInput) -> Self {
        Self {
            text: input.text.clone().unwrap_or_default(),
            group: input.group.clone().unwrap_or_default(),
        }
    }
}

/// Form state: the values to re-show and any field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormState {
    pub values: FormValues,
    #[serde(default)]
    pub errors: FieldErrors,
}

/// `GET|POST /create/` and `/posts/{id}/edit/` - the post form with the
/// available group choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormContext {
    pub form: FormState,
    pub groups: Vec<GroupView>,
    pub is_edit: bool,
}
