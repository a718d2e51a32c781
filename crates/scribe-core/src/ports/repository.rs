use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, NewPost, Post, PostChanges, User};
use crate::error::RepoError;

/// Which posts a listing query selects. Slugs and usernames are resolved
/// to ids before they reach the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    All,
    Group(Uuid),
    Author(Uuid),
}

/// Post repository with typed query methods.
///
/// `list` returns hydrated posts (author and group eager-loaded), ordered
/// by creation time descending with id descending as tie-break so the
/// ordering is total and stable.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    async fn list(&self, scope: PostScope, offset: u64, limit: u64)
    -> Result<Vec<Post>, RepoError>;

    async fn count(&self, scope: PostScope) -> Result<u64, RepoError>;

    /// Insert a new post; the store assigns the id and creation time.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Rewrite the text and group of an existing post in place.
    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, for the form's group choices.
    async fn list_all(&self) -> Result<Vec<Group>, RepoError>;

    /// Administrative path - groups are seeded, not user-created.
    async fn insert(&self, group: Group) -> Result<Group, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn insert(&self, user: User) -> Result<User, RepoError>;
}
