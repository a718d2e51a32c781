//! Listing service - ordered, paginated post feeds.

use std::sync::Arc;

use crate::domain::{Group, Post, User};
use crate::error::DomainError;
use crate::ports::{GroupRepository, PostRepository, PostScope, UserRepository};

use super::pagination::{PageRequest, Pager};

/// One served page of a feed, with pagination metadata.
#[derive(Debug, Clone)]
pub struct Feed {
    pub posts: Vec<Post>,
    pub number: u64,
    pub total_pages: u64,
}

impl Feed {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Read-only service behind the index, group, profile, and detail views.
pub struct ListingService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListingService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
        }
    }

    /// Every post, newest first.
    pub async fn all(&self, page: PageRequest) -> Result<Feed, DomainError> {
        self.page_of(PostScope::All, page).await
    }

    /// A group's posts, newest first, plus the group itself for display.
    pub async fn by_group(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<(Group, Feed), DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let feed = self.page_of(PostScope::Group(group.id), page).await?;
        Ok((group, feed))
    }

    /// A user's posts, newest first, plus the author record for display.
    pub async fn by_author(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<(User, Feed), DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let feed = self.page_of(PostScope::Author(author.id), page).await?;
        Ok((author, feed))
    }

    /// Single-post lookup for the detail view.
    pub async fn detail(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id.to_string()))
    }

    async fn page_of(&self, scope: PostScope, requested: PageRequest) -> Result<Feed, DomainError> {
        let total = self.posts.count(scope).await?;
        let pager = Pager::new(total);
        let number = pager.resolve(requested);

        let posts = self
            .posts
            .list(scope, pager.offset(number), pager.limit())
            .await?;

        Ok(Feed {
            posts,
            number,
            total_pages: pager.total_pages(),
        })
    }
}
