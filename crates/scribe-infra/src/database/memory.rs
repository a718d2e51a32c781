//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured and by the HTTP
//! tests, which exercise every route against this store. Data is lost on
//! process restart. All three repositories share one `InMemoryStore` so
//! the post repository can hydrate authors and groups.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Author, Group, NewPost, Post, PostChanges, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{GroupRepository, PostRepository, PostScope, UserRepository};

#[derive(Debug, Clone)]
struct PostRow {
    id: i64,
    author_id: Uuid,
    group_id: Option<Uuid>,
    text: String,
    created_at: DateTime<Utc>,
}

/// Shared backing store for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    groups: RwLock<HashMap<Uuid, Group>>,
    posts: RwLock<Vec<PostRow>>,
    next_post_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    async fn hydrate(&self, row: &PostRow) -> Result<Post, RepoError> {
        let users = self.users.read().await;
        let author = users
            .get(&row.author_id)
            .ok_or_else(|| RepoError::Query(format!("post {} has no author row", row.id)))?;

        let group = match row.group_id {
            Some(group_id) => self.groups.read().await.get(&group_id).cloned(),
            None => None,
        };

        Ok(Post {
            id: row.id,
            author: Author {
                id: author.id,
                username: author.username.clone(),
            },
            group,
            text: row.text.clone(),
            created_at: row.created_at,
        })
    }
}

fn in_scope(row: &PostRow, scope: PostScope) -> bool {
    match scope {
        PostScope::All => true,
        PostScope::Group(id) => row.group_id == Some(id),
        PostScope::Author(id) => row.author_id == id,
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        match posts.iter().find(|row| row.id == id) {
            Some(row) => {
                let row = row.clone();
                drop(posts);
                self.store.hydrate(&row).await.map(Some)
            }
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        scope: PostScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let mut rows: Vec<PostRow> = {
            let posts = self.store.posts.read().await;
            posts
                .iter()
                .filter(|row| in_scope(row, scope))
                .cloned()
                .collect()
        };

        // Newest first, id as tie-break, matching the SQL ordering.
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let page = rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect::<Vec<_>>();

        let mut out = Vec::with_capacity(page.len());
        for row in &page {
            out.push(self.store.hydrate(row).await?);
        }
        Ok(out)
    }

    async fn count(&self, scope: PostScope) -> Result<u64, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(posts.iter().filter(|row| in_scope(row, scope)).count() as u64)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let row = PostRow {
            id: self.store.next_post_id.fetch_add(1, Ordering::SeqCst) + 1,
            author_id: new_post.author_id,
            group_id: new_post.group_id,
            text: new_post.text,
            created_at: Utc::now(),
        };

        self.store.posts.write().await.push(row.clone());
        self.store.hydrate(&row).await
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
        let updated = {
            let mut posts = self.store.posts.write().await;
            let row = posts
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(RepoError::NotFound)?;
            row.text = changes.text;
            row.group_id = changes.group_id;
            row.clone()
        };

        self.store.hydrate(&updated).await
    }
}

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.store.groups.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let mut all: Vec<Group> = self.store.groups.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn insert(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.values().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint(
                "Group slug already exists".to_string(),
            ));
        }
        groups.insert(group.id, group.clone());
        Ok(group)
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepoError::Constraint(
                "Username or email already taken".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(store: &Arc<InMemoryStore>, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
        );
        InMemoryUserRepository::new(store.clone())
            .insert(user.clone())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_posts_are_listed_newest_first() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "auth").await;
        let posts = InMemoryPostRepository::new(store.clone());

        for text in ["A", "B", "C"] {
            posts
                .create(NewPost {
                    author_id: user.id,
                    text: text.to_string(),
                    group_id: None,
                })
                .await
                .unwrap();
        }

        let listed = posts.list(PostScope::All, 0, 10).await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "auth").await;
        let posts = InMemoryPostRepository::new(store.clone());

        let first = posts
            .create(NewPost {
                author_id: user.id,
                text: "first".into(),
                group_id: None,
            })
            .await
            .unwrap();
        let second = posts
            .create(NewPost {
                author_id: user.id,
                text: "second".into(),
                group_id: None,
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_group_scope_excludes_other_groups() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "auth").await;
        let groups = InMemoryGroupRepository::new(store.clone());
        let posts = InMemoryPostRepository::new(store.clone());

        let x = groups
            .insert(Group::new("X".into(), "x".into(), String::new()))
            .await
            .unwrap();
        let y = groups
            .insert(Group::new("Y".into(), "y".into(), String::new()))
            .await
            .unwrap();

        posts
            .create(NewPost {
                author_id: user.id,
                text: "in x".into(),
                group_id: Some(x.id),
            })
            .await
            .unwrap();

        assert_eq!(posts.count(PostScope::Group(x.id)).await.unwrap(), 1);
        assert_eq!(posts.count(PostScope::Group(y.id)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_author_and_created_at() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "auth").await;
        let posts = InMemoryPostRepository::new(store.clone());

        let created = posts
            .create(NewPost {
                author_id: user.id,
                text: "before".into(),
                group_id: None,
            })
            .await
            .unwrap();

        let updated = posts
            .update(
                created.id,
                PostChanges {
                    text: "after".into(),
                    group_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "after");
        assert_eq!(updated.author.id, user.id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_error() {
        let store = InMemoryStore::new();
        seed_user(&store, "auth").await;

        let users = InMemoryUserRepository::new(store.clone());
        let dup = User::new("auth".into(), "other@example.com".into(), "hash".into());
        assert!(matches!(
            users.insert(dup).await,
            Err(RepoError::Constraint(_))
        ));
    }
}
