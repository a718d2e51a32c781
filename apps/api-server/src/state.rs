//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{GroupRepository, PostRepository, UserRepository};
use scribe_core::services::{ListingService, PostService};
use scribe_infra::DatabaseConfig;
use scribe_infra::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listing: Arc<ListingService>,
    pub mutation: Arc<PostService>,
    pub groups: Arc<dyn GroupRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = match db_config {
            Some(config) => match scribe_infra::connect(config).await {
                Ok(conn) => Self::from_repos(
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresGroupRepository::new(conn.clone())),
                    Arc::new(PostgresUserRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by the in-memory store. Also used by the HTTP tests.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self::from_repos(
            Arc::new(InMemoryPostRepository::new(store.clone())),
            Arc::new(InMemoryGroupRepository::new(store.clone())),
            Arc::new(InMemoryUserRepository::new(store)),
        )
    }

    fn from_repos(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            listing: Arc::new(ListingService::new(
                posts.clone(),
                groups.clone(),
                users.clone(),
            )),
            mutation: Arc::new(PostService::new(posts, groups.clone())),
            groups,
            users,
        }
    }
}
