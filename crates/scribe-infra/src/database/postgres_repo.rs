//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use scribe_core::domain::{Author, Group, NewPost, Post, PostChanges, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{GroupRepository, PostRepository, PostScope, UserRepository};

use super::entity::{group, post, user};

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Assemble a domain post from its row and the loaded relations.
fn hydrate(
    row: post::Model,
    author: Option<user::Model>,
    group: Option<group::Model>,
) -> Result<Post, RepoError> {
    let author =
        author.ok_or_else(|| RepoError::Query(format!("post {} has no author row", row.id)))?;

    Ok(Post {
        id: row.id,
        author: Author {
            id: author.id,
            username: author.username,
        },
        group: group.map(Into::into),
        text: row.text,
        created_at: row.created_at.into(),
    })
}

fn scoped(scope: PostScope) -> Select<post::Entity> {
    let select = post::Entity::find();
    match scope {
        PostScope::All => select,
        PostScope::Group(id) => select.filter(post::Column::GroupId.eq(id)),
        PostScope::Author(id) => select.filter(post::Column::AuthorId.eq(id)),
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn load_relations(&self, row: post::Model) -> Result<Post, RepoError> {
        let author = user::Entity::find_by_id(row.author_id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        let group = match row.group_id {
            Some(group_id) => group::Entity::find_by_id(group_id)
                .one(&self.db)
                .await
                .map_err(query_err)?,
            None => None,
        };

        hydrate(row, author, group)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let found = post::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        let Some((row, author)) = found else {
            return Ok(None);
        };

        let group = match row.group_id {
            Some(group_id) => group::Entity::find_by_id(group_id)
                .one(&self.db)
                .await
                .map_err(query_err)?,
            None => None,
        };

        hydrate(row, author, group).map(Some)
    }

    async fn list(
        &self,
        scope: PostScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        // Newest first, id as tie-break so the order is total. The author
        // comes from the join and groups are batch-loaded, so there are
        // no per-row lookups.
        let rows = scoped(scope)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let post_rows: Vec<post::Model> = rows.iter().map(|(row, _)| row.clone()).collect();
        let groups = post_rows
            .load_one(group::Entity, &self.db)
            .await
            .map_err(query_err)?;

        rows.into_iter()
            .zip(groups)
            .map(|((row, author), group)| hydrate(row, author, group))
            .collect()
    }

    async fn count(&self, scope: PostScope) -> Result<u64, RepoError> {
        scoped(scope).count(&self.db).await.map_err(query_err)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            author_id: Set(new_post.author_id),
            group_id: Set(new_post.group_id),
            text: Set(new_post.text),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let row = model.insert(&self.db).await.map_err(query_err)?;
        tracing::debug!(post_id = row.id, "Post created");

        self.load_relations(row).await
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
        let row = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = row.into_active_model();
        active.text = Set(changes.text);
        active.group_id = Set(changes.group_id);

        let row = active.update(&self.db).await.map_err(query_err)?;
        self.load_relations(row).await
    }
}

/// PostgreSQL group repository.
pub struct PostgresGroupRepository {
    db: DbConn,
}

impl PostgresGroupRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        let result = group::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        tracing::debug!(group_slug = %slug, "Finding group by slug");

        let result = group::Entity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let result = group::Entity::find()
            .order_by_asc(group::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_group: Group) -> Result<Group, RepoError> {
        let model: group::ActiveModel = new_group.into();
        let row = model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Group slug already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(row.into())
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_name = %username, "Finding user by username");

        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new_user: User) -> Result<User, RepoError> {
        let model: user::ActiveModel = new_user.into();
        let row = model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Username or email already taken".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(row.into())
    }
}
