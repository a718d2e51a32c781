//! Post mutation service - create and author-gated edit.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::DomainError;
use crate::ports::{GroupRepository, PostRepository};

use super::form::{FieldErrors, PostForm, PostInput, Validated};

/// Outcome of a create attempt. Invalid input is data for the form,
/// not an error.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Post),
    Invalid(FieldErrors),
}

/// Outcome of an edit attempt. A non-author is refused before any
/// validation runs; the caller turns that into a redirect.
#[derive(Debug)]
pub enum EditOutcome {
    Updated(Post),
    NotAuthor,
    Invalid(FieldErrors),
}

/// Service behind the create and edit views.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    form: PostForm,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self {
            posts,
            form: PostForm::new(groups),
        }
    }

    /// Create a post authored by the acting identity.
    ///
    /// The author id comes from the caller's authenticated identity,
    /// never from the submitted data.
    pub async fn create(
        &self,
        author_id: Uuid,
        input: &PostInput,
    ) -> Result<CreateOutcome, DomainError> {
        let validated = match self.form.validate(input).await? {
            Validated::Valid(post) => post,
            Validated::Invalid(errors) => return Ok(CreateOutcome::Invalid(errors)),
        };

        let post = self
            .posts
            .create(NewPost {
                author_id,
                text: validated.text,
                group_id: validated.group_id,
            })
            .await?;

        Ok(CreateOutcome::Created(post))
    }

    /// Edit an existing post in place.
    ///
    /// Fails with `DomainError::NotFound` for an unknown id. The
    /// authorship check precedes validation: a non-author attempt
    /// performs no validation and no mutation. Author and creation time
    /// are never rewritten.
    pub async fn edit(
        &self,
        acting_user: Uuid,
        post_id: i64,
        input: &PostInput,
    ) -> Result<EditOutcome, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id.to_string()))?;

        if post.author.id != acting_user {
            return Ok(EditOutcome::NotAuthor);
        }

        let validated = match self.form.validate(input).await? {
            Validated::Valid(post) => post,
            Validated::Invalid(errors) => return Ok(EditOutcome::Invalid(errors)),
        };

        let updated = self
            .posts
            .update(
                post_id,
                PostChanges {
                    text: validated.text,
                    group_id: validated.group_id,
                },
            )
            .await?;

        Ok(EditOutcome::Updated(updated))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::domain::{Author, Group};
    use crate::error::RepoError;
    use crate::ports::PostScope;

    struct FakePosts {
        existing: Post,
        mutated: AtomicBool,
    }

    #[async_trait]
    impl PostRepository for FakePosts {
        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            Ok((self.existing.id == id).then(|| self.existing.clone()))
        }

        async fn list(
            &self,
            _scope: PostScope,
            _offset: u64,
            _limit: u64,
        ) -> Result<Vec<Post>, RepoError> {
            Ok(vec![self.existing.clone()])
        }

        async fn count(&self, _scope: PostScope) -> Result<u64, RepoError> {
            Ok(1)
        }

        async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
            self.mutated.store(true, Ordering::SeqCst);
            Ok(Post {
                id: self.existing.id + 1,
                author: Author {
                    id: post.author_id,
                    username: "created".into(),
                },
                group: None,
                text: post.text,
                created_at: Utc::now(),
            })
        }

        async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
            self.mutated.store(true, Ordering::SeqCst);
            let mut post = self.existing.clone();
            post.id = id;
            post.text = changes.text;
            Ok(post)
        }
    }

    struct NoGroups {
        queried: AtomicBool,
    }

    #[async_trait]
    impl GroupRepository for NoGroups {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Group>, RepoError> {
            self.queried.store(true, Ordering::SeqCst);
            Ok(None)
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Group>, RepoError> {
            Ok(None)
        }

        async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
            Ok(vec![])
        }

        async fn insert(&self, group: Group) -> Result<Group, RepoError> {
            Ok(group)
        }
    }

    fn service() -> (PostService, Arc<FakePosts>, Arc<NoGroups>, Uuid) {
        let author = Uuid::new_v4();
        let posts = Arc::new(FakePosts {
            existing: Post {
                id: 1,
                author: Author {
                    id: author,
                    username: "auth".into(),
                },
                group: None,
                text: "original".into(),
                created_at: Utc::now(),
            },
            mutated: AtomicBool::new(false),
        });
        let groups = Arc::new(NoGroups {
            queried: AtomicBool::new(false),
        });
        let service = PostService::new(posts.clone(), groups.clone());
        (service, posts, groups, author)
    }

    #[tokio::test]
    async fn test_create_attaches_acting_identity_as_author() {
        let (service, _, _, _) = service();
        let acting = Uuid::new_v4();
        let input = PostInput {
            text: Some("hello".into()),
            group: None,
        };

        match service.create(acting, &input).await.unwrap() {
            CreateOutcome::Created(post) => assert_eq!(post.author.id, acting),
            CreateOutcome::Invalid(errors) => panic!("unexpected errors: {errors:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_with_blank_text_inserts_nothing() {
        let (service, posts, _, _) = service();
        let input = PostInput {
            text: Some("   ".into()),
            group: None,
        };

        assert!(matches!(
            service.create(Uuid::new_v4(), &input).await.unwrap(),
            CreateOutcome::Invalid(_)
        ));
        assert!(!posts.mutated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_non_author_edit_is_refused_before_validation() {
        let (service, posts, groups, _) = service();
        // Invalid input on purpose: a group reference that would fail
        // validation if validation ever ran.
        let input = PostInput {
            text: Some("changed".into()),
            group: Some(Uuid::new_v4().to_string()),
        };

        let outcome = service.edit(Uuid::new_v4(), 1, &input).await.unwrap();
        assert!(matches!(outcome, EditOutcome::NotAuthor));
        assert!(!posts.mutated.load(Ordering::SeqCst));
        assert!(!groups.queried.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_author_edit_updates_text() {
        let (service, posts, _, author) = service();
        let input = PostInput {
            text: Some("changed".into()),
            group: None,
        };

        match service.edit(author, 1, &input).await.unwrap() {
            EditOutcome::Updated(post) => assert_eq!(post.text, "changed"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(posts.mutated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_edit_unknown_post_is_not_found() {
        let (service, _, _, author) = service();
        let input = PostInput::default();

        let err = service.edit(author, 99, &input).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
