//! The five post views: index, group feed, profile, detail, create/edit.

use actix_web::{HttpResponse, http::header, web};

use scribe_core::ports::GroupRepository;
use scribe_core::services::{CreateOutcome, EditOutcome, FieldErrors, PageRequest, PostInput};
use scribe_shared::context::{
    FormState, FormValues, GroupContext, IndexContext, PostDetailContext, PostFormContext,
    ProfileContext,
};
use scribe_shared::dto::{PageQuery, PostFormPayload};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn form_input(payload: &PostFormPayload) -> PostInput {
    PostInput {
        text: payload.text.clone(),
        group: payload.group.clone(),
    }
}

/// GET / - the site-wide feed, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::from_query(query.page.as_deref());
    let feed = state.listing.all(page).await?;

    Ok(HttpResponse::Ok().json(IndexContext { page: feed.into() }))
}

/// GET /group/{slug}/ - one group's feed plus the group for display.
pub async fn group_list(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::from_query(query.page.as_deref());
    let (group, feed) = state.listing.by_group(&slug, page).await?;

    Ok(HttpResponse::Ok().json(GroupContext {
        group: group.into(),
        page: feed.into(),
    }))
}

/// GET /profile/{username}/ - one author's feed plus the author.
pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::from_query(query.page.as_deref());
    let (author, feed) = state.listing.by_author(&username, page).await?;

    Ok(HttpResponse::Ok().json(ProfileContext {
        author: author.into(),
        page: feed.into(),
    }))
}

/// GET /posts/{id}/ - single-post detail.
pub async fn detail(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.listing.detail(*id).await?;

    Ok(HttpResponse::Ok().json(PostDetailContext { post: post.into() }))
}

/// Build the form context with the current group choices.
async fn form_context(
    state: &AppState,
    form: FormState,
    is_edit: bool,
) -> AppResult<PostFormContext> {
    let groups = state.groups.list_all().await?;
    Ok(PostFormContext {
        form,
        groups: groups.into_iter().map(Into::into).collect(),
        is_edit,
    })
}

/// GET /create/ - the empty post form. Requires authentication.
pub async fn create_form(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let ctx = form_context(&state, FormState::default(), false).await?;
    Ok(HttpResponse::Ok().json(ctx))
}

/// POST /create/ - validate and create, then redirect to the author's
/// profile. The author is always the acting identity, regardless of
/// anything in the submitted data.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Form<PostFormPayload>,
) -> AppResult<HttpResponse> {
    let input = form_input(&payload);

    match state.mutation.create(identity.user_id, &input).await? {
        CreateOutcome::Created(post) => {
            tracing::info!(post_id = post.id, author = %identity.username, "Post created");
            Ok(redirect_to(format!("/profile/{}/", identity.username)))
        }
        CreateOutcome::Invalid(errors) => invalid_form(&state, &input, errors, false).await,
    }
}

/// GET /posts/{id}/edit/ - the pre-filled form, for the author only.
/// Anyone else is silently sent to the detail view.
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.listing.detail(*id).await?;

    if post.author.id != identity.user_id {
        return Ok(redirect_to(format!("/posts/{}/", post.id)));
    }

    let values = FormValues {
        text: post.text,
        group: post
            .group
            .map(|g| g.id.to_string())
            .unwrap_or_default(),
    };
    let ctx = form_context(
        &state,
        FormState {
            values,
            errors: FieldErrors::default(),
        },
        true,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ctx))
}

/// POST /posts/{id}/edit/ - validate and update, then redirect to the
/// detail view. Non-authors are redirected without validation.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<i64>,
    payload: web::Form<PostFormPayload>,
) -> AppResult<HttpResponse> {
    let input = form_input(&payload);

    match state.mutation.edit(identity.user_id, *id, &input).await? {
        EditOutcome::Updated(post) => {
            tracing::info!(post_id = post.id, "Post updated");
            Ok(redirect_to(format!("/posts/{}/", post.id)))
        }
        EditOutcome::NotAuthor => Ok(redirect_to(format!("/posts/{}/", *id))),
        EditOutcome::Invalid(errors) => invalid_form(&state, &input, errors, true).await,
    }
}

/// Re-show the form with the submitted values and the field errors.
/// Deliberately 200, not a redirect and not an error status.
async fn invalid_form(
    state: &AppState,
    input: &PostInput,
    errors: FieldErrors,
    is_edit: bool,
) -> AppResult<HttpResponse> {
    let ctx = form_context(
        state,
        FormState {
            values: input.into(),
            errors,
        },
        is_edit,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ctx))
}
