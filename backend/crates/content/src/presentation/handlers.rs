//! HTTP Handlers
//!
//! Thin by design: validate, call the repository, map errors. Validation
//! always runs before any persistence call.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use auth::config::AuthConfig;
use auth::presentation::extract::{AuthState, AuthenticatedUser};

use crate::domain::entity::{comment::Comment, post::Post, tag::Tag};
use crate::domain::repository::{
    CommentRepository, PostQuery, PostRepository, TagRepository,
};
use crate::domain::value_object::slug::Slug;
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, CreateTagRequest, ListPostsParams,
    PostListResponse, PostResponse, TagResponse, UpdatePostRequest,
};
use kernel::id::{CommentId, TagId};

/// Maximum post title length in characters
const TITLE_MAX_LENGTH: usize = 200;

/// Maximum comment author name length
const COMMENT_AUTHOR_MAX_LENGTH: usize = 64;

/// Maximum comment body length
const COMMENT_BODY_MAX_LENGTH: usize = 4000;

/// Shared state for content handlers
#[derive(Clone)]
pub struct ContentAppState<R>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub auth_config: Arc<AuthConfig>,
}

impl<R> AuthState for ContentAppState<R>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }
}

// ============================================================================
// Posts (public reads)
// ============================================================================

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<ContentAppState<R>>,
    Query(params): Query<ListPostsParams>,
) -> ContentResult<Json<PostListResponse>>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let query = PostQuery {
        search: params.search,
        tag: params.tag,
        page: params.page,
        limit: params.limit,
        include_unpublished: false,
    }
    .normalized();

    let posts = state.repo.search_posts(&query).await?;

    Ok(Json(PostListResponse {
        posts: posts.iter().map(PostResponse::from).collect(),
        page: query.page,
        limit: query.limit,
    }))
}

/// GET /api/posts/{slug}
pub async fn get_post<R>(
    State(state): State<ContentAppState<R>>,
    Path(slug): Path<String>,
) -> ContentResult<Json<PostResponse>>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_post_by_slug(&slug, true)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    Ok(Json(PostResponse::from(&detail)))
}

// ============================================================================
// Posts (authenticated writes)
// ============================================================================

/// POST /api/posts
pub async fn create_post<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Json(req): Json<CreatePostRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let fields = validate_post_fields(&req.title, req.slug.as_deref(), &req.body)?;
    let tag_ids = resolve_tags(&*state.repo, &req.tags).await?;

    let post = Post::new(
        auth.user_id(),
        fields.slug,
        fields.title,
        fields.body,
        req.published,
    );
    state.repo.create_post(&post, &tag_ids).await?;

    tracing::info!(post_id = %post.post_id, slug = %post.slug, "Post created");

    let detail = state
        .repo
        .find_post_by_id(&post.post_id)
        .await?
        .ok_or_else(|| ContentError::Internal("Post vanished after insert".into()))?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&detail))))
}

/// PUT /api/posts/{slug}
///
/// Unpublished posts are editable too; the slug may change in the body.
pub async fn update_post<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Path(slug): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> ContentResult<Json<PostResponse>>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_post_by_slug(&slug, false)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    require_can_modify(&auth, &detail.post)?;

    let fields = validate_post_fields(&req.title, req.slug.as_deref(), &req.body)?;
    let tag_ids = resolve_tags(&*state.repo, &req.tags).await?;

    let mut post = detail.post;
    post.apply_edit(fields.slug, fields.title, fields.body, req.published);
    state.repo.update_post(&post, &tag_ids).await?;

    let detail = state
        .repo
        .find_post_by_id(&post.post_id)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    Ok(Json(PostResponse::from(&detail)))
}

/// DELETE /api/posts/{slug}
pub async fn delete_post<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Path(slug): Path<String>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_post_by_slug(&slug, false)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    require_can_modify(&auth, &detail.post)?;

    let post_id = detail.post.post_id;
    state.repo.delete_post(&post_id).await?;

    tracing::info!(post_id = %post_id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Tags
// ============================================================================

/// GET /api/tags
pub async fn list_tags<R>(
    State(state): State<ContentAppState<R>>,
) -> ContentResult<Json<Vec<TagResponse>>>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let tags = state.repo.list_tags().await?;
    Ok(Json(tags.iter().map(TagResponse::from).collect()))
}

/// POST /api/tags (admin)
pub async fn create_tag<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Json(req): Json<CreateTagRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    auth.require_admin().map_err(|_| ContentError::Forbidden)?;

    let name = req.name.trim().to_string();
    let mut issues = serde_json::Map::new();

    if name.is_empty() {
        issues.insert("name".into(), "must not be empty".into());
    }

    let slug = match &req.slug {
        Some(slug) => Slug::new(slug),
        None => Slug::from_text(&name),
    };
    let slug = match slug {
        Ok(slug) => Some(slug),
        Err(e) => {
            issues.insert("slug".into(), e.message().into());
            None
        }
    };

    if !issues.is_empty() {
        return Err(ContentError::Validation(serde_json::Value::Object(issues)));
    }

    let Some(slug) = slug else {
        return Err(ContentError::Internal("Validation invariant broken".into()));
    };

    let tag = Tag::new(name, slug);
    state.repo.create_tag(&tag).await?;

    tracing::info!(tag_id = %tag.tag_id, slug = %tag.slug, "Tag created");

    Ok((StatusCode::CREATED, Json(TagResponse::from(&tag))))
}

/// DELETE /api/tags/{id} (admin)
pub async fn delete_tag<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Path(id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    auth.require_admin().map_err(|_| ContentError::Forbidden)?;

    if !state.repo.delete_tag(&TagId::from_uuid(id)).await? {
        return Err(ContentError::TagNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/posts/{slug}/comments
pub async fn list_comments<R>(
    State(state): State<ContentAppState<R>>,
    Path(slug): Path<String>,
) -> ContentResult<Json<Vec<CommentResponse>>>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_post_by_slug(&slug, true)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    let comments = state.repo.list_comments(&detail.post.post_id).await?;
    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// POST /api/posts/{slug}/comments (public)
pub async fn create_comment<R>(
    State(state): State<ContentAppState<R>>,
    Path(slug): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let detail = state
        .repo
        .find_post_by_slug(&slug, true)
        .await?
        .ok_or(ContentError::PostNotFound)?;

    let author_name = req.author_name.trim().to_string();
    let body = req.body.trim().to_string();

    let mut issues = serde_json::Map::new();
    if author_name.is_empty() {
        issues.insert("authorName".into(), "must not be empty".into());
    } else if author_name.chars().count() > COMMENT_AUTHOR_MAX_LENGTH {
        issues.insert(
            "authorName".into(),
            format!("must be at most {COMMENT_AUTHOR_MAX_LENGTH} characters").into(),
        );
    }
    if body.is_empty() {
        issues.insert("body".into(), "must not be empty".into());
    } else if body.chars().count() > COMMENT_BODY_MAX_LENGTH {
        issues.insert(
            "body".into(),
            format!("must be at most {COMMENT_BODY_MAX_LENGTH} characters").into(),
        );
    }

    if !issues.is_empty() {
        return Err(ContentError::Validation(serde_json::Value::Object(issues)));
    }

    let comment = Comment::new(detail.post.post_id, author_name, body);
    state.repo.create_comment(&comment).await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// DELETE /api/comments/{id} (admin)
pub async fn delete_comment<R>(
    auth: AuthenticatedUser,
    State(state): State<ContentAppState<R>>,
    Path(id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + TagRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    auth.require_admin().map_err(|_| ContentError::Forbidden)?;

    if !state.repo.delete_comment(&CommentId::from_uuid(id)).await? {
        return Err(ContentError::CommentNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Debug)]
struct PostFields {
    title: String,
    slug: Slug,
    body: String,
}

/// Validate title/slug/body together; all issues are reported at once
fn validate_post_fields(
    title: &str,
    slug: Option<&str>,
    body: &str,
) -> ContentResult<PostFields> {
    let title = title.trim().to_string();
    let mut issues = serde_json::Map::new();

    if title.is_empty() {
        issues.insert("title".into(), "must not be empty".into());
    } else if title.chars().count() > TITLE_MAX_LENGTH {
        issues.insert(
            "title".into(),
            format!("must be at most {TITLE_MAX_LENGTH} characters").into(),
        );
    }

    if body.trim().is_empty() {
        issues.insert("body".into(), "must not be empty".into());
    }

    let slug = match slug {
        Some(explicit) => Slug::new(explicit),
        None => Slug::from_text(&title),
    };
    let slug = match slug {
        Ok(slug) => Some(slug),
        Err(e) => {
            issues.insert("slug".into(), e.message().into());
            None
        }
    };

    if !issues.is_empty() {
        return Err(ContentError::Validation(serde_json::Value::Object(issues)));
    }

    let Some(slug) = slug else {
        return Err(ContentError::Internal("Validation invariant broken".into()));
    };

    Ok(PostFields {
        title,
        slug,
        body: body.to_string(),
    })
}

/// Resolve tag slugs to IDs; unknown slugs are a validation error
async fn resolve_tags<R>(repo: &R, slugs: &[String]) -> ContentResult<Vec<TagId>>
where
    R: TagRepository + Sync,
{
    if slugs.is_empty() {
        return Ok(Vec::new());
    }

    let tags = repo.find_tags_by_slugs(slugs).await?;

    let missing: Vec<&str> = slugs
        .iter()
        .filter(|slug| !tags.iter().any(|t| t.slug.as_str() == slug.as_str()))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        return Err(ContentError::Validation(serde_json::json!({
            "tags": format!("unknown tags: {}", missing.join(", ")),
        })));
    }

    Ok(tags.into_iter().map(|t| t.tag_id).collect())
}

fn require_can_modify(auth: &AuthenticatedUser, post: &Post) -> ContentResult<()> {
    if auth.role().is_admin() || post.is_owned_by(&auth.user_id()) {
        Ok(())
    } else {
        Err(ContentError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_post_fields_derives_slug() {
        let fields = validate_post_fields("Hello, World!", None, "body").unwrap();
        assert_eq!(fields.slug.as_str(), "hello-world");
        assert_eq!(fields.title, "Hello, World!");
    }

    #[test]
    fn test_validate_post_fields_prefers_explicit_slug() {
        let fields = validate_post_fields("Hello, World!", Some("custom-slug"), "body").unwrap();
        assert_eq!(fields.slug.as_str(), "custom-slug");
    }

    #[test]
    fn test_validate_post_fields_collects_all_issues() {
        let err = validate_post_fields("", Some("Bad Slug"), "  ").unwrap_err();
        let ContentError::Validation(details) = err else {
            panic!("expected validation error");
        };

        let details = details.as_object().unwrap();
        assert!(details.contains_key("title"));
        assert!(details.contains_key("body"));
        assert!(details.contains_key("slug"));
    }

    #[test]
    fn test_validate_post_fields_title_length() {
        let long_title = "a".repeat(TITLE_MAX_LENGTH + 1);
        let err = validate_post_fields(&long_title, Some("ok-slug"), "body").unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }
}
