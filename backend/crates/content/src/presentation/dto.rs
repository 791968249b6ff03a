//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::PostDetail, tag::Tag};

// ============================================================================
// Posts
// ============================================================================

/// Query parameters for GET /api/posts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsParams {
    /// Substring match against title and body
    pub search: Option<String>,
    /// Tag slug filter
    pub tag: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Post response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub author_name: String,
    pub tags: Vec<TagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PostDetail> for PostResponse {
    fn from(detail: &PostDetail) -> Self {
        Self {
            id: *detail.post.post_id.as_uuid(),
            slug: detail.post.slug.to_string(),
            title: detail.post.title.clone(),
            body: detail.post.body.clone(),
            published: detail.post.published,
            author_name: detail.author_name.clone(),
            tags: detail.tags.iter().map(TagResponse::from).collect(),
            created_at: detail.post.created_at,
            updated_at: detail.post.updated_at,
        }
    }
}

/// Post listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub page: u32,
    pub limit: u32,
}

/// Create post request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    /// Derived from the title when omitted
    pub slug: Option<String>,
    pub body: String,
    #[serde(default)]
    pub published: bool,
    /// Tag slugs; every slug must name an existing tag
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update post request (full replacement, PUT semantics)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// Tags
// ============================================================================

/// Tag response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: *tag.tag_id.as_uuid(),
            name: tag.name.clone(),
            slug: tag.slug.to_string(),
        }
    }
}

/// Create tag request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
    /// Derived from the name when omitted
    pub slug: Option<String>,
}

// ============================================================================
// Comments
// ============================================================================

/// Comment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: *comment.comment_id.as_uuid(),
            author_name: comment.author_name.clone(),
            body: comment.body.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Create comment request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author_name: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::post::Post;
    use crate::domain::value_object::slug::Slug;
    use kernel::id::{PostId, UserId};

    fn sample_detail() -> PostDetail {
        PostDetail {
            post: Post::new(
                UserId::new(),
                Slug::new("first-post").unwrap(),
                "First post".to_string(),
                "Hello".to_string(),
                true,
            ),
            author_name: "Writer".to_string(),
            tags: vec![Tag::new(
                "Rust".to_string(),
                Slug::new("rust").unwrap(),
            )],
        }
    }

    #[test]
    fn test_post_response_casing() {
        let json = serde_json::to_string(&PostResponse::from(&sample_detail())).unwrap();
        assert!(json.contains("authorName"));
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
        assert!(!json.contains("author_name"));
    }

    #[test]
    fn test_post_response_carries_tags() {
        let response = PostResponse::from(&sample_detail());
        assert_eq!(response.tags.len(), 1);
        assert_eq!(response.tags[0].slug, "rust");
    }

    #[test]
    fn test_create_post_request_defaults() {
        let json = r#"{"title":"T","body":"B"}"#;
        let request: CreatePostRequest = serde_json::from_str(json).unwrap();
        assert!(!request.published);
        assert!(request.slug.is_none());
        assert!(request.tags.is_empty());
    }

    #[test]
    fn test_create_comment_request_casing() {
        let json = r#"{"authorName":"Reader","body":"Nice"}"#;
        let request: CreateCommentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.author_name, "Reader");
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListPostsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 0);
        assert_eq!(params.limit, 0);
        assert!(params.search.is_none());
    }
}
