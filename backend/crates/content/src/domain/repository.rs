//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{comment::Comment, post::Post, post::PostDetail, tag::Tag};
use crate::error::ContentResult;
use kernel::id::{CommentId, PostId, TagId};

/// Default page size for post listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound a client can request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Post listing filters
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Substring match against title and body
    pub search: Option<String>,
    /// Only posts carrying this tag slug
    pub tag: Option<String>,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Set for CMS listings; the public reader only sees published posts
    pub include_unpublished: bool,
}

impl PostQuery {
    /// Clamp page/limit into sane bounds
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        self
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.limit)
    }
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a post and attach its tags
    async fn create_post(&self, post: &Post, tag_ids: &[TagId]) -> ContentResult<()>;

    /// Update a post, replacing its tag set
    async fn update_post(&self, post: &Post, tag_ids: &[TagId]) -> ContentResult<()>;

    /// Delete a post. Returns whether anything was deleted.
    async fn delete_post(&self, post_id: &PostId) -> ContentResult<bool>;

    /// Find a post by internal ID, regardless of publication state
    async fn find_post_by_id(&self, post_id: &PostId) -> ContentResult<Option<PostDetail>>;

    /// Find a post by slug
    async fn find_post_by_slug(
        &self,
        slug: &str,
        published_only: bool,
    ) -> ContentResult<Option<PostDetail>>;

    /// List posts matching the query, newest first
    async fn search_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostDetail>>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Create a tag
    async fn create_tag(&self, tag: &Tag) -> ContentResult<()>;

    /// List all tags, alphabetically
    async fn list_tags(&self) -> ContentResult<Vec<Tag>>;

    /// Resolve tag slugs to tags; unknown slugs are simply absent
    async fn find_tags_by_slugs(&self, slugs: &[String]) -> ContentResult<Vec<Tag>>;

    /// Delete a tag. Returns whether anything was deleted.
    async fn delete_tag(&self, tag_id: &TagId) -> ContentResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a comment
    async fn create_comment(&self, comment: &Comment) -> ContentResult<()>;

    /// List a post's comments, oldest first
    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<Comment>>;

    /// Delete a comment. Returns whether anything was deleted.
    async fn delete_comment(&self, comment_id: &CommentId) -> ContentResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_normalization() {
        let query = PostQuery::default().normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);

        let query = PostQuery {
            page: 0,
            limit: 10_000,
            ..Default::default()
        }
        .normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_query_offset() {
        let query = PostQuery {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        assert_eq!(query.offset(), 40);
    }
}
