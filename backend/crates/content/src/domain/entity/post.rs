//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::entity::tag::Tag;
use crate::domain::value_object::slug::Slug;

/// Post entity
#[derive(Debug, Clone)]
pub struct Post {
    /// Internal ID (UUID v4)
    pub post_id: PostId,
    /// Author (owns the post; only the author or an admin may edit)
    pub author_id: UserId,
    /// URL identifier, unique across all posts
    pub slug: Slug,
    pub title: String,
    pub body: String,
    /// Unpublished posts are invisible to the public reader site
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        author_id: UserId,
        slug: Slug,
        title: String,
        body: String,
        published: bool,
    ) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            author_id,
            slug,
            title,
            body,
            published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit, bumping the update timestamp
    pub fn apply_edit(&mut self, slug: Slug, title: String, body: String, published: bool) {
        self.slug = slug;
        self.title = title;
        self.body = body;
        self.published = published;
        self.updated_at = Utc::now();
    }

    /// Whether `user_id` may modify this post without being admin
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}

/// A post joined with everything a response needs
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    /// Author's display name
    pub author_name: String,
    pub tags: Vec<Tag>,
}
