//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};

/// Comment entity. Comments are anonymous-friendly: commenters leave a
/// name, no account required.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, author_name: String, body: String) -> Self {
        Self {
            comment_id: CommentId::new(),
            post_id,
            author_name,
            body,
            created_at: Utc::now(),
        }
    }
}
