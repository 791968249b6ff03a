//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::Post, post::PostDetail, tag::Tag};
use crate::domain::repository::{CommentRepository, PostQuery, PostRepository, TagRepository};
use crate::domain::value_object::slug::Slug;
use crate::error::{ContentError, ContentResult};
use kernel::error::persistence::{PgErrorClassifier, map_persistence_error};
use kernel::id::{CommentId, PostId, TagId, UserId};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load tags for a batch of posts in one query
    async fn load_tags(&self, post_ids: &[Uuid]) -> ContentResult<HashMap<Uuid, Vec<Tag>>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, TagLinkRow>(
            r#"
            SELECT pt.post_id, t.tag_id, t.name, t.slug
            FROM post_tags pt
            JOIN tags t ON t.tag_id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_post.entry(row.post_id).or_default().push(Tag {
                tag_id: TagId::from_uuid(row.tag_id),
                name: row.name,
                slug: Slug::from_db(row.slug),
            });
        }

        Ok(by_post)
    }

    async fn into_details(&self, rows: Vec<PostRow>) -> ContentResult<Vec<PostDetail>> {
        let post_ids: Vec<Uuid> = rows.iter().map(|r| r.post_id).collect();
        let mut tags = self.load_tags(&post_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let tags = tags.remove(&row.post_id).unwrap_or_default();
                row.into_detail(tags)
            })
            .collect())
    }
}

const POST_COLUMNS: &str = r#"
    p.post_id,
    p.author_id,
    p.slug,
    p.title,
    p.body,
    p.published,
    p.created_at,
    p.updated_at,
    u.display_name AS author_name
"#;

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgContentRepository {
    async fn create_post(&self, post: &Post, tag_ids: &[TagId]) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                slug,
                title,
                body,
                published,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify(e, Some("slug")))?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post.post_id.as_uuid())
                .bind(tag_id.as_uuid())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_post(&self, post: &Post, tag_ids: &[TagId]) -> ContentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE posts SET
                slug = $2,
                title = $3,
                body = $4,
                published = $5,
                updated_at = $6
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.slug.as_str())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.published)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify(e, Some("slug")))?;

        // Replace the tag set wholesale
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post.post_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
                .bind(post.post_id.as_uuid())
                .bind(tag_id.as_uuid())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_post(&self, post_id: &PostId) -> ContentResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn find_post_by_id(&self, post_id: &PostId) -> ContentResult<Option<PostDetail>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE p.post_id = $1
            "#
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.into_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_post_by_slug(
        &self,
        slug: &str,
        published_only: bool,
    ) -> ContentResult<Option<PostDetail>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE p.slug = $1
              AND (NOT $2 OR p.published)
            "#
        ))
        .bind(slug)
        .bind(published_only)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.into_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn search_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostDetail>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE ($1 OR p.published)
              AND ($2::text IS NULL
                   OR p.title ILIKE '%' || $2 || '%'
                   OR p.body ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL
                   OR EXISTS (
                       SELECT 1
                       FROM post_tags pt
                       JOIN tags t ON t.tag_id = pt.tag_id
                       WHERE pt.post_id = p.post_id AND t.slug = $3
                   ))
            ORDER BY p.created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(query.include_unpublished)
        .bind(query.search.as_deref())
        .bind(query.tag.as_deref())
        .bind(i64::from(query.limit))
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await?;

        self.into_details(rows).await
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgContentRepository {
    async fn create_tag(&self, tag: &Tag) -> ContentResult<()> {
        sqlx::query("INSERT INTO tags (tag_id, name, slug) VALUES ($1, $2, $3)")
            .bind(tag.tag_id.as_uuid())
            .bind(&tag.name)
            .bind(tag.slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, Some("name")))?;

        Ok(())
    }

    async fn list_tags(&self) -> ContentResult<Vec<Tag>> {
        let rows =
            sqlx::query_as::<_, TagRow>("SELECT tag_id, name, slug FROM tags ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn find_tags_by_slugs(&self, slugs: &[String]) -> ContentResult<Vec<Tag>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT tag_id, name, slug FROM tags WHERE slug = ANY($1) ORDER BY name",
        )
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn delete_tag(&self, tag_id: &TagId) -> ContentResult<bool> {
        let deleted = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(tag_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgContentRepository {
    async fn create_comment(&self, comment: &Comment) -> ContentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_name,
                body,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(&comment.author_name)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT comment_id, post_id, author_name, body, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> ContentResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

/// Classify a write error at the data-access boundary; anything the mapper
/// does not recognize propagates as a plain database error.
fn classify(err: sqlx::Error, unique_field: Option<&str>) -> ContentError {
    match map_persistence_error(&PgErrorClassifier, &err, unique_field) {
        Some(app_err) => ContentError::App(app_err.with_source(err)),
        None => ContentError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    slug: String,
    title: String,
    body: String,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
}

impl PostRow {
    fn into_detail(self, tags: Vec<Tag>) -> PostDetail {
        PostDetail {
            post: Post {
                post_id: PostId::from_uuid(self.post_id),
                author_id: UserId::from_uuid(self.author_id),
                slug: Slug::from_db(self.slug),
                title: self.title,
                body: self.body,
                published: self.published,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_name: self.author_name,
            tags,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    tag_id: Uuid,
    name: String,
    slug: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            tag_id: TagId::from_uuid(self.tag_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagLinkRow {
    post_id: Uuid,
    tag_id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    author_name: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            author_name: self.author_name,
            body: self.body,
            created_at: self.created_at,
        }
    }
}
