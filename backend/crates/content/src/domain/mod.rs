//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{comment::Comment, post::Post, post::PostDetail, tag::Tag};
pub use repository::{CommentRepository, PostQuery, PostRepository, TagRepository};
pub use value_object::slug::Slug;
