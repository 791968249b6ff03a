//! Tag Entity

use kernel::id::TagId;

use crate::domain::value_object::slug::Slug;

/// Tag entity
#[derive(Debug, Clone)]
pub struct Tag {
    pub tag_id: TagId,
    /// Human-readable name, unique
    pub name: String,
    /// URL identifier, unique
    pub slug: Slug,
}

impl Tag {
    pub fn new(name: String, slug: Slug) -> Self {
        Self {
            tag_id: TagId::new(),
            name,
            slug,
        }
    }
}
