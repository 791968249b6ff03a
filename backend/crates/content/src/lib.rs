//! Content Backend Module - posts, tags, comments
//!
//! The CRUD side of the platform. Handlers here are deliberately thin:
//! validate the payload, call the repository, let the error mapper
//! normalize failures. Anything resembling a decision lives in the
//! `auth` crate.
//!
//! Structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ContentError, ContentResult};
pub use infra::postgres::PgContentRepository;
pub use presentation::router::{comments_router, posts_router, tags_router};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
