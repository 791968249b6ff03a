//! Value Object Module

pub mod display_name;
pub mod email;
pub mod public_id;
pub mod user_role;

pub use display_name::DisplayName;
pub use email::Email;
pub use public_id::PublicId;
pub use user_role::UserRole;
