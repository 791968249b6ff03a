//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use token::AccessClaims;
