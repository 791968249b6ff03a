//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, base64url, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
