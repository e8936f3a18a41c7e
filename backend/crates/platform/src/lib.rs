//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain meaning:
//! - Cryptographic utilities (SHA-256, Base64, random bytes)
//! - Password hashing (Argon2id)
//! - Opaque access tokens (generation and storage digest)
//! - Bearer `Authorization` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
