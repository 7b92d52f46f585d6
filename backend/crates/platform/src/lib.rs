//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, HMAC, Base64)
//! - Password hashing (Argon2id with a fixed parameter set)
//! - Session cookie descriptors and `Set-Cookie` rendering

pub mod cookie;
pub mod crypto;
pub mod password;
