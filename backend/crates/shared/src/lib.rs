//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the signup backend vocabulary:
//! - Common error types and result aliases
//! - Typed identifiers
//!
//! Only things whose meaning is the same in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
