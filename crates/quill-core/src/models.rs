//! Domain models for Quill.
//!
//! These are the core types shared across all crates.

pub mod post;
pub mod user;
