//! Shared helpers for the bundler module.

pub mod serde_ext;
