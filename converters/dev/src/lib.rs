//! Development and testing utilities for topic query converters.
//!
//! This crate provides in-memory stand-ins for everything a converter talks to:
//!
//! - [`forum`] - topics and posts, searchable and listable
//! - [`custom_fields`] - a custom-field store with injectable failures
//! - [`groups`] - a group directory
//! - [`output`] - Output normalization for test comparisons

pub mod custom_fields;
pub mod forum;
pub mod groups;
pub mod output;
