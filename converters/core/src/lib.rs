//! Core types and traits shared by topic query converters.
//!
//! This crate holds everything a converter needs besides markup:
//!
//! - [`Settings`] - site configuration, built with [`Settings::builder()`]
//! - [`Authorizer`] - decides who may use query blocks
//! - [`SearchEngine`] and [`ListingEngine`] - the engines query blocks run against
//! - [`QueryRequest`] - typed requests built from a container's `data-*` attributes
//! - [`CustomFieldStore`] - per-post flags, including [`HAS_TOPIC_QUERY`]
//! - [`sweep`] and [`Schedule`] - periodic re-rendering of flagged posts
//! - [`Visitor`](visitor::Visitor) - visitor pattern for walking a parsed post
//!
//! # Example
//!
//! ```
//! use topic_query_converters_core::{QueryRequest, Settings};
//!
//! let settings = Settings::builder().enabled(true).build();
//! let request = QueryRequest::from_attributes(
//!     |name| match name {
//!         "tags" => Some("foo,bar"),
//!         "order" => Some("created"),
//!         _ => None,
//!     },
//!     &settings,
//! );
//! match request {
//!     Some(QueryRequest::Listing(listing)) => assert_eq!(listing.tags, ["foo", "bar"]),
//!     other => panic!("expected a listing, got {other:?}"),
//! }
//! ```

mod authorization;
mod engine;
pub mod error;
pub mod model;
mod rebake;
mod request;
mod settings;
mod store;
pub mod visitor;

pub use authorization::{Authorizer, GroupDirectory};
pub use engine::{ListingEngine, SearchEngine, SearchHit, SearchResults};
pub use error::{EngineError, LookupError, RebakeError, StoreError};
pub use model::{
    Archetype, Category, CategoryId, GroupId, Post, PostId, Topic, TopicId, TopicStatus, TopicTag,
    User, UserId,
};
pub use rebake::{Rebaker, Schedule, SweepReport, sweep};
pub use request::{ListingRequest, QueryRequest, SearchRequest};
pub use settings::{Settings, SettingsBuilder};
pub use store::{CustomFieldStore, HAS_TOPIC_QUERY};
