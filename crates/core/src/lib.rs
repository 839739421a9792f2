//! CampusReel domain model.
//!
//! This crate holds the passive data schema of the media-feed
//! application plus the one stateful container built on top of it:
//!
//! - [`media`] — media items, kinds, and the fixed category set.
//! - [`user`] — the user profile and preference bag.
//! - [`feed`] — [`FeedStore`], the process-wide feed state container,
//!   mutated exclusively through its declared actions.
//! - [`error`] — [`CoreError`], the shared error enum.
//! - [`types`] — small shared type aliases.
//!
//! No rendering, persistence, or transport lives here; external
//! ingestion is consumed through the [`FeedSource`] trait.

pub mod error;
pub mod feed;
pub mod media;
pub mod types;
pub mod user;

pub use error::CoreError;
pub use feed::{FeedSource, FeedStore};
pub use media::{Category, MediaItem, MediaKind, NewMediaItem};
pub use user::{User, UserPreferences};
