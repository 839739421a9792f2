//! Process-wide feed state container.
//!
//! [`FeedStore`] owns the media item collection, the current user, and
//! the feed UI flags (category filter, loading flag, last refresh,
//! error slot). All mutation goes through the declared actions below;
//! there is no other write path.
//!
//! Items enter the store either through [`FeedStore::add_media_item`]
//! or from the external ingestion path behind the [`FeedSource`] trait.
//! Items are never deleted except by the retention cleanup.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::CoreError;
use crate::media::{self, Category, MediaItem, NewMediaItem};
use crate::types::{ItemId, Timestamp};
use crate::user::User;

/// Items older than this many days are dropped by
/// [`FeedStore::cleanup_old_items`], unless bookmarked.
pub const FEED_RETENTION_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// FeedSource
// ---------------------------------------------------------------------------

/// External ingestion/refresh path for feed content.
///
/// Implementations fetch the current authoritative item set; the store
/// decides how to merge it with local state (bookmarks survive).
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<MediaItem>, CoreError>;
}

// ---------------------------------------------------------------------------
// FeedStore
// ---------------------------------------------------------------------------

/// The single application-wide feed container.
///
/// Exactly one instance exists per process; all access is from the
/// UI's one logical thread of control, so the store takes `&mut self`
/// rather than locking.
pub struct FeedStore {
    source: Arc<dyn FeedSource>,
    items: Vec<MediaItem>,
    user: User,
    current_category: Option<Category>,
    is_loading: bool,
    last_refresh: Option<Timestamp>,
    error: Option<String>,
}

impl FeedStore {
    /// Create an empty store for `user`, backed by `source`.
    pub fn new(user: User, source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            items: Vec::new(),
            user,
            current_category: None,
            is_loading: false,
            last_refresh: None,
            error: None,
        }
    }

    // -- read accessors -----------------------------------------------------

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Items matching the active category filter (all items when the
    /// filter is unset).
    pub fn visible_items(&self) -> impl Iterator<Item = &MediaItem> {
        let filter = self.current_category;
        self.items
            .iter()
            .filter(move |item| filter.map_or(true, |c| item.category == c))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn current_category(&self) -> Option<Category> {
        self.current_category
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_refresh(&self) -> Option<Timestamp> {
        self.last_refresh
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -- actions ------------------------------------------------------------

    /// Add a new media item, minting a fresh identity and upload
    /// timestamp. Counters start at zero, bookmark flag cleared.
    ///
    /// Each call creates a new item; this is the one action that is
    /// not safe to blindly retry.
    pub fn add_media_item(&mut self, new_item: NewMediaItem) -> Result<ItemId, CoreError> {
        media::validate_new_item(&new_item)?;

        let id = ItemId::now_v7();
        let item = MediaItem {
            id,
            kind: new_item.kind,
            media_url: new_item.media_url,
            thumbnail_url: new_item.thumbnail_url,
            category: new_item.category,
            event_date: new_item.event_date,
            event_title: new_item.event_title,
            description: new_item.description,
            duration_secs: new_item.duration_secs,
            page_count: new_item.page_count,
            cover_image: new_item.cover_image,
            aspect_ratio: new_item.aspect_ratio,
            is_bookmarked: false,
            view_count: 0,
            engagement_secs: 0,
            uploaded_at: Utc::now(),
            tags: new_item.tags,
            location: new_item.location,
            organizer: new_item.organizer,
        };

        tracing::info!(item_id = %id, category = item.category.as_str(), "Media item added");
        self.items.push(item);
        Ok(id)
    }

    /// Flip the bookmark flag on an item, keeping the user's bookmark
    /// list in set-consistent sync. Returns the new bookmark state.
    pub fn toggle_bookmark(&mut self, item_id: ItemId) -> Result<bool, CoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(CoreError::NotFound {
                entity: "MediaItem",
                id: item_id,
            })?;

        item.is_bookmarked = !item.is_bookmarked;
        let bookmarked = item.is_bookmarked;

        if bookmarked {
            if !self.user.bookmarked_events.contains(&item_id) {
                self.user.bookmarked_events.push(item_id);
            }
        } else {
            self.user.bookmarked_events.retain(|id| *id != item_id);
        }

        Ok(bookmarked)
    }

    /// Select the active category filter (`None` shows everything).
    pub fn set_category(&mut self, category: Option<Category>) {
        self.current_category = category;
    }

    /// Record a view of an item: bumps the view count and adds the
    /// time spent. Both counters only ever grow.
    pub fn update_engagement(&mut self, item_id: ItemId, secs: u64) -> Result<(), CoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(CoreError::NotFound {
                entity: "MediaItem",
                id: item_id,
            })?;

        item.view_count += 1;
        item.engagement_secs += secs;
        Ok(())
    }

    /// Reload the feed from the source.
    ///
    /// On success the item set is replaced, with the bookmark flag
    /// restored for any item the user had bookmarked, and the error
    /// slot is cleared. On failure the existing items are kept and the
    /// error message lands in the error slot. Safe to retry.
    pub async fn refresh_feed(&mut self) {
        self.is_loading = true;

        match self.source.fetch_items().await {
            Ok(mut fetched) => {
                for item in &mut fetched {
                    item.is_bookmarked = self.user.bookmarked_events.contains(&item.id);
                }
                tracing::info!(count = fetched.len(), "Feed refreshed");
                self.items = fetched;
                self.last_refresh = Some(Utc::now());
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Feed refresh failed");
                self.error = Some(e.to_string());
            }
        }

        self.is_loading = false;
    }

    /// First-load guard: fetch only if the store has never refreshed.
    /// Retrying after a successful load is a no-op.
    pub async fn initialize(&mut self) {
        if self.last_refresh.is_some() {
            tracing::debug!("Feed already initialized, skipping");
            return;
        }
        self.refresh_feed().await;
    }

    /// Drop items older than the retention window, keeping bookmarked
    /// items regardless of age. Safe to retry.
    pub fn cleanup_old_items(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::days(FEED_RETENTION_DAYS);
        let before = self.items.len();
        self.items
            .retain(|item| item.is_bookmarked || item.uploaded_at >= cutoff);
        let removed = before - self.items.len();
        if removed > 0 {
            tracing::info!(removed, "Old feed items cleaned up");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
