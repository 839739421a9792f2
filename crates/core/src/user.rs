//! User profile schema.

use serde::{Deserialize, Serialize};

use crate::media::Category;
use crate::types::ItemId;

/// A signed-in user of the feed application.
///
/// `bookmarked_events` has set semantics: the feed store keeps it free
/// of duplicates and in sync with each item's bookmark flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub bookmarked_events: Vec<ItemId>,
    pub preferences: UserPreferences,
}

/// Per-user feed preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Categories the user has expressed interest in.
    pub categories: Vec<Category>,
    pub notifications: bool,
    pub autoplay: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            notifications: true,
            autoplay: true,
        }
    }
}
