//! Persistent user and feed records.
//!
//! Lightweight JSON state in the config directory: enough to look a
//! feed up by its secret url token and stamp access times. Nothing here
//! touches the render pipeline.

use crate::config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use trellofeed_core::{Feed, feed};

/// Everything trellofeed remembers between runs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub users: Vec<FeedUser>,
    #[serde(default)]
    pub feeds: Vec<FeedRecord>,
}

/// A known Trello member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedUser {
    pub user_name: String,
    pub member_id: String,
    pub url: String,
    pub salt: String,
    pub created: DateTime<Utc>,
    pub last_access: DateTime<Utc>,
}

/// A stored feed: its configuration plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    pub salt: String,
    pub created: DateTime<Utc>,
    pub last_access: DateTime<Utc>,
    pub feed: Feed,
}

impl Store {
    /// Look a user up by member id, creating the record on first sight.
    /// The stored name follows the current Trello username.
    pub fn get_or_create_user(
        &mut self,
        member_id: &str,
        user_name: &str,
        now: DateTime<Utc>,
    ) -> FeedUser {
        if let Some(user) = self.users.iter_mut().find(|u| u.member_id == member_id) {
            user.user_name = user_name.to_string();
            user.last_access = now;
            return user.clone();
        }

        let (salt, url) = feed::new_salt_and_url(user_name);
        let user = FeedUser {
            user_name: user_name.to_string(),
            member_id: member_id.to_string(),
            url,
            salt,
            created: now,
            last_access: now,
        };
        self.users.push(user.clone());
        user
    }

    /// Create a feed for a user with a fresh secret url token.
    pub fn create_feed(
        &mut self,
        user: &FeedUser,
        board_ids: HashSet<String>,
        only_assigned: bool,
        is_all_day_event: bool,
        event_length: i64,
        now: DateTime<Utc>,
    ) -> FeedRecord {
        let (salt, url) = feed::new_salt_and_url(&user.user_name);
        let record = FeedRecord {
            salt,
            created: now,
            last_access: now,
            feed: Feed {
                member_id: user.member_id.clone(),
                board_ids,
                only_assigned,
                is_all_day_event,
                event_length,
                url,
            },
        };
        self.feeds.push(record.clone());
        record
    }

    pub fn find_feed(&self, token: &str) -> Option<&FeedRecord> {
        self.feeds.iter().find(|r| r.feed.url == token)
    }

    pub fn find_feed_mut(&mut self, token: &str) -> Option<&mut FeedRecord> {
        self.feeds.iter_mut().find(|r| r.feed.url == token)
    }
}

/// Load the store from ~/.config/trellofeed/feeds.json
pub fn load_store() -> Result<Store> {
    let path = config::feeds_path()?;

    if !path.exists() {
        return Ok(Store::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read feed store at {}", path.display()))?;

    let store: Store = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse feed store at {}", path.display()))?;

    Ok(store)
}

/// Save the store to ~/.config/trellofeed/feeds.json
pub fn save_store(store: &Store) -> Result<()> {
    let path = config::feeds_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(store).context("Failed to serialize feed store")?;

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write feed store at {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn get_or_create_user_is_idempotent_per_member() {
        let mut store = Store::default();

        let first = store.get_or_create_user("m1", "sveder", now());
        let later = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let second = store.get_or_create_user("m1", "sveder", later);

        assert_eq!(store.users.len(), 1);
        assert_eq!(first.url, second.url);
        assert_eq!(second.last_access, later);
    }

    #[test]
    fn renamed_member_keeps_their_token() {
        let mut store = Store::default();

        let before = store.get_or_create_user("m1", "old_name", now());
        let after = store.get_or_create_user("m1", "new_name", now());

        assert_eq!(before.url, after.url);
        assert_eq!(after.user_name, "new_name");
    }

    #[test]
    fn create_feed_stores_a_findable_record() {
        let mut store = Store::default();
        let user = store.get_or_create_user("m1", "sveder", now());

        let record = store.create_feed(
            &user,
            HashSet::from(["b1".to_string()]),
            true,
            false,
            30,
            now(),
        );

        assert_eq!(record.feed.url.len(), 128);
        assert_ne!(record.feed.url, user.url);

        let found = store.find_feed(&record.feed.url).expect("feed not found");
        assert_eq!(found.feed.member_id, "m1");
        assert!(found.feed.only_assigned);
        assert_eq!(found.feed.event_length, 30);
    }

    #[test]
    fn unknown_token_finds_nothing() {
        let store = Store::default();
        assert!(store.find_feed("nope").is_none());
    }

    #[test]
    fn store_round_trips_through_json() {
        let mut store = Store::default();
        let user = store.get_or_create_user("m1", "sveder", now());
        store.create_feed(&user, HashSet::from(["b1".to_string()]), false, true, 60, now());

        let json = serde_json::to_string(&store).unwrap();
        let restored: Store = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.users.len(), 1);
        assert_eq!(restored.feeds.len(), 1);
        assert!(restored.feeds[0].feed.is_all_day_event);
    }
}
