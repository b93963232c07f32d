//! Feed configuration and secret-url generation.

use chrono::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::collections::HashSet;

/// Characters a salt is drawn from.
const SALT_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+{}[]";

/// Number of salt characters.
const SALT_LENGTH: usize = 16;

/// Configuration for one calendar feed.
///
/// Created once per user configuration choice. Boards can be added after
/// creation; everything else is immutable (access-timestamp bookkeeping
/// lives in the store, not here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    /// Member id of the owning user.
    pub member_id: String,
    /// Ids of the boards this feed tracks.
    pub board_ids: HashSet<String>,
    /// Restrict the feed to cards assigned to the owning user.
    pub only_assigned: bool,
    /// Render every event as a fixed 24-hour block.
    pub is_all_day_event: bool,
    /// Event duration in minutes. Ignored when `is_all_day_event` is set.
    pub event_length: i64,
    /// Secret url token the feed is looked up by.
    pub url: String,
}

impl Feed {
    /// Duration of every event this feed produces.
    pub fn event_duration(&self) -> Duration {
        if self.is_all_day_event {
            Duration::days(1)
        } else {
            Duration::minutes(self.event_length)
        }
    }
}

/// Generate a random salt and the matching secret url token for a user.
///
/// The token is the hex sha512 of the user name concatenated with the
/// salt.
pub fn new_salt_and_url(user_name: &str) -> (String, String) {
    let salt = generate_salt();
    let url = secret_url(user_name, &salt);
    (salt, url)
}

/// Draw `SALT_LENGTH` characters from the salt alphabet.
pub fn generate_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LENGTH)
        .map(|_| SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Derive the secret url token from a user name and salt.
pub fn secret_url(user_name: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(user_name.as_bytes());
    hasher.update(salt.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
