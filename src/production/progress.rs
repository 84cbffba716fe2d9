use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A progress note posted by the atelier against an order. Published updates
/// appear on the shareable progress page; drafts stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub title: String,
    pub message: String,
    /// Canonical label of the timeline step this update narrates, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_label: Option<String>,
    pub published: bool,
    pub posted_at: DateTime<Utc>,
}

/// Opaque token granting read-only access to an order's public progress
/// view, provisioned the first time an update is published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareKey(pub String);

impl ShareKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl fmt::Display for ShareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_keys_are_unique_and_url_safe() {
        let first = ShareKey::generate();
        let second = ShareKey::generate();
        assert_ne!(first, second);
        assert!(first.0.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(first.0.len(), 32);
    }
}
