//! Registry records for generated applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable record of one generated application.
///
/// Lives inside the persisted automation state and is the source of truth
/// for deduplication and review scheduling across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Uniqueness key: `"{category}/{slug(name)}"`. Also the app's
    /// directory path inside the target repository.
    pub key: String,
    pub name: String,
    pub category: String,
    pub aws_services: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// When a review pass last looked at this app. `None` until first
    /// reviewed; drives least-recently-reviewed-first selection.
    #[serde(default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}
