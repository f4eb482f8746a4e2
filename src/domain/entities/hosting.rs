//! Hosting binding entity.

use chrono::{DateTime, Utc};

/// A subdomain bound to a directory in its owner's storage.
///
/// The hosting server serves `root_dir` for requests whose host is
/// `<subdomain>.<shared domain>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingRecord {
    pub id: i64,
    pub subdomain: String,
    pub root_dir: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HostingRecord {
    /// Creates a new HostingRecord instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let record = HostingRecord::new(
    ///     1,
    ///     "myblog".to_string(),
    ///     "/home/alice/sites/myblog".to_string(),
    ///     "alice".to_string(),
    ///     Utc::now(),
    ///     Utc::now(),
    /// );
    /// ```
    pub fn new(
        id: i64,
        subdomain: String,
        root_dir: String,
        owner: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subdomain,
            root_dir,
            owner,
            created_at,
            updated_at,
        }
    }
}
