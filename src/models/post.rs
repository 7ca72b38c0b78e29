use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    /// Microseconds since the epoch; set once at creation, never updated.
    pub created_at: i64,
    /// Insertion counter used to break timestamp ties when ordering the feed.
    #[serde(skip)]
    pub seq: u64,
}
