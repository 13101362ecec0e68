use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review or comment that stays hidden until an admin approves it.
///
/// `target_id` is the company for reviews, the parent review for review
/// comments and the job post for job comments.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ModeratedContent {
    pub id: Uuid,
    pub author_id: Uuid,
    pub target_id: Uuid,
    pub content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
