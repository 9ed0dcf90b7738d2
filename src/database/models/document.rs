use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub team_id: Uuid,
    pub collection_id: Uuid,
    pub parent_document_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    /// Marks onboarding content seeded at team creation.
    pub is_welcome: bool,
    pub version: i64,
    pub created_by_id: Uuid,
    pub updated_by_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentInput {
    pub team_id: Uuid,
    pub collection_id: Uuid,
    pub parent_document_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub is_welcome: bool,
    pub created_by_id: Uuid,
}

impl Document {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}
