use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default sort applied to new collections.
pub const DEFAULT_SORT_FIELD: &str = "index";
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sort_field: String,
    pub sort_direction: String,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionInput {
    pub team_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by_id: Uuid,
}
