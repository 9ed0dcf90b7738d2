use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{
    Collection, CreateCollectionInput, DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD,
};

const COLLECTION_COLUMNS: &str = r#"
    id,
    team_id,
    name,
    description,
    sort_field,
    sort_direction,
    created_by_id,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct CollectionRepository {
    pool: SqlitePool,
}

impl CollectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateCollectionInput) -> Result<Collection, sqlx::Error> {
        let now = Utc::now();
        let collection = sqlx::query_as::<_, Collection>(&format!(
            r#"
            INSERT INTO
                collections (
                    id,
                    team_id,
                    name,
                    description,
                    sort_field,
                    sort_direction,
                    created_by_id,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {COLLECTION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.team_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(DEFAULT_SORT_FIELD)
        .bind(DEFAULT_SORT_DIRECTION)
        .bind(input.created_by_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(collection)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Collection>, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(&format!(
            r#"
            SELECT
                {COLLECTION_COLUMNS}
            FROM
                collections
            WHERE
                id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    pub async fn get_collections_for_team(
        &self,
        team_id: Uuid,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let collections = sqlx::query_as::<_, Collection>(&format!(
            r#"
            SELECT
                {COLLECTION_COLUMNS}
            FROM
                collections
            WHERE
                team_id = ?
            ORDER BY
                created_at ASC
            "#
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }
}
