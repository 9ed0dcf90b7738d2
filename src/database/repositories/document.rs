use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{CreateDocumentInput, Document};

const DOCUMENT_COLUMNS: &str = r#"
    id,
    team_id,
    collection_id,
    parent_document_id,
    title,
    text,
    is_welcome,
    version,
    created_by_id,
    updated_by_id,
    published_at,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a draft document at version 1, attributed to its author as
    /// both creator and last editor.
    pub async fn create(&self, input: &CreateDocumentInput) -> Result<Document, sqlx::Error> {
        let now = Utc::now();
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            INSERT INTO
                documents (
                    id,
                    team_id,
                    collection_id,
                    parent_document_id,
                    title,
                    text,
                    is_welcome,
                    version,
                    created_by_id,
                    updated_by_id,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?, ?)
            RETURNING
                {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.team_id)
        .bind(input.collection_id)
        .bind(input.parent_document_id)
        .bind(&input.title)
        .bind(&input.text)
        .bind(input.is_welcome)
        .bind(input.created_by_id)
        .bind(input.created_by_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, sqlx::Error> {
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            SELECT
                {DOCUMENT_COLUMNS}
            FROM
                documents
            WHERE
                id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Moves a draft to the visible state, attributed to the acting user.
    pub async fn publish(
        &self,
        id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<Option<Document>, sqlx::Error> {
        let now = Utc::now();
        let document = sqlx::query_as::<_, Document>(&format!(
            r#"
            UPDATE
                documents
            SET
                published_at = ?,
                updated_by_id = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(now)
        .bind(acting_user_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn get_documents_in_collection(
        &self,
        collection_id: Uuid,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let documents = sqlx::query_as::<_, Document>(&format!(
            r#"
            SELECT
                {DOCUMENT_COLUMNS}
            FROM
                documents
            WHERE
                collection_id = ?
            ORDER BY
                created_at ASC
            "#
        ))
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }
}
