use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{CreateTeamInput, Team};

const TEAM_COLUMNS: &str = r#"
    id,
    name,
    subdomain,
    domain,
    avatar_url,
    sharing,
    guest_signin,
    document_embeds,
    created_at,
    updated_at,
    deleted_at
"#;

#[derive(Clone)]
pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_team(&self, input: &CreateTeamInput) -> Result<Team, sqlx::Error> {
        let now = Utc::now();
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO
                teams (
                    id,
                    name,
                    domain,
                    avatar_url,
                    sharing,
                    guest_signin,
                    document_embeds,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, TRUE, TRUE, TRUE, ?, ?)
            RETURNING
                {TEAM_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.domain)
        .bind(&input.avatar_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    /// Soft-deleted teams are hidden here; use [`find_by_id_with_deleted`]
    /// to include them.
    ///
    /// [`find_by_id_with_deleted`]: TeamRepository::find_by_id_with_deleted
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT
                {TEAM_COLUMNS}
            FROM
                teams
            WHERE
                id = ?
                AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT
                {TEAM_COLUMNS}
            FROM
                teams
            WHERE
                id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT
                {TEAM_COLUMNS}
            FROM
                teams
            WHERE
                subdomain = ?
                AND deleted_at IS NULL
            "#
        ))
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Claims `subdomain` for the team in a single statement; the unique
    /// constraint on the column is the arbiter under concurrent claims.
    pub async fn set_subdomain(
        &self,
        id: Uuid,
        subdomain: &str,
    ) -> Result<Option<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE
                teams
            SET
                subdomain = ?,
                updated_at = ?
            WHERE
                id = ?
                AND deleted_at IS NULL
            RETURNING
                {TEAM_COLUMNS}
            "#
        ))
        .bind(subdomain)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Persists the mutable fields of the team. The subdomain is managed
    /// separately by [`set_subdomain`](TeamRepository::set_subdomain).
    pub async fn update_team(&self, team: &Team) -> Result<Option<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE
                teams
            SET
                name = ?,
                domain = ?,
                avatar_url = ?,
                sharing = ?,
                guest_signin = ?,
                document_embeds = ?,
                updated_at = ?
            WHERE
                id = ?
                AND deleted_at IS NULL
            RETURNING
                {TEAM_COLUMNS}
            "#
        ))
        .bind(&team.name)
        .bind(&team.domain)
        .bind(&team.avatar_url)
        .bind(team.sharing)
        .bind(team.guest_signin)
        .bind(team.document_embeds)
        .bind(Utc::now())
        .bind(team.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Tombstones the team instead of erasing it; the row (and its unique
    /// subdomain) survives.
    pub async fn soft_delete(&self, id: Uuid) -> Result<Option<()>, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE
                teams
            SET
                deleted_at = ?,
                updated_at = ?
            WHERE
                id = ?
                AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() > 0 {
            Some(())
        } else {
            None
        })
    }
}
