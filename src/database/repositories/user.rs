use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::database::models::{CreateUserInput, User};

const USER_COLUMNS: &str = r#"
    id,
    team_id,
    name,
    email,
    is_admin,
    suspended_at,
    suspended_by_id,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO
                users (
                    id,
                    team_id,
                    name,
                    email,
                    is_admin,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.team_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.is_admin)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT
                {USER_COLUMNS}
            FROM
                users
            WHERE
                id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<()>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE
                users
            SET
                is_admin = ?,
                updated_at = ?
            WHERE
                id = ?
            "#,
        )
        .bind(is_admin)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() > 0 {
            Some(())
        } else {
            None
        })
    }

    /// Admins of `team_id` other than `user_id`. Runs inside the caller's
    /// transaction so the count and a following demotion observe the same
    /// admin set.
    pub async fn count_other_admins(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT
                COUNT(*)
            FROM
                users
            WHERE
                team_id = ?
                AND id != ?
                AND is_admin = TRUE
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    pub async fn set_admin_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: Uuid,
        is_admin: bool,
    ) -> Result<Option<()>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE
                users
            SET
                is_admin = ?,
                updated_at = ?
            WHERE
                id = ?
            "#,
        )
        .bind(is_admin)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(if result.rows_affected() > 0 {
            Some(())
        } else {
            None
        })
    }

    /// Clears the suspension markers, restoring access.
    pub async fn activate(&self, id: Uuid) -> Result<Option<()>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE
                users
            SET
                suspended_at = NULL,
                suspended_by_id = NULL,
                updated_at = ?
            WHERE
                id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() > 0 {
            Some(())
        } else {
            None
        })
    }

    pub async fn suspend(&self, id: Uuid, suspended_by_id: Uuid) -> Result<Option<()>, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE
                users
            SET
                suspended_at = ?,
                suspended_by_id = ?,
                updated_at = ?
            WHERE
                id = ?
            "#,
        )
        .bind(now)
        .bind(suspended_by_id)
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
