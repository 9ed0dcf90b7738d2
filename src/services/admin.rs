use sqlx::SqlitePool;

use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::AppError;

/// Guards the admin roster of a team. Every team must keep at least one
/// administrator once it has one.
#[derive(Clone)]
pub struct AdminGovernor {
    pool: SqlitePool,
    users: UserRepository,
}

impl AdminGovernor {
    pub fn new(pool: SqlitePool) -> Self {
        let users = UserRepository::new(pool.clone());
        Self { pool, users }
    }

    /// Grants administrator status. Team membership is assumed to have been
    /// validated by the caller.
    pub async fn add_admin(&self, user: &User) -> Result<(), AppError> {
        self.users
            .set_admin(user.id, true)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))
    }

    /// Demotes `user` unless they are the team's last administrator.
    ///
    /// The count and the demotion run in one transaction so two concurrent
    /// demotions cannot both observe a stale admin set and jointly leave
    /// zero admins.
    pub async fn remove_admin(&self, user: &User) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let other_admins = self
            .users
            .count_other_admins(&mut tx, user.team_id, user.id)
            .await?;

        if other_admins < 1 {
            // Nothing has been written; dropping the transaction rolls back
            return Err(AppError::InvariantViolation(
                "at least one admin is required".to_string(),
            ));
        }

        self.users
            .set_admin_tx(&mut tx, user.id, false)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

        tx.commit().await?;
        Ok(())
    }

    /// Clears a user's suspension markers, restoring access. Does not touch
    /// the admin roster.
    pub async fn activate_user(&self, user: &User) -> Result<(), AppError> {
        self.users
            .activate(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))
    }
}
