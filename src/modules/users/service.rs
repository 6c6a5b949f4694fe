use anyhow::Context;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use old_school_core::AppError;

use crate::modules::users::model::{RegisterUserDto, User, UserRole};
use crate::utils::results::{DeleteResult, UpdateResult};

const USER_COLUMNS: &str = "id, email, role, profile, created_at";

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    Created(User),
    AlreadyExists,
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// Inserts a user unless one with the same email exists.
    ///
    /// The unique index on `email` backs the existence check, so a concurrent
    /// registration that wins the race also resolves to `AlreadyExists`.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterUserDto,
    ) -> Result<RegisterOutcome, AppError> {
        let (email, profile) = dto.into_parts();

        if Self::find_by_email(db, &email).await?.is_some() {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let inserted = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, profile)
               VALUES ($1, $2)
               ON CONFLICT (email) DO NOTHING
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&email)
        .bind(Json(&profile))
        .fetch_optional(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        Ok(match inserted {
            Some(user) => {
                info!(user_id = %user.id, "User registered");
                RegisterOutcome::Created(user)
            }
            None => RegisterOutcome::AlreadyExists,
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<DeleteResult, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    /// Sets the role of the user with `id`. Unknown ids yield zero counts.
    #[instrument(skip(db))]
    pub async fn set_role(db: &PgPool, id: Uuid, role: UserRole) -> Result<UpdateResult, AppError> {
        let result = sqlx::query_as::<_, UpdateResult>(
            r#"WITH target AS (
                   SELECT id, role FROM users WHERE id = $1
               ),
               updated AS (
                   UPDATE users SET role = $2
                   WHERE id IN (SELECT id FROM target WHERE role IS DISTINCT FROM $2)
                   RETURNING id
               )
               SELECT
                   (SELECT COUNT(*) FROM target) AS matched_count,
                   (SELECT COUNT(*) FROM updated) AS modified_count"#,
        )
        .bind(id)
        .bind(role)
        .fetch_one(db)
        .await
        .context("Failed to update user role")
        .map_err(AppError::database)?;

        if result.modified_count > 0 {
            info!(user_id = %id, role = %role, "User promoted");
        }

        Ok(result)
    }

    /// Whether the user stored under `email` holds `role`. Unknown emails are `false`.
    #[instrument(skip(db))]
    pub async fn has_role(db: &PgPool, email: &str, role: UserRole) -> Result<bool, AppError> {
        let user = Self::find_by_email(db, email).await?;
        Ok(user.is_some_and(|u| u.has_role(role)))
    }
}
