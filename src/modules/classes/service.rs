use anyhow::Context;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use old_school_core::AppError;

use crate::modules::classes::model::{Class, CreateClassDto};
use crate::utils::results::DeleteResult;

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, fields, created_at FROM classes ORDER BY created_at, id",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")
        .map_err(AppError::database)?;

        Ok(classes)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let fields = dto.into_fields();

        let class = sqlx::query_as::<_, Class>(
            r#"INSERT INTO classes (fields)
               VALUES ($1)
               RETURNING id, fields, created_at"#,
        )
        .bind(Json(&fields))
        .fetch_one(db)
        .await
        .context("Failed to insert class")
        .map_err(AppError::database)?;

        info!(class_id = %class.id, "Class created");

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<DeleteResult, AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete class")
            .map_err(AppError::database)?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}
