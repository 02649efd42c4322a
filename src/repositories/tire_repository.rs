//! Repositorio de neumáticos
//!
//! Acceso a la tabla tires. La restricción UNIQUE sobre code es la
//! garantía autoritativa contra códigos duplicados; el chequeo previo
//! del servicio es solo una optimización.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewTire, Tire, TireFilters, TireStatus, TireUpdate};
use crate::repositories::is_unique_violation;
use crate::utils::errors::{AppError, AppResult};

/// Almacenamiento de neumáticos
#[async_trait]
pub trait TireStore: Send + Sync {
    async fn insert(&self, tire: NewTire) -> AppResult<Tire>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tire>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Tire>>;

    async fn code_exists(&self, code: &str) -> AppResult<bool>;

    /// Lista paginada, restringida al conjunto de propietarios visibles
    async fn list(
        &self,
        filters: &TireFilters,
        scope: &[Uuid],
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<Tire>, i64)>;

    async fn update(&self, id: Uuid, changes: TireUpdate) -> AppResult<Tire>;

    async fn update_status(&self, id: Uuid, status: TireStatus) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgTireRepository {
    pool: PgPool,
}

impl PgTireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TireStore for PgTireRepository {
    async fn insert(&self, tire: NewTire) -> AppResult<Tire> {
        let inserted = sqlx::query_as::<_, Tire>(
            r#"
            INSERT INTO tires (id, code, brand, model, price, durability_km, status, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'available', $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&tire.code)
        .bind(&tire.brand)
        .bind(&tire.model)
        .bind(tire.price)
        .bind(tire.durability_km)
        .bind(tire.owner_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateCode(tire.code.clone())
            } else {
                AppError::Store(e)
            }
        })?;

        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tire>> {
        let tire = sqlx::query_as::<_, Tire>("SELECT * FROM tires WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tire)
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Tire>> {
        let tire = sqlx::query_as::<_, Tire>("SELECT * FROM tires WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tire)
    }

    async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tires WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn list(
        &self,
        filters: &TireFilters,
        scope: &[Uuid],
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<Tire>, i64)> {
        let limit = limit.max(1);
        let offset = (page.max(1) - 1) * limit;

        const WHERE_CLAUSE: &str = r#"
            WHERE owner_id = ANY($1)
              AND ($2::text IS NULL OR code ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR brand ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL OR model ILIKE '%' || $4 || '%')
              AND ($5::tire_status IS NULL OR status = $5)
        "#;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM tires {}", WHERE_CLAUSE))
                .bind(scope)
                .bind(filters.code.as_deref())
                .bind(filters.brand.as_deref())
                .bind(filters.model.as_deref())
                .bind(filters.status)
                .fetch_one(&self.pool)
                .await?;

        let tires = sqlx::query_as::<_, Tire>(&format!(
            "SELECT * FROM tires {} ORDER BY created_at DESC LIMIT $6 OFFSET $7",
            WHERE_CLAUSE
        ))
        .bind(scope)
        .bind(filters.code.as_deref())
        .bind(filters.brand.as_deref())
        .bind(filters.model.as_deref())
        .bind(filters.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((tires, total))
    }

    async fn update(&self, id: Uuid, changes: TireUpdate) -> AppResult<Tire> {
        // Obtener neumático actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tire with id '{}' not found", id)))?;

        let code = changes.code.unwrap_or(current.code);

        let tire = sqlx::query_as::<_, Tire>(
            r#"
            UPDATE tires
            SET code = $2, brand = $3, model = $4, price = $5, durability_km = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&code)
        .bind(changes.brand.unwrap_or(current.brand))
        .bind(changes.model.unwrap_or(current.model))
        .bind(changes.price.unwrap_or(current.price))
        .bind(changes.durability_km.unwrap_or(current.durability_km))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateCode(code.clone())
            } else {
                AppError::Store(e)
            }
        })?;

        Ok(tire)
    }

    async fn update_status(&self, id: Uuid, status: TireStatus) -> AppResult<()> {
        sqlx::query("UPDATE tires SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM tires WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
