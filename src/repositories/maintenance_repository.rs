//! Repositorio de mantenimientos
//!
//! El agregador de estado es el único escritor del campo status;
//! siempre recalcula desde el conjunto completo de instalaciones
//! vinculadas, nunca incrementa contadores.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Maintenance, MaintenanceDetail, MaintenanceStatus};
use crate::utils::errors::AppResult;

/// Almacenamiento de registros de mantenimiento
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>>;

    /// Registro de mantenimiento enriquecido con los datos del vehículo
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<MaintenanceDetail>>;

    async fn set_status(&self, id: Uuid, status: MaintenanceStatus) -> AppResult<()>;
}

pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceStore for PgMaintenanceRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>> {
        let row = sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenance WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<MaintenanceDetail>> {
        let row = sqlx::query_as::<_, MaintenanceDetail>(
            r#"
            SELECT m.id, m.vehicle_id, m.owner_id, m.maintenance_type, m.status,
                   m.created_at, v.license_plate,
                   v.brand AS vehicle_brand, v.model AS vehicle_model
            FROM maintenance m
            LEFT JOIN vehicles v ON m.vehicle_id = v.id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn set_status(&self, id: Uuid, status: MaintenanceStatus) -> AppResult<()> {
        sqlx::query("UPDATE maintenance SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
