//! Repositorio de vehículos
//!
//! El vehículo pertenece al CRUD externo; este servicio solo necesita
//! leer su kilometraje actual, fuente autoritativa para el desgaste.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Vehicle;
use crate::utils::errors::AppResult;

/// Lectura de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Kilometraje actual del odómetro, None si el vehículo no existe
    async fn current_mileage(&self, id: Uuid) -> AppResult<Option<f64>>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn current_mileage(&self, id: Uuid) -> AppResult<Option<f64>> {
        let row: Option<(f64,)> =
            sqlx::query_as("SELECT current_mileage FROM vehicles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(m,)| m))
    }
}
