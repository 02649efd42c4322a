//! Repositorio de instalaciones (vehicle_tires)
//!
//! El índice único parcial sobre (tire_id) WHERE NOT to_replace es la
//! garantía autoritativa de "a lo sumo una instalación viva por neumático";
//! el chequeo is_mounted_elsewhere del servicio es solo el camino rápido.
//! Las secuencias insertar-y-actualizar-estado corren dentro de una
//! transacción para que nunca quede una escritura parcial.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Installation, InstallationDetail, NewInstallation, ReplacementCounts, WearCandidate,
};
use crate::repositories::is_unique_violation;
use crate::utils::errors::{AppError, AppResult};

const DETAIL_SELECT: &str = r#"
    SELECT vt.id, vt.vehicle_id, vt.tire_id, vt.maintenance_id,
           vt.installation_date, vt.mileage_at_installation,
           vt.predicted_replacement_mileage, vt.to_replace, vt.mileage_to_replace,
           t.code, t.brand, t.model, v.current_mileage,
           (v.current_mileage >= vt.mileage_at_installation + vt.predicted_replacement_mileage)
               AS needs_replacement
    FROM vehicle_tires vt
    INNER JOIN tires t ON vt.tire_id = t.id
    INNER JOIN vehicles v ON vt.vehicle_id = v.id
"#;

/// Almacenamiento del libro de instalaciones
#[async_trait]
pub trait InstallationStore: Send + Sync {
    /// Inserta el lote completo y pasa cada neumático a in_use, todo o nada
    async fn install_batch(&self, batch: Vec<NewInstallation>) -> AppResult<Vec<Installation>>;

    /// True si el neumático tiene una instalación en otro vehículo y su
    /// estado en el registro no es available
    async fn is_mounted_elsewhere(&self, tire_id: Uuid, vehicle_id: Uuid) -> AppResult<bool>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Installation>>;

    /// Marca la instalación para cambio y libera el neumático (available)
    async fn mark_to_replace(&self, id: Uuid, mileage_to_replace: f64) -> AppResult<Installation>;

    /// Elimina la instalación más antigua del neumático y lo libera.
    /// Devuelve false si el neumático no estaba instalado en ningún vehículo
    async fn discharge_by_tire(&self, tire_id: Uuid) -> AppResult<bool>;

    async fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<InstallationDetail>>;

    async fn list_for_maintenance(
        &self,
        vehicle_id: Uuid,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<InstallationDetail>>;

    /// Instalaciones vivas con kilometraje actual y correo del responsable,
    /// insumo del escaneo de desgaste
    async fn list_wear_candidates(&self) -> AppResult<Vec<WearCandidate>>;

    /// Conteo marcadas-para-cambio vs. total para un mantenimiento
    async fn replacement_counts(&self, maintenance_id: Uuid) -> AppResult<ReplacementCounts>;

    /// Cantidad de instalaciones (histórico incluido) que referencian al neumático
    async fn count_for_tire(&self, tire_id: Uuid) -> AppResult<i64>;

    /// Cantidad de instalaciones vivas (to_replace = false) del neumático
    async fn count_live_for_tire(&self, tire_id: Uuid) -> AppResult<i64>;
}

pub struct PgInstallationRepository {
    pool: PgPool,
}

impl PgInstallationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstallationStore for PgInstallationRepository {
    async fn install_batch(&self, batch: Vec<NewInstallation>) -> AppResult<Vec<Installation>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(batch.len());

        for item in batch {
            let row = sqlx::query_as::<_, Installation>(
                r#"
                INSERT INTO vehicle_tires
                    (id, vehicle_id, tire_id, owner_id, maintenance_id, installation_date,
                     mileage_at_installation, predicted_replacement_mileage, to_replace)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(item.vehicle_id)
            .bind(item.tire_id)
            .bind(item.owner_id)
            .bind(item.maintenance_id)
            .bind(item.installation_date)
            .bind(item.mileage_at_installation)
            .bind(item.predicted_replacement_mileage)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::TireAlreadyMounted(item.tire_id)
                } else {
                    AppError::Store(e)
                }
            })?;

            sqlx::query("UPDATE tires SET status = 'in_use' WHERE id = $1")
                .bind(item.tire_id)
                .execute(&mut *tx)
                .await?;

            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn is_mounted_elsewhere(&self, tire_id: Uuid, vehicle_id: Uuid) -> AppResult<bool> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM vehicle_tires vt
            INNER JOIN tires t ON vt.tire_id = t.id
            WHERE vt.tire_id = $1
              AND vt.vehicle_id != $2
              AND t.status != 'available'
            "#,
        )
        .bind(tire_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Installation>> {
        let row = sqlx::query_as::<_, Installation>("SELECT * FROM vehicle_tires WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn mark_to_replace(&self, id: Uuid, mileage_to_replace: f64) -> AppResult<Installation> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Installation>(
            r#"
            UPDATE vehicle_tires
            SET to_replace = TRUE, mileage_to_replace = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(mileage_to_replace)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::InstallationNotFound(id))?;

        sqlx::query("UPDATE tires SET status = 'available' WHERE id = $1")
            .bind(row.tire_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn discharge_by_tire(&self, tire_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let found: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM vehicle_tires
            WHERE tire_id = $1
            ORDER BY installation_date ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(tire_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((installation_id,)) = found else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM vehicle_tires WHERE id = $1")
            .bind(installation_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE tires SET status = 'available' WHERE id = $1")
            .bind(tire_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<InstallationDetail>> {
        let rows = sqlx::query_as::<_, InstallationDetail>(&format!(
            "{} WHERE vt.vehicle_id = $1 ORDER BY vt.installation_date DESC",
            DETAIL_SELECT
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_maintenance(
        &self,
        vehicle_id: Uuid,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<InstallationDetail>> {
        let rows = sqlx::query_as::<_, InstallationDetail>(&format!(
            "{} WHERE vt.vehicle_id = $1 AND vt.maintenance_id = $2 ORDER BY vt.installation_date DESC",
            DETAIL_SELECT
        ))
        .bind(vehicle_id)
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_wear_candidates(&self) -> AppResult<Vec<WearCandidate>> {
        // LEFT JOIN sobre users: un owner_id colgante produce email NULL
        // y el escáner salta la fila en lugar de abortar
        let rows = sqlx::query_as::<_, WearCandidate>(
            r#"
            SELECT vt.id, vt.vehicle_id, vt.tire_id, t.code,
                   v.license_plate, u.email,
                   vt.mileage_at_installation, vt.predicted_replacement_mileage,
                   v.current_mileage
            FROM vehicle_tires vt
            INNER JOIN tires t ON vt.tire_id = t.id
            INNER JOIN vehicles v ON vt.vehicle_id = v.id
            LEFT JOIN users u ON v.owner_id = u.id
            WHERE vt.to_replace = FALSE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn replacement_counts(&self, maintenance_id: Uuid) -> AppResult<ReplacementCounts> {
        let counts = sqlx::query_as::<_, ReplacementCounts>(
            r#"
            SELECT COUNT(*) FILTER (WHERE to_replace) AS replaced,
                   COUNT(*) AS total
            FROM vehicle_tires
            WHERE maintenance_id = $1
            "#,
        )
        .bind(maintenance_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn count_for_tire(&self, tire_id: Uuid) -> AppResult<i64> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vehicle_tires WHERE tire_id = $1")
                .bind(tire_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    async fn count_live_for_tire(&self, tire_id: Uuid) -> AppResult<i64> {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vehicle_tires WHERE tire_id = $1 AND to_replace = FALSE",
        )
        .bind(tire_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
