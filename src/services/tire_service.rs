//! Servicio de registro de neumáticos
//!
//! Dueño de la identidad del neumático, la unicidad del código y las
//! transiciones de estado available → in_use → available/lower.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{NewTire, Tire, TireFilters, TireStatus, TireUpdate};
use crate::repositories::{InstallationStore, TireStore};
use crate::services::access_scope::AccessScopeService;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Motivo de baja definitiva en el análisis post-cambio
const REASON_DEFECT: &str = "defect";

/// Servicio de neumáticos
#[derive(Clone)]
pub struct TireService {
    tires: Arc<dyn TireStore>,
    installations: Arc<dyn InstallationStore>,
    scopes: AccessScopeService,
}

impl TireService {
    pub fn new(
        tires: Arc<dyn TireStore>,
        installations: Arc<dyn InstallationStore>,
        scopes: AccessScopeService,
    ) -> Self {
        Self {
            tires,
            installations,
            scopes,
        }
    }

    /// Registra un neumático nuevo con estado available.
    ///
    /// El chequeo previo de código es solo informativo; la restricción
    /// UNIQUE del almacenamiento decide en caso de carrera.
    pub async fn register(&self, new_tire: NewTire) -> AppResult<Tire> {
        if self.tires.code_exists(&new_tire.code).await? {
            return Err(AppError::DuplicateCode(new_tire.code));
        }

        let tire = self.tires.insert(new_tire).await?;
        log::info!("✅ Neumático registrado: {} ({})", tire.code, tire.id);

        Ok(tire)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Tire> {
        self.tires
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tire", &id.to_string()))
    }

    /// Busca un neumático por código verificando que pueda usarse.
    ///
    /// No es una consulta pura: falla si el neumático está montado,
    /// dado de baja, o si aún le queda una instalación viva.
    pub async fn get_by_code(&self, code: &str) -> AppResult<Tire> {
        let tire = self
            .tires
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found_error("Tire", code))?;

        match tire.status {
            TireStatus::InUse => Err(AppError::TireInUse(tire.code)),
            TireStatus::Lower => Err(AppError::TireLowered(tire.code)),
            TireStatus::Available => {
                // Estado desfasado: la fila viva manda
                if self.installations.count_live_for_tire(tire.id).await? > 0 {
                    return Err(AppError::TireInUse(tire.code));
                }
                Ok(tire)
            }
        }
    }

    /// Lista paginada restringida al alcance del usuario
    pub async fn list(
        &self,
        caller_id: Uuid,
        filters: &TireFilters,
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<Tire>, i64)> {
        let scope = self.scopes.resolve(caller_id).await?;
        self.tires.list(filters, scope.owner_ids(), page, limit).await
    }

    pub async fn update(&self, id: Uuid, changes: TireUpdate) -> AppResult<Tire> {
        self.tires.update(id, changes).await
    }

    /// Elimina un neumático sin historial de instalaciones.
    ///
    /// Cualquier fila de vehicle_tires (viva o histórica) bloquea la
    /// eliminación; no hay borrado en cascada.
    pub async fn destroy(&self, id: Uuid) -> AppResult<()> {
        if self.installations.count_for_tire(id).await? > 0 {
            return Err(AppError::TireReferenced(id));
        }

        self.tires.delete(id).await?;
        log::info!("🗑️ Neumático eliminado: {}", id);

        Ok(())
    }

    /// Reclasifica el neumático tras un análisis de costo/defecto:
    /// defecto => lower (baja definitiva), cualquier otro motivo => available
    pub async fn update_status_after_analysis(
        &self,
        tire_id: Uuid,
        replacement_reason: &str,
    ) -> AppResult<TireStatus> {
        self.tires
            .find_by_id(tire_id)
            .await?
            .ok_or_else(|| not_found_error("Tire", &tire_id.to_string()))?;

        let status = if replacement_reason == REASON_DEFECT {
            TireStatus::Lower
        } else {
            TireStatus::Available
        };

        self.tires.update_status(tire_id, status).await?;
        log::info!(
            "🔄 Neumático {} reclasificado tras análisis: {}",
            tire_id,
            status.as_str()
        );

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryDb;
    use rust_decimal::Decimal;

    fn service(db: &Arc<InMemoryDb>) -> TireService {
        TireService::new(
            db.clone(),
            db.clone(),
            AccessScopeService::new(db.clone()),
        )
    }

    fn new_tire(code: &str, owner_id: Uuid) -> NewTire {
        NewTire {
            code: code.to_string(),
            brand: "Michelin".to_string(),
            model: "XZA2".to_string(),
            price: Decimal::new(45000, 2),
            durability_km: 80000.0,
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_code() {
        let db = Arc::new(InMemoryDb::new());
        let service = service(&db);
        let owner = Uuid::new_v4();

        service.register(new_tire("P001", owner)).await.unwrap();
        let err = service.register(new_tire("P001", owner)).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateCode(code) if code == "P001"));
    }

    #[tokio::test]
    async fn test_registered_tire_starts_available() {
        let db = Arc::new(InMemoryDb::new());
        let service = service(&db);

        let tire = service
            .register(new_tire("P002", Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(tire.status, TireStatus::Available);
    }

    #[tokio::test]
    async fn test_analysis_with_defect_lowers_tire() {
        let db = Arc::new(InMemoryDb::new());
        let service = service(&db);

        let tire = service
            .register(new_tire("P003", Uuid::new_v4()))
            .await
            .unwrap();

        let status = service
            .update_status_after_analysis(tire.id, "defect")
            .await
            .unwrap();
        assert_eq!(status, TireStatus::Lower);

        let err = service.get_by_code("P003").await.unwrap_err();
        assert!(matches!(err, AppError::TireLowered(_)));
    }

    #[tokio::test]
    async fn test_analysis_without_defect_releases_tire() {
        let db = Arc::new(InMemoryDb::new());
        let service = service(&db);

        let tire = service
            .register(new_tire("P004", Uuid::new_v4()))
            .await
            .unwrap();

        let status = service
            .update_status_after_analysis(tire.id, "worn")
            .await
            .unwrap();

        assert_eq!(status, TireStatus::Available);
    }
}
