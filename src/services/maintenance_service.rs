//! Agregador de estado de mantenimiento
//!
//! El estado de un mantenimiento se deriva del conjunto completo de
//! instalaciones vinculadas: CONCLUIDA cuando todas están marcadas para
//! cambio, PENDENTE en cualquier otro caso. Se recalcula desde cero en
//! cada invocación para que el estado nunca se desvíe de los datos.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{MaintenanceStatus, ReplacementCounts};
use crate::repositories::{InstallationStore, MaintenanceStore};
use crate::utils::errors::AppResult;

/// Regla de derivación pura: todas las instalaciones vinculadas marcadas
/// para cambio (y al menos una) => CONCLUIDA
pub fn derive_status(counts: ReplacementCounts) -> MaintenanceStatus {
    if counts.total > 0 && counts.replaced == counts.total {
        MaintenanceStatus::Concluida
    } else {
        MaintenanceStatus::Pendente
    }
}

/// Servicio que recalcula y persiste el estado de un mantenimiento
#[derive(Clone)]
pub struct MaintenanceStatusService {
    installations: Arc<dyn InstallationStore>,
    maintenance: Arc<dyn MaintenanceStore>,
}

impl MaintenanceStatusService {
    pub fn new(
        installations: Arc<dyn InstallationStore>,
        maintenance: Arc<dyn MaintenanceStore>,
    ) -> Self {
        Self {
            installations,
            maintenance,
        }
    }

    /// Recalcula el estado desde el conjunto vinculado y lo persiste
    pub async fn recompute(&self, maintenance_id: Uuid) -> AppResult<MaintenanceStatus> {
        let counts = self.installations.replacement_counts(maintenance_id).await?;
        let status = derive_status(counts);

        self.maintenance.set_status(maintenance_id, status).await?;

        log::debug!(
            "Mantenimiento {} recalculado: {}/{} marcadas => {:?}",
            maintenance_id,
            counts.replaced,
            counts.total,
            status
        );

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(replaced: i64, total: i64) -> ReplacementCounts {
        ReplacementCounts { replaced, total }
    }

    #[test]
    fn test_all_marked_flips_to_concluida() {
        assert_eq!(derive_status(counts(3, 3)), MaintenanceStatus::Concluida);
        assert_eq!(derive_status(counts(1, 1)), MaintenanceStatus::Concluida);
    }

    #[test]
    fn test_partial_marking_stays_pendente() {
        assert_eq!(derive_status(counts(2, 3)), MaintenanceStatus::Pendente);
        assert_eq!(derive_status(counts(0, 3)), MaintenanceStatus::Pendente);
    }

    #[test]
    fn test_no_linked_installations_stays_pendente() {
        assert_eq!(derive_status(counts(0, 0)), MaintenanceStatus::Pendente);
    }
}
