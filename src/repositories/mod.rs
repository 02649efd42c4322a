//! Repositorios de acceso a datos
//!
//! Cada repositorio expone un trait de almacenamiento y su implementación
//! PostgreSQL. Los servicios reciben los traits inyectados, lo que permite
//! sustituirlos por la implementación en memoria en los tests.

pub mod installation_repository;
pub mod maintenance_repository;
pub mod memory;
pub mod tire_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use installation_repository::{InstallationStore, PgInstallationRepository};
pub use maintenance_repository::{MaintenanceStore, PgMaintenanceRepository};
pub use memory::InMemoryDb;
pub use tire_repository::{PgTireRepository, TireStore};
pub use user_repository::{PgUserDirectory, UserDirectory};
pub use vehicle_repository::{PgVehicleRepository, VehicleStore};

/// Detecta violaciones de unicidad de PostgreSQL (SQLSTATE 23505)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
