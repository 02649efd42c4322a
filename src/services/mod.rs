//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los
//! servicios reciben los stores por inyección y encapsulan las reglas
//! de dominio: alcance por propietario, ciclo de vida de neumáticos,
//! montajes y predicción de desgaste.

pub mod access_scope;
pub mod installation_service;
pub mod maintenance_service;
pub mod tire_service;
pub mod wear_predictor;
pub mod wear_scanner;

pub use access_scope::{AccessScope, AccessScopeService};
pub use installation_service::InstallationService;
pub use maintenance_service::MaintenanceStatusService;
pub use tire_service::TireService;
pub use wear_predictor::{classify, WearClassification, WearThresholds, WARN_FRACTION};
pub use wear_scanner::{ScanReport, WearScanner};
