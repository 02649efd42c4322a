//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod installation;
pub mod maintenance;
pub mod tire;
pub mod user;
pub mod vehicle;

pub use installation::{Installation, InstallationDetail, NewInstallation, WearCandidate};
pub use maintenance::{Maintenance, MaintenanceDetail, MaintenanceStatus, ReplacementCounts};
pub use tire::{NewTire, Tire, TireFilters, TireStatus, TireUpdate};
pub use user::User;
pub use vehicle::Vehicle;
