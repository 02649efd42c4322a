use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::NewInstallation;

// Un elemento del lote de montaje; el body del POST es un array de estos
#[derive(Debug, Deserialize, Validate)]
pub struct InstallTireRequest {
    pub vehicle_id: Uuid,
    pub tire_id: Uuid,
    pub maintenance_id: Option<Uuid>,
    pub installation_date: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0))]
    pub mileage_at_installation: f64,

    #[validate(range(min = 1.0))]
    pub predicted_replacement_mileage: f64,
}

impl InstallTireRequest {
    pub fn into_new_installation(self, owner_id: Uuid) -> NewInstallation {
        NewInstallation {
            vehicle_id: self.vehicle_id,
            tire_id: self.tire_id,
            owner_id,
            maintenance_id: self.maintenance_id,
            installation_date: self.installation_date.unwrap_or_else(Utc::now),
            mileage_at_installation: self.mileage_at_installation,
            predicted_replacement_mileage: self.predicted_replacement_mileage,
        }
    }
}

// Request para marcar una instalación para cambio
#[derive(Debug, Deserialize, Validate)]
pub struct MarkReplacementRequest {
    #[validate(range(min = 0.0))]
    pub mileage_to_replace: f64,
}

// Response de la baja de un neumático
#[derive(Debug, Serialize)]
pub struct DischargeResponse {
    pub tire_id: Uuid,
    pub discharged: bool,
}
