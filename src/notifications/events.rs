//! Eventos del canal en tiempo real
//!
//! Forma en el cable, consumida por los tableros:
//! `{ "type": "tire_warning" | "tire_replacement" | "info", "message": ..., "data"?: ... }`

use serde::{Deserialize, Serialize};

use crate::models::WearCandidate;

/// Tipo de evento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TireEventKind {
    TireWarning,
    TireReplacement,
    Info,
}

/// Evento de neumático para los suscriptores en tiempo real
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireEvent {
    #[serde(rename = "type")]
    pub kind: TireEventKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WearCandidate>,
}

impl TireEvent {
    /// Aviso temprano: la instalación alcanzó el 80% del kilometraje previsto
    pub fn warning(candidate: &WearCandidate) -> Self {
        let plate = candidate.license_plate.as_deref().unwrap_or("?");
        Self {
            kind: TireEventKind::TireWarning,
            message: format!(
                "El neumático del vehículo {} está próximo al cambio. El kilometraje alcanzó el 80%.",
                plate
            ),
            data: Some(candidate.clone()),
        }
    }

    /// La instalación alcanzó el 100% del kilometraje previsto
    pub fn replacement(candidate: &WearCandidate) -> Self {
        let plate = candidate.license_plate.as_deref().unwrap_or("?");
        Self {
            kind: TireEventKind::TireReplacement,
            message: format!("¡El neumático del vehículo {} necesita ser cambiado!", plate),
            data: Some(candidate.clone()),
        }
    }

    /// El escaneo corrió y no encontró nada que reportar
    pub fn nothing_to_report() -> Self {
        Self {
            kind: TireEventKind::Info,
            message: "Ningún neumático necesita cambio por el momento.".to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn candidate() -> WearCandidate {
        WearCandidate {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            tire_id: Uuid::new_v4(),
            code: "P001".to_string(),
            license_plate: Some("ABC-1234".to_string()),
            email: Some("flota@test.com".to_string()),
            mileage_at_installation: 10000.0,
            predicted_replacement_mileage: 10000.0,
            current_mileage: 20000.0,
        }
    }

    #[test]
    fn test_wire_shape_uses_type_field() {
        let event = TireEvent::replacement(&candidate());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "tire_replacement");
        assert!(json["message"].as_str().unwrap().contains("ABC-1234"));
        assert_eq!(json["data"]["code"], "P001");
    }

    #[test]
    fn test_info_event_omits_data() {
        let event = TireEvent::nothing_to_report();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "info");
        assert!(json.get("data").is_none());
    }
}
