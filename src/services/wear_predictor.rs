//! Predictor de desgaste
//!
//! Función pura: clasifica una instalación según el kilometraje acumulado
//! desde el montaje. Sin I/O y determinista, la lógica de umbrales vive
//! aquí y en ningún otro lado.

/// Fracción del kilometraje previsto a la que se emite el aviso temprano
pub const WARN_FRACTION: f64 = 0.8;

/// Clasificación de desgaste de una instalación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearClassification {
    Ok,
    Warning,
    Replace,
}

/// Umbrales absolutos de odómetro para una instalación
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WearThresholds {
    pub warn: f64,
    pub replace: f64,
}

/// Umbrales de aviso y cambio anclados al odómetro del montaje
pub fn thresholds(mileage_at_installation: f64, predicted_replacement_mileage: f64) -> WearThresholds {
    WearThresholds {
        warn: mileage_at_installation + WARN_FRACTION * predicted_replacement_mileage,
        replace: mileage_at_installation + predicted_replacement_mileage,
    }
}

/// Kilometraje recorrido desde el montaje, relativo al previsto
pub fn wear_ratio(
    current_mileage: f64,
    mileage_at_installation: f64,
    predicted_replacement_mileage: f64,
) -> f64 {
    if predicted_replacement_mileage <= 0.0 {
        return 0.0;
    }
    (current_mileage - mileage_at_installation) / predicted_replacement_mileage
}

/// Clasifica la instalación: replace en el 100% del kilometraje previsto,
/// warning a partir del 80%, ok por debajo
pub fn classify(
    current_mileage: f64,
    mileage_at_installation: f64,
    predicted_replacement_mileage: f64,
) -> WearClassification {
    let t = thresholds(mileage_at_installation, predicted_replacement_mileage);

    if current_mileage >= t.replace {
        WearClassification::Replace
    } else if current_mileage >= t.warn {
        WearClassification::Warning
    } else {
        WearClassification::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        // Instalado a 10000 km con 10000 km de vida útil prevista
        assert_eq!(classify(17999.0, 10000.0, 10000.0), WearClassification::Ok);
        assert_eq!(classify(18000.0, 10000.0, 10000.0), WearClassification::Warning);
        assert_eq!(classify(19999.0, 10000.0, 10000.0), WearClassification::Warning);
        assert_eq!(classify(20000.0, 10000.0, 10000.0), WearClassification::Replace);
    }

    #[test]
    fn test_classification_is_monotonic_in_mileage() {
        fn rank(c: WearClassification) -> u8 {
            match c {
                WearClassification::Ok => 0,
                WearClassification::Warning => 1,
                WearClassification::Replace => 2,
            }
        }

        let mut previous = 0;
        let mut mileage = 10000.0;
        while mileage <= 25000.0 {
            let current = rank(classify(mileage, 10000.0, 10000.0));
            assert!(
                current >= previous,
                "la clasificación retrocedió en {} km",
                mileage
            );
            previous = current;
            mileage += 250.0;
        }
    }

    #[test]
    fn test_thresholds_anchored_at_installation_odometer() {
        let t = thresholds(50000.0, 40000.0);
        assert_eq!(t.warn, 82000.0);
        assert_eq!(t.replace, 90000.0);
    }

    #[test]
    fn test_wear_ratio() {
        assert_eq!(wear_ratio(15000.0, 10000.0, 10000.0), 0.5);
        assert_eq!(wear_ratio(20000.0, 10000.0, 10000.0), 1.0);
        // Vida útil prevista inválida no divide por cero
        assert_eq!(wear_ratio(15000.0, 10000.0, 0.0), 0.0);
    }
}
