//! Escáner periódico de desgaste
//!
//! Recorre las instalaciones vivas, clasifica cada una con el predictor
//! y despacha notificaciones (evento en tiempo real + correo al
//! responsable). El fallo de una notificación individual se registra y
//! no aborta el resto del escaneo; el fallo de la consulta aborta el
//! ciclo completo y el siguiente tick reintenta desde cero.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::models::WearCandidate;
use crate::notifications::{EmailNotifier, EventBroadcaster, TireEvent};
use crate::repositories::InstallationStore;
use crate::services::wear_predictor::{classify, wear_ratio, WearClassification};
use crate::utils::errors::AppResult;

/// Resultado de un ciclo de escaneo
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub scanned: usize,
    pub warnings: usize,
    pub replacements: usize,
    pub skipped: usize,
    pub notification_failures: usize,
}

/// Escáner de desgaste con sus dos salidas de notificación inyectadas
pub struct WearScanner {
    installations: Arc<dyn InstallationStore>,
    broadcaster: EventBroadcaster,
    mailer: Arc<dyn EmailNotifier>,
}

impl WearScanner {
    pub fn new(
        installations: Arc<dyn InstallationStore>,
        broadcaster: EventBroadcaster,
        mailer: Arc<dyn EmailNotifier>,
    ) -> Self {
        Self {
            installations,
            broadcaster,
            mailer,
        }
    }

    /// Ejecuta un ciclo completo de escaneo.
    ///
    /// No muta el almacenamiento: dos ejecuciones consecutivas sin
    /// cambios de odómetro producen el mismo resultado.
    pub async fn run_scan(&self) -> AppResult<ScanReport> {
        info!("⏳ Iniciando verificación de neumáticos...");

        let candidates = self.installations.list_wear_candidates().await?;

        if candidates.is_empty() {
            info!("✅ Ningún neumático necesita cambio por el momento.");
            self.broadcaster.broadcast_lossy(TireEvent::nothing_to_report());
            return Ok(ScanReport::default());
        }

        let mut report = ScanReport {
            scanned: candidates.len(),
            ..ScanReport::default()
        };

        for candidate in &candidates {
            let classification = classify(
                candidate.current_mileage,
                candidate.mileage_at_installation,
                candidate.predicted_replacement_mileage,
            );

            debug!(
                "Neumático {}: desgaste {:.0}%",
                candidate.code,
                wear_ratio(
                    candidate.current_mileage,
                    candidate.mileage_at_installation,
                    candidate.predicted_replacement_mileage,
                ) * 100.0
            );

            if classification == WearClassification::Ok {
                continue;
            }

            let (Some(license_plate), Some(email)) =
                (candidate.license_plate.as_deref(), candidate.email.as_deref())
            else {
                warn!(
                    "⚠️ Datos incompletos para el neumático {}, fila saltada",
                    candidate.code
                );
                report.skipped += 1;
                continue;
            };

            match classification {
                WearClassification::Warning => {
                    info!(
                        "🟡 El neumático {} del vehículo {} alcanzó el 80% del kilometraje previsto",
                        candidate.code, license_plate
                    );
                    report.warnings += 1;
                    self.broadcaster.broadcast_lossy(TireEvent::warning(candidate));
                }
                WearClassification::Replace => {
                    info!(
                        "🔴 ¡El neumático {} del vehículo {} necesita ser cambiado!",
                        candidate.code, license_plate
                    );
                    report.replacements += 1;
                    self.broadcaster
                        .broadcast_lossy(TireEvent::replacement(candidate));
                }
                WearClassification::Ok => unreachable!(),
            }

            if let Err(e) = self.notify_by_email(candidate, classification, email).await {
                error!("❌ Error al enviar notificación a {}: {}", email, e);
                report.notification_failures += 1;
            } else {
                info!("✅ Notificación enviada a {}", email);
            }
        }

        Ok(report)
    }

    async fn notify_by_email(
        &self,
        candidate: &WearCandidate,
        classification: WearClassification,
        email: &str,
    ) -> AppResult<()> {
        let plate = candidate.license_plate.as_deref().unwrap_or("?");

        let (subject, body) = match classification {
            WearClassification::Replace => (
                "Cambio de neumático requerido",
                format!(
                    "El neumático {} del vehículo {} alcanzó el kilometraje de sustitución. Programe el cambio lo antes posible.",
                    candidate.code, plate
                ),
            ),
            _ => (
                "Aviso de desgaste de neumático",
                format!(
                    "El neumático {} del vehículo {} alcanzó el 80% del kilometraje de sustitución. Programe el cambio pronto.",
                    candidate.code, plate
                ),
            ),
        };

        self.mailer.send_email(email, subject, &body).await
    }

    /// Bucle del daemon: un escaneo por tick, sin solaparse.
    ///
    /// Un escaneo largo solo retrasa el siguiente tick; los ticks
    /// perdidos se descartan en lugar de acumularse.
    pub async fn run_scheduler(self, period: Duration) {
        info!(
            "🕒 Escáner de desgaste programado cada {} segundos",
            period.as_secs()
        );

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            match self.run_scan().await {
                Ok(report) => {
                    if report.warnings > 0 || report.replacements > 0 {
                        info!(
                            "Escaneo completado: {} avisos, {} cambios, {} saltadas",
                            report.warnings, report.replacements, report.skipped
                        );
                    }
                }
                Err(e) => error!("Error al verificar neumáticos: {}", e),
            }
        }
    }
}
