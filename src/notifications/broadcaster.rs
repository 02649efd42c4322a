//! Difusor de eventos en tiempo real
//!
//! Canal broadcast de tokio detrás de una conexión SSE por cliente.
//! Un suscriptor lento pierde eventos (lagged) pero nunca bloquea al
//! escáner ni a los demás suscriptores.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

use super::events::TireEvent;

/// Difusor de eventos a todos los suscriptores conectados
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<TireEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        info!("Difusor de eventos inicializado con capacidad {}", capacity);
        Self { tx }
    }

    /// Difunde el evento ignorando si no hay suscriptores conectados
    pub fn broadcast_lossy(&self, event: TireEvent) {
        match self.tx.send(event) {
            Ok(count) => debug!("Evento difundido a {} suscriptores", count),
            Err(_) => debug!("Evento descartado: sin suscriptores conectados"),
        }
    }

    /// Cantidad de suscriptores conectados
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Receptor crudo del canal de eventos
    pub fn subscribe(&self) -> broadcast::Receiver<TireEvent> {
        self.tx.subscribe()
    }

    /// Flujo SSE para una conexión nueva
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.subscribe();
        let stream = BroadcastStream::new(rx);

        stream.filter_map(|result| async move {
            match result {
                Ok(tire_event) => Event::default().json_data(&tire_event).ok().map(Ok),
                Err(e) => {
                    // Suscriptor rezagado: se saltan eventos, no se corta la conexión
                    warn!("Suscriptor SSE rezagado: {:?}", e);
                    None
                }
            }
        })
    }

    /// Respuesta SSE de axum para GET /api/events
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        info!(
            "Nuevo suscriptor SSE conectado, total: {}",
            self.client_count() + 1
        );

        Sse::new(self.subscribe_stream()).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::events::TireEventKind;

    #[tokio::test]
    async fn test_subscribers_receive_broadcast_events() {
        let broadcaster = EventBroadcaster::new(16);
        let mut rx = broadcaster.subscribe();

        broadcaster.broadcast_lossy(TireEvent::nothing_to_report());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, TireEventKind::Info);
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers_does_not_fail() {
        let broadcaster = EventBroadcaster::new(16);
        assert_eq!(broadcaster.client_count(), 0);

        // No debe entrar en pánico ni devolver error
        broadcaster.broadcast_lossy(TireEvent::nothing_to_report());
    }
}
