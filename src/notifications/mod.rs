//! Notificaciones en tiempo real y por correo
//!
//! El despachador tiene dos salidas: eventos SSE para los tableros
//! conectados y correo para el responsable del vehículo. Ambas se
//! inyectan en el escáner de desgaste, nunca se leen de estado global.

pub mod broadcaster;
pub mod email;
pub mod events;

pub use broadcaster::EventBroadcaster;
pub use email::{EmailNotifier, LettreMailer};
pub use events::{TireEvent, TireEventKind};
