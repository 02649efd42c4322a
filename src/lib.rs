//! Fleet Maintenance - Gestión de neumáticos de flota
//!
//! API REST para el ciclo de vida de neumáticos: registro, montaje en
//! vehículos, predicción de desgaste por kilometraje y notificaciones
//! (SSE + email) cuando un neumático se acerca a su cambio.

pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
