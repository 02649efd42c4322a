//! DTOs de la API HTTP
//!
//! Requests con validación declarativa y responses serializables;
//! la conversión a los tipos de dominio vive junto a cada request.

pub mod installation_dto;
pub mod tire_dto;
