//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y la extracción de la
//! identidad del usuario que llama.

pub mod cors;
pub mod current_user;

pub use cors::*;
pub use current_user::*;
