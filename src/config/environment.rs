//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Cadencia del escaneo periódico de desgaste, en segundos
    pub wear_scan_interval_secs: u64,
    /// Capacidad del canal de eventos en tiempo real
    pub event_buffer_size: usize,
    // SMTP opcional: sin SMTP_HOST los correos se escriben a disco
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub smtp_from: String,
    pub email_file_dir: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            wear_scan_interval_secs: env::var("WEAR_SCAN_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .expect("WEAR_SCAN_INTERVAL_SECS must be a valid number"),
            event_buffer_size: env::var("EVENT_BUFFER_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("EVENT_BUFFER_SIZE must be a valid number"),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT must be a valid number"),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "flota@localhost".to_string()),
            email_file_dir: env::var("EMAIL_FILE_DIR").unwrap_or_else(|_| "./emails".to_string()),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
