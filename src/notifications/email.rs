//! Notificación por correo
//!
//! Con SMTP_HOST configurado los correos salen por SMTP (STARTTLS);
//! sin él se escriben como archivos en EMAIL_FILE_DIR, útil en
//! desarrollo y staging.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::path::Path;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Transporte de correo del sistema
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

enum MailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

/// Implementación sobre lettre con transporte SMTP o a disco
pub struct LettreMailer {
    transport: MailTransport,
    from: Mailbox,
}

impl LettreMailer {
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Internal(format!("SMTP_FROM inválido: {}", e)))?;

        let transport = match &config.smtp_host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| {
                        AppError::Internal(format!("No se pudo crear el transporte SMTP: {}", e))
                    })?
                    .port(config.smtp_port);

                if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }

                log::info!("📮 Transporte SMTP configurado: {}:{}", host, config.smtp_port);
                MailTransport::Smtp(builder.build())
            }
            None => {
                let dir = Path::new(&config.email_file_dir);
                if !dir.exists() {
                    std::fs::create_dir_all(dir).map_err(|e| {
                        AppError::Internal(format!(
                            "No se pudo crear el directorio de correos: {}",
                            e
                        ))
                    })?;
                }

                log::info!(
                    "📮 SMTP no configurado; los correos se escriben en {}",
                    config.email_file_dir
                );
                MailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(dir))
            }
        };

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailNotifier for LettreMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::Notification(format!("destinatario inválido '{}': {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Notification(format!("no se pudo construir el correo: {}", e)))?;

        match &self.transport {
            MailTransport::Smtp(transport) => transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| AppError::Notification(e.to_string()))?,
            MailTransport::File(transport) => transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| AppError::Notification(e.to_string()))?,
        }

        log::info!("📧 Email enviado a {}: {}", to, subject);
        Ok(())
    }
}
