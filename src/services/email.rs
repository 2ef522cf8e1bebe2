//! Outbound mail for the password reset flow.
//!
//! With no SMTP host configured the service runs in no-op mode and only
//! logs, which keeps development and tests free of mail infrastructure.

use anyhow::{Context, Result};
use lettre::message::{Mailbox, Message, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EmailConfig;

#[derive(Clone)]
pub struct EmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .context("Invalid smtp_from address")?;

        let transport = if config.smtp_host.trim().is_empty() {
            warn!("SMTP host not configured; email service will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            }
            .context("Failed to configure SMTP transport")?
            .port(config.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Deliver a freshly issued reset secret.
    pub async fn send_otp(&self, recipient: &str, otp: i32, ttl_minutes: i64) -> Result<()> {
        let subject = "Forgot Password";
        let body = format!(
            "Your OTP is {otp}\n\nIt expires in {ttl_minutes} minutes and can be used once.\nIf you did not request this, please ignore this email."
        );
        self.send_mail(recipient, subject, &body).await
    }

    async fn send_mail(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        if let Some(transport) = &self.transport {
            let to = recipient
                .parse::<Mailbox>()
                .context("Invalid recipient email address")?;

            let email = Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(subject)
                .header(header::ContentType::TEXT_PLAIN)
                .body(body.to_string())
                .context("Failed to build email message")?;

            transport
                .send(email)
                .await
                .context("Failed to send email")?;
            info!(subject, "email sent successfully");
        } else {
            info!(
                subject,
                recipient, "Email service running in no-op mode; skipping actual send"
            );
        }
        Ok(())
    }
}
