//! SMTP mail delivery

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::MailConfig;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid mail address: {0}")]
    Address(String),
    #[error("Failed to build message: {0}")]
    Message(String),
    #[error("Failed to send mail: {0}")]
    Send(String),
    #[error("Mail transport configuration error: {0}")]
    Configuration(String),
}

/// A report mail ready for delivery. Recipients are already resolved
/// and deduplicated by the caller.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment_mime: String,
    pub attachment: Vec<u8>,
}

/// Delivery seam for the export engine. The production implementation
/// speaks SMTP; tests substitute a recording double.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError>;
}

/// SMTP-backed transport built from [`MailConfig`]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, TransportError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| TransportError::Configuration(format!("SMTP relay setup failed: {}", e)))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| {
                TransportError::Configuration(format!(
                    "Invalid sender address {}: {}",
                    config.from_address, e
                ))
            })?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.clone());

        for recipient in &mail.recipients {
            let mailbox = recipient
                .parse::<Mailbox>()
                .map_err(|e| TransportError::Address(format!("{}: {}", recipient, e)))?;
            builder = builder.to(mailbox);
        }

        let content_type = ContentType::parse(&mail.attachment_mime)
            .map_err(|e| TransportError::Message(format!("{}: {}", mail.attachment_mime, e)))?;

        let message = builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(
                        Attachment::new(mail.attachment_name.clone())
                            .body(mail.attachment.clone(), content_type),
                    ),
            )
            .map_err(|e| TransportError::Message(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        tracing::info!(
            "Report mail sent to {} recipient(s): {}",
            mail.recipients.len(),
            mail.subject
        );
        Ok(())
    }
}
