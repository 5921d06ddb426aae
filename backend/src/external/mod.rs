//! External service integrations

pub mod mailer;

pub use mailer::{MailTransport, OutgoingMail, SmtpMailer, TransportError};
