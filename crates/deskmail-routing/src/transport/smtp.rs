//! SMTP transport built on lettre

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParametersBuilder},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, error, warn};

use super::traits::{OutboundEmail, Transport, TransportError, TransportReceipt};
use crate::config::{SmtpConfig, TlsMode};
use crate::errors::RoutingError;

pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, RoutingError> {
        let configuration_error =
            |e: lettre::transport::smtp::Error| RoutingError::Configuration(e.to_string());

        // Local relays commonly run with self-signed certificates
        let relaxed = config.accept_invalid_certs
            || config.host == "localhost"
            || config.host == "127.0.0.1";

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) if !username.is_empty() => {
                Some(Credentials::new(username.clone(), password.clone()))
            }
            _ => None,
        };

        let mailer = match config.tls_mode {
            TlsMode::None => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                        .port(config.port);
                if let Some(credentials) = credentials {
                    builder = builder.credentials(credentials);
                }
                builder.build()
            }
            TlsMode::Starttls => {
                let tls = TlsParametersBuilder::new(config.host.clone())
                    .dangerous_accept_invalid_certs(relaxed)
                    .dangerous_accept_invalid_hostnames(relaxed)
                    .build()
                    .map_err(configuration_error)?;
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                        .port(config.port)
                        .tls(Tls::Required(tls));
                if let Some(credentials) = credentials {
                    builder = builder.credentials(credentials);
                }
                builder.build()
            }
            TlsMode::Tls => {
                let tls = TlsParametersBuilder::new(config.host.clone())
                    .dangerous_accept_invalid_certs(relaxed)
                    .dangerous_accept_invalid_hostnames(relaxed)
                    .build()
                    .map_err(configuration_error)?;
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                    .map_err(configuration_error)?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls));
                if let Some(credentials) = credentials {
                    builder = builder.credentials(credentials);
                }
                builder.build()
            }
        };

        Ok(Self {
            mailer,
            host: config.host.clone(),
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build the MIME message for a batch, returning it with its Message-ID
pub(crate) fn build_message(email: &OutboundEmail) -> Result<(Message, String), TransportError> {
    let from = parse_mailbox(&email.from)?;
    let domain = from.email.domain().to_string();
    let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), domain);

    let mut builder = Message::builder()
        .from(from)
        .subject(email.subject.clone())
        .message_id(Some(message_id.clone()));

    for address in &email.to {
        builder = builder.to(parse_mailbox(address)?);
    }
    if let Some(cc) = &email.cc {
        for address in cc {
            builder = builder.cc(parse_mailbox(address)?);
        }
    }
    // Reply-To is optional metadata and never blocks a batch
    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => warn!("Dropping unparseable Reply-To '{}': {}", reply_to, e),
        }
    }

    let message = builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| TransportError::Build(e.to_string()))?;

    Ok((message, message_id))
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<TransportReceipt, TransportError> {
        let (message, message_id) = build_message(email)?;

        debug!(
            "Sending '{}' via SMTP relay {} to {} recipient(s)",
            email.subject,
            self.host,
            email.recipient_count()
        );

        self.mailer.send(message).await.map_err(|e| {
            error!("SMTP delivery via {} failed: {}", self.host, e);
            TransportError::Smtp(e.to_string())
        })?;

        Ok(TransportReceipt {
            message_id: Some(message_id),
        })
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
