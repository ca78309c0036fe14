//! Delivery configuration

use lettre::{message::Mailbox, Address};
use serde::{Deserialize, Serialize};

use crate::errors::RoutingError;

pub const DEFAULT_FROM_ADDRESS: &str = "no-reply@deskmail.local";
pub const DEFAULT_FROM_NAME: &str = "Deskmail";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsMode {
    None,     // No encryption
    Starttls, // STARTTLS (opportunistic TLS)
    Tls,      // Direct TLS connection
}

impl TlsMode {
    pub fn from_str(s: &str) -> Result<Self, RoutingError> {
        match s.trim().to_lowercase().as_str() {
            "none" | "plain" => Ok(TlsMode::None),
            "starttls" => Ok(TlsMode::Starttls),
            "tls" | "smtps" => Ok(TlsMode::Tls),
            _ => Err(RoutingError::Configuration(format!(
                "Unknown SMTP TLS mode: {}",
                s
            ))),
        }
    }
}

fn default_tls_mode() -> TlsMode {
    TlsMode::Starttls
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_tls_mode")]
    pub tls_mode: TlsMode,
    /// Accept self-signed certificates (use with caution)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// System mailbox every batch is sent from
    pub from_address: String,
    pub from_name: String,
    /// No SMTP relay means batches are captured, not sent
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            smtp: None,
        }
    }
}

impl DeliveryConfig {
    /// Load from `DESKMAIL_*` environment variables
    pub fn from_env() -> Result<Self, RoutingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RoutingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let smtp = match get("DESKMAIL_SMTP_HOST") {
            Some(host) => {
                let port = match get("DESKMAIL_SMTP_PORT") {
                    Some(port) => port.trim().parse::<u16>().map_err(|e| {
                        RoutingError::Configuration(format!("Invalid DESKMAIL_SMTP_PORT: {}", e))
                    })?,
                    None => DEFAULT_SMTP_PORT,
                };
                let tls_mode = match get("DESKMAIL_SMTP_TLS") {
                    Some(mode) => TlsMode::from_str(&mode)?,
                    None => default_tls_mode(),
                };
                let accept_invalid_certs = get("DESKMAIL_SMTP_ACCEPT_INVALID_CERTS")
                    .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(false);

                Some(SmtpConfig {
                    host: host.trim().to_string(),
                    port,
                    username: get("DESKMAIL_SMTP_USERNAME"),
                    password: get("DESKMAIL_SMTP_PASSWORD"),
                    tls_mode,
                    accept_invalid_certs,
                })
            }
            None => None,
        };

        let config = Self {
            from_address: get("DESKMAIL_FROM_ADDRESS")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: get("DESKMAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            smtp,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        self.mailbox().map(|_| ())
    }

    /// Sender mailbox; the display name is dropped when blank
    pub fn mailbox(&self) -> Result<Mailbox, RoutingError> {
        let address = self.from_address.trim().parse::<Address>().map_err(|e| {
            RoutingError::Configuration(format!(
                "Invalid from address '{}': {}",
                self.from_address, e
            ))
        })?;
        let name = self.from_name.trim();
        let name = (!name.is_empty()).then(|| name.to_string());
        Ok(Mailbox::new(name, address))
    }

    /// From header value for outbound batches, quoted where the name needs it
    pub fn from_header(&self) -> Result<String, RoutingError> {
        Ok(self.mailbox()?.to_string())
    }
}
