//! Application configuration loaded via OrthoConfig.
//!
//! Every knob can come from the environment (prefix `ARENA_`), a config
//! file, or CLI flags; all fields are optional with accessor fallbacks so a
//! bare process starts against the in-memory backend.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MONGO_DATABASE: &str = "game_booking";
const DEFAULT_MYSQL_POOL_SIZE: u32 = 10;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Which storage adapter to activate at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Map-backed store, no persistence. The default.
    #[default]
    Memory,
    /// Relational store via Diesel.
    Mysql,
    /// Document store via the MongoDB driver.
    Mongodb,
}

/// SMTP settings assembled from the optional mail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// Relay hostname.
    pub relay: String,
    /// Relay port, 587 unless overridden.
    pub port: u16,
    /// Authentication username.
    pub username: String,
    /// Authentication password.
    pub password: String,
    /// Sender mailbox, e.g. `Arena <bookings@example.com>`.
    pub from: String,
}

/// Startup configuration for the booking service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARENA")]
pub struct AppSettings {
    /// Storage backend selection; defaults to in-memory.
    pub storage: Option<StorageBackend>,
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// MySQL connection URL; required when `storage = mysql`.
    pub mysql_url: Option<String>,
    /// Maximum MySQL pool size.
    pub mysql_pool_size: Option<u32>,
    /// MongoDB connection URI; required when `storage = mongodb`.
    pub mongo_uri: Option<String>,
    /// MongoDB database name.
    pub mongo_database: Option<String>,
    /// SMTP relay hostname; notifications are disabled when unset.
    pub smtp_relay: Option<String>,
    /// SMTP relay port.
    pub smtp_port: Option<u16>,
    /// SMTP username.
    pub smtp_username: Option<String>,
    /// SMTP password.
    pub smtp_password: Option<String>,
    /// Sender mailbox for confirmation mail.
    pub smtp_from: Option<String>,
}

impl AppSettings {
    /// The selected storage backend, defaulting to in-memory.
    #[must_use]
    pub fn storage(&self) -> StorageBackend {
        self.storage.unwrap_or_default()
    }

    /// The listen address, defaulting to `0.0.0.0:5000`.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Maximum MySQL pool size, defaulting to 10.
    #[must_use]
    pub fn mysql_pool_size(&self) -> u32 {
        self.mysql_pool_size.unwrap_or(DEFAULT_MYSQL_POOL_SIZE)
    }

    /// MongoDB database name, defaulting to `game_booking`.
    #[must_use]
    pub fn mongo_database(&self) -> &str {
        self.mongo_database
            .as_deref()
            .unwrap_or(DEFAULT_MONGO_DATABASE)
    }

    /// Assemble SMTP settings when a relay and sender are configured.
    ///
    /// Username and password default to empty strings for relays that do
    /// not authenticate.
    #[must_use]
    pub fn smtp(&self) -> Option<SmtpSettings> {
        let relay = self.smtp_relay.clone()?;
        let from = self.smtp_from.clone()?;
        Some(SmtpSettings {
            relay,
            port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
            username: self.smtp_username.clone().unwrap_or_default(),
            password: self.smtp_password.clone().unwrap_or_default(),
            from,
        })
    }
}
