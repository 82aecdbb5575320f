//! Listener and credential configuration.

use fedsvc_auth::SharedSecret;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected an integer in 0..=65535")]
    InvalidPort(String),

    #[error("invalid SETUP_FAULT_ONE_IN {0:?}: expected a positive integer")]
    InvalidFaultRate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    host: String,
    port: u16,
    auth_token: SharedSecret,
    setup_fault_one_in: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            auth_token: SharedSecret::default(),
            setup_fault_one_in: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_auth_token(mut self, token: SharedSecret) -> Self {
        self.auth_token = token;
        self
    }

    /// Make roughly one in `n` repository setups fail.
    pub fn with_setup_fault_one_in(mut self, n: u32) -> Self {
        self.setup_fault_one_in = Some(n);
        self
    }

    /// Read `HOST`, `PORT`, `AUTH_TOKEN` and `SETUP_FAULT_ONE_IN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(token) = lookup("AUTH_TOKEN").filter(|t| !t.is_empty()) {
            config.auth_token = SharedSecret::new(token);
        }
        if let Some(rate) = lookup("SETUP_FAULT_ONE_IN").filter(|r| !r.is_empty()) {
            let n: u32 = rate
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidFaultRate(rate.clone()))?;
            if n == 0 {
                return Err(ConfigError::InvalidFaultRate(rate));
            }
            config.setup_fault_one_in = Some(n);
        }

        Ok(config)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn auth_token(&self) -> &SharedSecret {
        &self.auth_token
    }

    pub fn setup_fault_one_in(&self) -> Option<u32> {
        self.setup_fault_one_in
    }

    /// `host:port`; an empty host binds every interface.
    pub fn addr(&self) -> String {
        let host = if self.host.is_empty() { "0.0.0.0" } else { &self.host };
        format!("{host}:{}", self.port)
    }
}
