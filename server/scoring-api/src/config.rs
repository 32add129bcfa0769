//! Server settings from the environment.

use std::net::IpAddr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5005;
pub const DEFAULT_BIND_ADDR: [u8; 4] = [127, 0, 0, 1];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
  #[error("{var} must be a valid {expected}, got {value:?}")]
  Invalid {
    var: &'static str,
    expected: &'static str,
    value: String,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
  pub bind_addr: IpAddr,
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_addr: IpAddr::from(DEFAULT_BIND_ADDR),
      port: DEFAULT_PORT,
    }
  }
}

impl ServerConfig {
  /// `PORT` and `BIND_ADDR`; unset variables keep their defaults.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();
    if let Some(value) = lookup("PORT") {
      config.port = value.trim().parse().map_err(|_| ConfigError::Invalid {
        var: "PORT",
        expected: "u16",
        value: value.clone(),
      })?;
    }
    if let Some(value) = lookup("BIND_ADDR") {
      config.bind_addr = value.trim().parse().map_err(|_| ConfigError::Invalid {
        var: "BIND_ADDR",
        expected: "IP address",
        value: value.clone(),
      })?;
    }
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_variables_use_defaults() {
    let config = ServerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 5005);
    assert!(config.bind_addr.is_loopback());
  }

  #[test]
  fn variables_override_defaults() {
    let config = ServerConfig::from_lookup(|key| match key {
      "PORT" => Some("8080".into()),
      "BIND_ADDR" => Some("0.0.0.0".into()),
      _ => None,
    })
    .unwrap();
    assert_eq!(config.port, 8080);
    assert!(config.bind_addr.is_unspecified());
  }

  #[test]
  fn invalid_port_is_reported() {
    let err = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string())).unwrap_err();
    assert_eq!(err.to_string(), "PORT must be a valid u16, got \"http\"");
  }
}
