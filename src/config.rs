use anyhow::{anyhow, Context, Result};
use std::env;

use crate::payments::acquirer::AcquirerConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub acquirer: AcquirerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        };

        let acquirer = AcquirerConfig {
            base_url: env::var("ACQUIRER_BASE_URL").context("ACQUIRER_BASE_URL not set")?,
            timeout_secs: env::var("ACQUIRER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("ACQUIRER_TIMEOUT_SECS must be a valid number")?,
        };

        let config = Config { server, acquirer };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        if self.acquirer.base_url.trim().is_empty() {
            return Err(anyhow!("ACQUIRER_BASE_URL cannot be empty"));
        }

        if self.acquirer.timeout_secs == 0 {
            return Err(anyhow!("ACQUIRER_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
