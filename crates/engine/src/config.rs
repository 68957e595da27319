use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout after which a session is treated as expired.
    pub timeout_secs: u64,
    /// Interval between background sweeps of expired sessions.
    pub sweep_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: "0.0.0.0:8080".to_string(),
            },
            session: SessionConfig {
                timeout_secs: 2 * 60 * 60,
                sweep_interval_secs: 15 * 60,
            },
        }
    }
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let defaults = Config::default();
        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR").unwrap_or(defaults.server.addr),
            },
            session: SessionConfig {
                timeout_secs: read_secs("SESSION_TIMEOUT_SECS", defaults.session.timeout_secs)?,
                sweep_interval_secs: read_secs(
                    "SESSION_SWEEP_INTERVAL_SECS",
                    defaults.session.sweep_interval_secs,
                )?,
            },
        };

        if config.session.timeout_secs == 0 {
            return Err(crate::Error::Config(
                "SESSION_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

fn read_secs(var: &str, default: u64) -> crate::Result<u64> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| crate::Error::Config(format!("{} must be an integer: {}", var, raw))),
        Err(_) => Ok(default),
    }
}
