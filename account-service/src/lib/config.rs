use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub otp: OtpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OtpConfig {
    pub ttl_minutes: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything lives in one test.
    #[test]
    fn test_env_vars_override_configuration() {
        let vars = [
            ("DATABASE__URL", "postgresql://env-host:5432/accounts"),
            ("SERVER__HTTP_PORT", "9090"),
            ("JWT__SECRET", "env-secret"),
            ("JWT__EXPIRATION_SECONDS", "1800"),
            ("SMTP__HOST", "smtp.env.example.com"),
            ("SMTP__PORT", "2525"),
            ("SMTP__USERNAME", "env-user"),
            ("SMTP__PASSWORD", "env-pass"),
            ("SMTP__FROM", "Env Sender <env@example.com>"),
            ("OTP__TTL_MINUTES", "5"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        // Unit tests run from the crate directory, where no config/ files
        // exist; the env source alone must produce a complete Config.
        let config = Config::load().expect("Failed to load config from env vars");

        for (key, _) in vars {
            std::env::remove_var(key);
        }

        assert_eq!(config.database.url, "postgresql://env-host:5432/accounts");
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.jwt.secret, "env-secret");
        assert_eq!(config.jwt.expiration_seconds, 1800);
        assert_eq!(config.smtp.host, "smtp.env.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.otp.ttl_minutes, 5);
    }
}
