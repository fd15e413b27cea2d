use crate::calculators::{InputPolicy, SharedInputs};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub calculators: CalculatorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            calculators: CalculatorConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Seed values for the shared inputs and the parse policy applied to raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub defaults: SharedInputs,
    pub input_policy: InputPolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            defaults: SharedInputs::default(),
            input_policy: InputPolicy::Lenient,
        }
    }
}

impl CalculatorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("HR_DEFAULT_EMPLOYEES") {
            config.defaults.total_employees = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidDefault {
                    key: "HR_DEFAULT_EMPLOYEES",
                    value: raw.clone(),
                })?;
        }

        if let Ok(raw) = env::var("HR_DEFAULT_AVG_SALARY") {
            config.defaults.avg_salary = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|salary| salary.is_finite() && *salary >= 0.0)
                .ok_or_else(|| ConfigError::InvalidDefault {
                    key: "HR_DEFAULT_AVG_SALARY",
                    value: raw.clone(),
                })?;
        }

        if let Ok(raw) = env::var("HR_INPUT_POLICY") {
            config.input_policy =
                InputPolicy::parse(&raw).ok_or(ConfigError::InvalidInputPolicy { value: raw })?;
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDefault { key: &'static str, value: String },
    InvalidInputPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDefault { key, value } => {
                write!(f, "{key} must be a non-negative number (got '{value}')")
            }
            ConfigError::InvalidInputPolicy { value } => {
                write!(f, "HR_INPUT_POLICY must be 'lenient' or 'strict' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidDefault { .. }
            | ConfigError::InvalidInputPolicy { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("HR_DEFAULT_EMPLOYEES");
        env::remove_var("HR_DEFAULT_AVG_SALARY");
        env::remove_var("HR_INPUT_POLICY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.calculators.defaults.total_employees, 100);
        assert_eq!(config.calculators.defaults.avg_salary, 40_000.0);
        assert_eq!(config.calculators.input_policy, InputPolicy::Lenient);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_calculator_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HR_DEFAULT_EMPLOYEES", "250");
        env::set_var("HR_DEFAULT_AVG_SALARY", "52000.5");
        env::set_var("HR_INPUT_POLICY", "Strict");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.calculators.defaults.total_employees, 250);
        assert_eq!(config.calculators.defaults.avg_salary, 52_000.5);
        assert_eq!(config.calculators.input_policy, InputPolicy::Strict);
        reset_env();
    }

    #[test]
    fn rejects_negative_default_salary() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HR_DEFAULT_AVG_SALARY", "-10");
        let err = AppConfig::load().expect_err("negative salary rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidDefault {
                key: "HR_DEFAULT_AVG_SALARY",
                ..
            }
        ));
        reset_env();
    }
}
