use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Loaded from the `SMTP_*` variables, never from the layered sources.
    #[serde(skip)]
    pub mail: Option<MailConfig>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Contact-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins"),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;
        config.database_url = fill_or_env(config.database_url, "APP_DATABASE_URL")?;
        config.mail = MailConfig::from_env()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP settings for the contact notification.
///
/// Exists only as a whole: username, password and sender must all be set,
/// otherwise notification is disabled.
#[derive(Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when `true`, opportunistic STARTTLS otherwise.
    pub secure: bool,
    pub username: String,
    pub password: Zeroizing<String>,
    pub from: String,
    pub recipient: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (Some(username), Some(password), Some(from)) =
            (get("SMTP_USER"), get("SMTP_PASS"), get("SMTP_FROM"))
        else {
            return Ok(None);
        };

        let port = match get("SMTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::Message(format!("Invalid SMTP_PORT value: {}", raw))
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let recipient = get("CONTACT_EMAIL").unwrap_or_else(|| from.clone());

        Ok(Some(MailConfig {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port,
            secure: lookup("SMTP_SECURE").as_deref() == Some("true"),
            username,
            password: Zeroizing::new(password),
            from,
            recipient,
        }))
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &self.password.redact())
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("mail", &self.mail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const COMPLETE: &[(&str, &str)] = &[
        ("SMTP_USER", "mailer"),
        ("SMTP_PASS", "hunter2"),
        ("SMTP_FROM", "site@example.com"),
    ];

    #[test]
    fn mail_config_requires_user_password_and_sender() {
        for missing in ["SMTP_USER", "SMTP_PASS", "SMTP_FROM"] {
            let pairs: Vec<_> = COMPLETE.iter().copied().filter(|(k, _)| *k != missing).collect();
            let config = MailConfig::from_lookup(lookup_from(&pairs)).unwrap();
            assert!(config.is_none(), "{missing} absent should disable mail");
        }
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = MailConfig::from_lookup(lookup_from(&[
            ("SMTP_USER", "mailer"),
            ("SMTP_PASS", ""),
            ("SMTP_FROM", "site@example.com"),
        ]))
        .unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn mail_config_defaults() {
        let config = MailConfig::from_lookup(lookup_from(COMPLETE)).unwrap().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert_eq!(config.recipient, "site@example.com");
    }

    #[test]
    fn secure_flag_only_accepts_literal_true() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("SMTP_SECURE", "TRUE"));
        let config = MailConfig::from_lookup(lookup_from(&pairs)).unwrap().unwrap();
        assert!(!config.secure);

        let mut pairs = COMPLETE.to_vec();
        pairs.push(("SMTP_SECURE", "true"));
        pairs.push(("SMTP_PORT", "465"));
        pairs.push(("CONTACT_EMAIL", "owner@example.com"));
        let config = MailConfig::from_lookup(lookup_from(&pairs)).unwrap().unwrap();
        assert!(config.secure);
        assert_eq!(config.port, 465);
        assert_eq!(config.recipient, "owner@example.com");
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("SMTP_PORT", "smtp"));
        assert!(MailConfig::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = MailConfig::from_lookup(lookup_from(COMPLETE)).unwrap().unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
