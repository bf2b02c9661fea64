use std::{fmt, str::FromStr};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use secrecy::{ExposeSecret, SecretBox};

use crate::domain::subscriber_email::SubscriberEmail;
use crate::email_client::EmailClient;

#[derive(Deserialize)]
pub struct Settings {
    pub app_settings: AppSettings,
    pub database: DBSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Deserialize)]
pub struct AppSettings {
    pub host: [u8; 4], // IPv4 address
    pub port: u16,
    pub storage: StorageBackend,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    InMemory,
}

#[derive(Deserialize)]
pub struct DBSettings {
    pub username: String,
    pub password: SecretBox<String>,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub authorization_token: SecretBox<String>,
    pub timeout_milliseconds: u64,
}

enum RunningEnv {
    Local,
    Production,
}

impl RunningEnv {
    pub fn as_str(&self) -> &str {
        match self {
            RunningEnv::Local => "local",
            RunningEnv::Production => "production",
        }
    }
}

impl fmt::Display for RunningEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RunningEnv {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(RunningEnv::Local),
            "production" => Ok(RunningEnv::Production),
            _ => Err("Invalid environment specified"),
        }
    }
}

impl DBSettings {
    pub fn get_connection(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name
        )
    }

    pub fn get_connection_without_database(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<SubscriberEmail, String> {
        self.sender_email.parse()
    }

    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        let sender = self.sender().map_err(anyhow::Error::msg)?;
        EmailClient::new(
            &self.base_url,
            sender,
            SecretBox::new(Box::new(
                self.authorization_token.expose_secret().clone(),
            )),
            self.timeout_milliseconds,
        )
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let current_dir = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to get current directory: {e}"))
    })?;
    let config_path = current_dir.join("configurations");

    let running_env =
        std::env::var("RUNNING_ENV").unwrap_or_else(|_| "local".to_string());
    let running_env: RunningEnv = running_env.as_str().parse().map_err(
        |err| ConfigError::Message(format!("Failed to parse RUNNING_ENV: {err}")),
    )?;

    let app_config_file = format!("{running_env}.yaml");
    let config = Config::builder()
        .add_source(File::from(config_path.join("base.yaml")))
        .add_source(File::from(config_path.join(app_config_file)))
        .add_source(Environment::with_prefix("EVENTEX").separator("__"))
        .build()?;

    config.try_deserialize::<Settings>()
}
