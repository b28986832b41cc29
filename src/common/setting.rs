//! settings: optional config_{ENV}.toml file, overridden by environment variables

use std::env;
use std::fs;
use serde_derive::Deserialize;

use super::error::ServiceError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Default, Deserialize)]
struct FileEnv {
    log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileWeb {
    web_host: Option<String>,
    web_port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDatabase {
    url: Option<String>,
}

/// config file layout, every section optional
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    #[serde(default)]
    env: FileEnv,
    #[serde(default)]
    web: FileWeb,
    #[serde(default)]
    database: FileDatabase,
}

#[derive(Debug, Clone)]
pub struct Env {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Web {
    pub web_host: String,
    pub web_port: u16
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Env,
    pub web: Web,
    pub database: Database,
}

impl Settings {
    /// load from the process environment and `config_{ENV}.toml` if that file exists
    pub fn load() -> Result<Self, ServiceError> {
        let env_name = env::var("ENV").unwrap_or_else(|_| String::from("dev"));
        let file_path = format!("config_{}.toml", env_name);
        let file_content = fs::read_to_string(file_path.as_str()).ok();
        Self::from_sources(env_name, file_content.as_deref(), |key| env::var(key).ok())
    }

    /// build settings from a config file body and a variable lookup, variables win
    pub fn from_sources(
        env_name: String,
        file_content: Option<&str>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServiceError> {
        let file: FileSettings = match file_content {
            Some(content) => toml::from_str(content)
                .map_err(|e| ServiceError::internal(format!("config file format invalid: {e}")))?,
            None => FileSettings::default(),
        };

        let url = var("DATABASE_URL")
            .or(file.database.url)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ServiceError::internal("Missing DATABASE_URL environment variable"))?;

        let web_port = match var("PORT") {
            Some(port) => port.trim().parse::<u16>()
                .map_err(|e| ServiceError::internal(format!("PORT is not a valid port number: {e}")))?,
            None => file.web.web_port.unwrap_or(DEFAULT_PORT),
        };

        Ok(Settings {
            env: Env {
                env: env_name,
                log_level: var("LOG_LEVEL").or(file.env.log_level).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            web: Web {
                web_host: var("HOST").or(file.web.web_host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
                web_port,
            },
            database: Database { url },
        })
    }
}
