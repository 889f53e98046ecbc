mod parser;
use crate::constants::*;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub use parser::load_file_config;

/// Settings as written in the optional YAML configuration file
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Full URL of the chat endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// One draft is generated per temperature
    #[serde(default)]
    pub temperatures: Option<Vec<f32>>,
    /// Connect / response timeout, e.g. "10s"
    #[serde(default)]
    pub timeout: Option<String>,
    /// Directory receiving saved reports
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,
    /// SQLite file holding client records
    #[serde(default)]
    pub database_path: Option<String>,
    /// Port of the web form
    #[serde(default)]
    pub listen_port: Option<u16>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: Url,
    pub model: String,
    pub temperatures: Vec<f32>,
    pub timeout: Duration,
    pub documents_dir: PathBuf,
    pub database_path: String,
    pub listen_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            temperatures: DEFAULT_TEMPERATURES.to_vec(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            listen_port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from an optional file and the process environment.
    pub fn load(file_path: Option<&str>) -> Result<Self, Error> {
        let file = match file_path {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merges defaults, file settings and environment variables, in that order.
    ///
    /// # Arguments
    /// * `file` - Settings read from the YAML file
    /// * `env` - Lookup for environment variables
    pub fn resolve<F>(file: FileConfig, env: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(endpoint) = env("OLLAMA_URL").or(file.endpoint) {
            config.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(model) = env("OLLAMA_MODEL").or(file.model) {
            if model.trim().is_empty() {
                return Err(Error::InvalidConfig("model must not be empty".into()));
            }
            config.model = model;
        }
        if let Some(temperatures) = file.temperatures {
            config.temperatures = validate_temperatures(temperatures)?;
        }
        if let Some(timeout) = file.timeout {
            config.timeout = humantime::parse_duration(&timeout)
                .map_err(|e| Error::InvalidConfig(format!("timeout '{}': {}", timeout, e)))?;
        }
        if let Some(dir) = env("DOCUMENTS_DIR").map(PathBuf::from).or(file.documents_dir) {
            config.documents_dir = dir;
        }
        if let Some(path) = env("DATABASE_PATH").or(file.database_path) {
            config.database_path = path;
        }
        if let Some(port) = file.listen_port {
            config.listen_port = port;
        }

        Ok(config)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw)
        .map_err(|e| Error::InvalidConfig(format!("endpoint '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidConfig(format!(
            "endpoint scheme must be http or https, got '{}'",
            other
        ))),
    }
}

fn validate_temperatures(temperatures: Vec<f32>) -> Result<Vec<f32>, Error> {
    if temperatures.is_empty() {
        return Err(Error::InvalidConfig("at least one temperature is required".into()));
    }
    if let Some(t) = temperatures
        .iter()
        .find(|t| !(0.0..=MAX_TEMPERATURE).contains(*t))
    {
        return Err(Error::InvalidConfig(format!(
            "temperature {} outside 0.0..={}",
            t, MAX_TEMPERATURE
        )));
    }
    Ok(temperatures)
}
