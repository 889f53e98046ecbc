use super::FileConfig;
use crate::errors::Error;
use std::fs;

use tracing::info;

/// Loads and parses the application configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML configuration file
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a FileConfig
pub fn load_file_config(file_path: &str) -> Result<FileConfig, Error> {
    let yaml_str = fs::read_to_string(file_path)?;
    let config: FileConfig = serde_yaml::from_str(&yaml_str)?;
    info!("Loaded configuration from {}", file_path);
    Ok(config)
}
