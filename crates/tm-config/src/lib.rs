//! tm-config: profile document format, migration and validation.

pub mod loader;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use loader::{load_parameters, load_segments};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_document};

use std::path::Path;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Profile data error: {0}")]
    Motion(#[from] tm_profile::MotionError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encodings, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn finish(doc: ProfileDocument) -> ConfigResult<ProfileDocument> {
    let doc = migrate_to_latest(doc)?;
    validate_document(&doc)?;
    Ok(doc)
}

pub fn from_yaml_str(content: &str) -> ConfigResult<ProfileDocument> {
    finish(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ConfigResult<ProfileDocument> {
    finish(serde_json::from_str(content)?)
}

pub fn load_yaml(path: &Path) -> ConfigResult<ProfileDocument> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, doc: &ProfileDocument) -> ConfigResult<()> {
    validate_document(doc)?;
    let content = serde_yaml::to_string(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ConfigResult<ProfileDocument> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &Path, doc: &ProfileDocument) -> ConfigResult<()> {
    validate_document(doc)?;
    let content = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a YAML or JSON document depending on the extension.
pub fn load_path(path: &Path) -> ConfigResult<ProfileDocument> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => load_yaml(path),
        DocumentFormat::Json => load_json(path),
    }
}

pub fn save_path(path: &Path, doc: &ProfileDocument) -> ConfigResult<()> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => save_yaml(path, doc),
        DocumentFormat::Json => save_json(path, doc),
    }
}
