//! Server settings read from an optional TOML file plus environment overrides.
//!
//! # Environment Variables
//!
//! - `HOTELSMART_CONFIG`: path of the TOML file (default: `hotelsmart.toml`)
//! - `HOST`, `PORT`: bind address
//! - `MODEL_PATH`, `SCALER_PATH`, `ENCODER_PATH`: local artifacts
//! - `LOAN_SERVICE_URL`: base URL of the remote loan service
//! - `APPLY_SCALER`, `VALIDATE_RANGES`: preprocessing switches (`true`/`false`)

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "HOTELSMART_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "hotelsmart.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{var} has an invalid value '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
    pub loan_service: LoanServiceSettings,
    pub preprocessing: PreprocessingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub encoder_path: PathBuf,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/final_model.onnx"),
            scaler_path: PathBuf::from("parameter/hotelsmart_scaler.json"),
            encoder_path: PathBuf::from("parameter/market_segment_type_encoder.json"),
        }
    }
}

impl ArtifactSettings {
    /// The artifact paths as configured, model first.
    pub fn files(&self) -> Vec<String> {
        [&self.model_path, &self.scaler_path, &self.encoder_path]
            .iter()
            .map(|p| p.display().to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoanServiceSettings {
    pub base_url: String,
}

impl Default for LoanServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://additional-fish-anagntto-1147e51d.koyeb.app".to_string(),
        }
    }
}

impl LoanServiceSettings {
    /// Full URL of the prediction endpoint.
    pub fn predict_url(&self) -> String {
        format!("{}/empresa/predict", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreprocessingSettings {
    /// Standardize the reservation row before inference.
    pub apply_scaler: bool,
    /// Reject reservation fields outside their documented ranges.
    pub validate_ranges: bool,
}

impl Default for PreprocessingSettings {
    fn default() -> Self {
        Self {
            apply_scaler: false,
            validate_ranges: true,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a TOML file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Resolve the config file from `HOTELSMART_CONFIG`, then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut settings = Self::from_file(Path::new(&path))?;
        settings.apply_overrides(|var| env::var(var).ok())?;
        Ok(settings)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { var: "PORT", value: port })?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SCALER_PATH") {
            self.artifacts.scaler_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("ENCODER_PATH") {
            self.artifacts.encoder_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("LOAN_SERVICE_URL") {
            self.loan_service.base_url = url;
        }
        if let Some(flag) = lookup("APPLY_SCALER") {
            self.preprocessing.apply_scaler = parse_flag("APPLY_SCALER", flag)?;
        }
        if let Some(flag) = lookup("VALIDATE_RANGES") {
            self.preprocessing.validate_ranges = parse_flag("VALIDATE_RANGES", flag)?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { var, value }),
    }
}
