use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::PredictError;

/// Maps a category string to the integer code the model was trained on.
pub trait CategoryEncoder: Send + Sync {
    fn encode(&self, value: &str) -> Result<i64, PredictError>;
}

#[derive(Debug, Deserialize)]
struct EncoderFile {
    #[serde(default = "default_field")]
    field: String,
    classes: Vec<String>,
}

fn default_field() -> String {
    "market_segment_type".to_string()
}

/// A fitted label encoder: each class is coded by its position in `classes`.
///
/// The artifact is the JSON export of the fitted encoder:
/// `{"field": "market_segment_type", "classes": ["Aviation", ...]}`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    field: String,
    codes: HashMap<String, i64>,
}

impl LabelEncoder {
    pub fn new(field: impl Into<String>, classes: &[String]) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no classes".to_string());
        }
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), code as i64).is_some() {
                return Err(format!("duplicate class '{}'", class));
            }
        }
        Ok(Self {
            field: field.into(),
            codes,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let file: EncoderFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
        Self::new(file.field, &file.classes)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PredictError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| PredictError::ModelUnavailable(format!("{}: {}", path.display(), e)))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, value: &str) -> Result<i64, PredictError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| PredictError::Encoding {
                field: self.field.clone(),
                value: value.to_string(),
            })
    }
}
