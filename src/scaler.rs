use ndarray::Array2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::PredictError;

/// Per-column standardization fitted at training time: `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn from_json(content: &str) -> Result<Self, String> {
        let scaler: StandardScaler = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(format!(
                "mean has {} columns but scale has {}",
                scaler.mean.len(),
                scaler.scale.len()
            ));
        }
        Ok(scaler)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PredictError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| PredictError::ModelUnavailable(format!("{}: {}", path.display(), e)))
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, rows: &Array2<f32>) -> Result<Array2<f32>, PredictError> {
        if rows.ncols() != self.n_features() {
            return Err(PredictError::Inference(format!(
                "scaler expects {} columns, row has {}",
                self.n_features(),
                rows.ncols()
            )));
        }

        let mut scaled = rows.clone();
        for (col, mut column) in scaled.columns_mut().into_iter().enumerate() {
            let mean = self.mean[col] as f32;
            // zero-variance columns are left centred only
            let scale = if self.scale[col] == 0.0 {
                1.0
            } else {
                self.scale[col] as f32
            };
            column.mapv_inplace(|x| (x - mean) / scale);
        }
        Ok(scaled)
    }
}
