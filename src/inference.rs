use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

use crate::config::{ArtifactSettings, PreprocessingSettings};
use crate::encoder::{CategoryEncoder, LabelEncoder};
use crate::error::PredictError;
use crate::models::{CancellationPrediction, ReservationFeatures};
use crate::request::{reservation_row, FeatureRow, RESERVATION_COLUMNS};
use crate::scaler::StandardScaler;

/// A binary classifier over one feature row.
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<i64, PredictError>;

    /// `[p0, p1]` for the same row.
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f32; 2], PredictError>;

    /// Label and probabilities together. Implementations that compute both
    /// in one pass should override this.
    fn classify(&self, row: &FeatureRow) -> Result<(i64, [f32; 2]), PredictError> {
        Ok((self.predict(row)?, self.predict_proba(row)?))
    }
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Classifier exported to ONNX with a `label` output followed by a
/// `probabilities` output of shape `[1, 2]`.
pub struct OnnxClassifier {
    model: OnnxPlan,
    n_features: usize,
}

impl OnnxClassifier {
    pub fn load<P: AsRef<Path>>(model_path: P, n_features: usize) -> TractResult<Self> {
        let model = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, n_features)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, n_features })
    }

    fn run(&self, row: &FeatureRow) -> TractResult<(i64, [f32; 2])> {
        let input = row
            .values
            .as_slice()
            .ok_or_else(|| anyhow::anyhow!("feature row is not contiguous"))?;
        let tensor = tract_ndarray::Array::from_shape_vec((1, self.n_features), input.to_vec())?
            .into_tensor();

        let outputs = self.model.run(tvec!(tensor.into()))?;
        if outputs.len() < 2 {
            anyhow::bail!("expected label and probabilities outputs, got {}", outputs.len());
        }
        decode_outputs(&outputs[0], &outputs[1])
    }
}

/// Reads the `label` and `probabilities` outputs of one inference run.
fn decode_outputs(label: &Tensor, probabilities: &Tensor) -> TractResult<(i64, [f32; 2])> {
    let label = *label
        .to_array_view::<i64>()?
        .iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty label output"))?;

    let proba: Vec<f32> = probabilities.to_array_view::<f32>()?.iter().copied().collect();
    if proba.len() != 2 {
        anyhow::bail!("expected 2 class probabilities, got {}", proba.len());
    }

    Ok((label, [proba[0], proba[1]]))
}

impl Classifier for OnnxClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<i64, PredictError> {
        self.classify(row).map(|(label, _)| label)
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f32; 2], PredictError> {
        self.classify(row).map(|(_, proba)| proba)
    }

    fn classify(&self, row: &FeatureRow) -> Result<(i64, [f32; 2]), PredictError> {
        self.run(row).map_err(|e| PredictError::Inference(e.to_string()))
    }
}

/// Classifier, encoder and scaler loaded together at startup.
pub struct ModelArtifacts {
    classifier: Box<dyn Classifier>,
    encoder: Box<dyn CategoryEncoder>,
    scaler: StandardScaler,
    apply_scaler: bool,
}

impl ModelArtifacts {
    pub fn new(
        classifier: Box<dyn Classifier>,
        encoder: Box<dyn CategoryEncoder>,
        scaler: StandardScaler,
        apply_scaler: bool,
    ) -> Self {
        Self {
            classifier,
            encoder,
            scaler,
            apply_scaler,
        }
    }

    pub fn load(
        artifacts: &ArtifactSettings,
        preprocessing: &PreprocessingSettings,
    ) -> Result<Self, PredictError> {
        let classifier = OnnxClassifier::load(&artifacts.model_path, RESERVATION_COLUMNS.len())
            .map_err(|e| {
                PredictError::ModelUnavailable(format!(
                    "{}: {}",
                    artifacts.model_path.display(),
                    e
                ))
            })?;
        let scaler = StandardScaler::load(&artifacts.scaler_path)?;
        let encoder = LabelEncoder::load(&artifacts.encoder_path)?;

        if scaler.n_features() != RESERVATION_COLUMNS.len() {
            return Err(PredictError::ModelUnavailable(format!(
                "{}: scaler has {} columns, model expects {}",
                artifacts.scaler_path.display(),
                scaler.n_features(),
                RESERVATION_COLUMNS.len()
            )));
        }

        info!(
            "Loaded model {} ({} encoder classes)",
            artifacts.model_path.display(),
            encoder.len()
        );
        if !preprocessing.apply_scaler {
            warn!(
                "Scaler {} is loaded but not applied to reservation rows (preprocessing.apply_scaler = false)",
                artifacts.scaler_path.display()
            );
        }

        Ok(Self::new(
            Box::new(classifier),
            Box::new(encoder),
            scaler,
            preprocessing.apply_scaler,
        ))
    }

    pub fn scaler_applied(&self) -> bool {
        self.apply_scaler
    }

    /// Builds the row once; label and probabilities come from that same row.
    pub fn predict(
        &self,
        features: &ReservationFeatures,
    ) -> Result<CancellationPrediction, PredictError> {
        let mut row = reservation_row(features, self.encoder.as_ref())?;
        if self.apply_scaler {
            row.values = self.scaler.transform(&row.values)?;
        }

        let (label, probabilities) = self.classifier.classify(&row)?;

        Ok(CancellationPrediction {
            label,
            probabilities,
        })
    }
}

/// Local model state for the lifetime of the process.
#[derive(Clone)]
pub enum LocalModel {
    Ready(Arc<ModelArtifacts>),
    Unavailable(String),
}

impl LocalModel {
    /// Load once at startup; failures are kept, never retried.
    pub fn load(artifacts: &ArtifactSettings, preprocessing: &PreprocessingSettings) -> Self {
        match ModelArtifacts::load(artifacts, preprocessing) {
            Ok(model) => LocalModel::Ready(Arc::new(model)),
            Err(e) => LocalModel::Unavailable(e.to_string()),
        }
    }

    pub fn get(&self) -> Result<Arc<ModelArtifacts>, PredictError> {
        match self {
            LocalModel::Ready(model) => Ok(Arc::clone(model)),
            LocalModel::Unavailable(reason) => Err(PredictError::ModelUnavailable(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LocalModel::Ready(_))
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            algorithm: "Random Forest Classifier".to_string(),
            features: RESERVATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            preprocessing: "StandardScaler for numeric features, LabelEncoder for market_segment_type"
                .to_string(),
            feature_selection: "Boruta".to_string(),
            estimated_accuracy: "~85%".to_string(),
            available: self.is_available(),
            scaler_applied: match self {
                LocalModel::Ready(model) => model.scaler_applied(),
                LocalModel::Unavailable(_) => false,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub algorithm: String,
    pub features: Vec<String>,
    pub preprocessing: String,
    pub feature_selection: String,
    pub estimated_accuracy: String,
    pub available: bool,
    pub scaler_applied: bool,
}
