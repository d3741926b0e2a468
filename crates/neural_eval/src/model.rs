//! Model artifact schema, validation, and inference.
//!
//! The artifact is a versioned JSON document produced by the offline training
//! pipeline: either a linear model (version 1) or a small MLP (version 2).
//! Parsing happens once, into a strongly-typed tagged union; anything that
//! fails validation is rejected with a typed error so callers can fall back
//! to the zero model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FEATURE_NAMES, NUM_FEATURES};

pub const LINEAR_MODEL_VERSION: u32 = 1;
pub const MLP_MODEL_VERSION: u32 = 2;

/// Reasons an artifact is rejected. Every rejection is recoverable: the
/// engine degrades to the zero model (heuristic-only play).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse model JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported model version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },
    #[error("model kind {0:?} does not match its version")]
    WrongKind(String),
    #[error("feature names do not match the engine's canonical list")]
    FeatureNamesMismatch,
    #[error("model weight vector has {found} entries, expected {expected}")]
    WrongWeightCount { expected: usize, found: usize },
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("MLP has no layers")]
    EmptyLayers,
    #[error("layer {layer} input size {found} does not chain from {expected}")]
    LayerChainMismatch {
        layer: usize,
        expected: usize,
        found: usize,
    },
    #[error("layer {layer} weight/bias shapes do not match its declared sizes")]
    BadLayerShape { layer: usize },
    #[error("final layer output size is {0}, expected 1")]
    FinalLayerNotScalar(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Tanh,
    Relu,
}

impl Activation {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Activation::Linear => value,
            Activation::Relu => value.max(0.0),
            Activation::Tanh => value.tanh(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLabel {
    Medium,
    Hard,
    Extreme,
    Mixed,
}

/// Provenance metadata carried by every artifact. `position_samples` gates
/// the blend weight: an undertrained model is never mixed in.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInfo {
    pub generated_at: String,
    pub games: u64,
    pub position_samples: u64,
    pub epochs: u32,
    pub difficulty: DifficultyLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_layers: Option<Vec<u32>>,
}

impl TrainingInfo {
    fn untrained() -> Self {
        TrainingInfo {
            generated_at: "1970-01-01T00:00:00.000Z".to_string(),
            games: 0,
            position_samples: 0,
            epochs: 0,
            difficulty: DifficultyLabel::Mixed,
            framework: None,
            device: None,
            batch_size: None,
            learning_rate: None,
            workers: None,
            hidden_layers: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub training: TrainingInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlpLayer {
    pub input_size: usize,
    pub output_size: usize,
    /// Row-major: weight for (out, in) lives at `out * input_size + in`.
    pub weights: Vec<f64>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlpModel {
    pub layers: Vec<MlpLayer>,
    pub output_activation: Activation,
    pub training: TrainingInfo,
}

/// A validated model artifact.
#[derive(Clone, Debug)]
pub enum Model {
    Linear(LinearModel),
    Mlp(MlpModel),
}

impl Model {
    /// The hard-coded fallback: an all-zero linear model with no training
    /// samples, equivalent to heuristic-only evaluation.
    pub fn zeroed() -> Model {
        Model::Linear(LinearModel {
            weights: vec![0.0; NUM_FEATURES],
            bias: 0.0,
            training: TrainingInfo::untrained(),
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Model, ModelError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Model::from_json_value(value)
    }

    /// Parses and validates an artifact. The shape is discriminated the way
    /// the training pipeline writes it: `kind: "mlp"` or version 2 selects
    /// the MLP schema, anything else is parsed as linear.
    pub fn from_json_value(value: serde_json::Value) -> Result<Model, ModelError> {
        let is_mlp = value.get("kind").and_then(|k| k.as_str()) == Some("mlp")
            || value.get("version").and_then(|v| v.as_u64()) == Some(MLP_MODEL_VERSION as u64);

        if is_mlp {
            let raw: MlpModelFile = serde_json::from_value(value)?;
            raw.validate()
        } else {
            let raw: LinearModelFile = serde_json::from_value(value)?;
            raw.validate()
        }
    }

    pub fn training(&self) -> &TrainingInfo {
        match self {
            Model::Linear(model) => &model.training,
            Model::Mlp(model) => &model.training,
        }
    }

    pub fn is_mlp(&self) -> bool {
        matches!(self, Model::Mlp(_))
    }

    /// Runs inference over an extracted feature vector. Output is always in
    /// [-1, 1]; a non-finite result is coerced to 0.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), NUM_FEATURES);
        match self {
            Model::Linear(model) => {
                let mut sum = model.bias;
                for (weight, feature) in model.weights.iter().zip(features) {
                    sum += weight * feature;
                }
                sum.tanh()
            }
            Model::Mlp(model) => {
                let mut activations = features.to_vec();
                for layer in &model.layers {
                    let mut next = vec![0.0; layer.output_size];
                    for (out_index, out) in next.iter_mut().enumerate() {
                        let mut sum = layer.bias[out_index];
                        let offset = out_index * layer.input_size;
                        for in_index in 0..layer.input_size {
                            sum += layer.weights[offset + in_index] * activations[in_index];
                        }
                        *out = layer.activation.apply(sum);
                    }
                    activations = next;
                }
                let raw = activations.first().copied().unwrap_or(0.0);
                let activated = model.output_activation.apply(raw);
                if !activated.is_finite() {
                    return 0.0;
                }
                activated.clamp(-1.0, 1.0)
            }
        }
    }
}

// Raw on-disk shapes, validated into `Model`.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinearModelFile {
    version: u32,
    #[serde(default)]
    kind: Option<String>,
    feature_names: Vec<String>,
    weights: Vec<f64>,
    bias: f64,
    training: TrainingInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MlpModelFile {
    version: u32,
    kind: String,
    feature_names: Vec<String>,
    layers: Vec<MlpLayerFile>,
    #[serde(default)]
    output_activation: Option<Activation>,
    training: TrainingInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MlpLayerFile {
    input_size: usize,
    output_size: usize,
    weights: Vec<f64>,
    bias: Vec<f64>,
    activation: Activation,
}

fn check_feature_names(names: &[String]) -> Result<(), ModelError> {
    if names.len() != NUM_FEATURES {
        return Err(ModelError::FeatureNamesMismatch);
    }
    for (name, expected) in names.iter().zip(FEATURE_NAMES) {
        if name != expected {
            return Err(ModelError::FeatureNamesMismatch);
        }
    }
    Ok(())
}

fn check_finite(values: &[f64], field: &'static str) -> Result<(), ModelError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite(field));
    }
    Ok(())
}

impl LinearModelFile {
    fn validate(self) -> Result<Model, ModelError> {
        if self.version != LINEAR_MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion {
                expected: LINEAR_MODEL_VERSION,
                found: self.version,
            });
        }
        if let Some(kind) = &self.kind {
            if kind != "linear" {
                return Err(ModelError::WrongKind(kind.clone()));
            }
        }
        check_feature_names(&self.feature_names)?;
        if self.weights.len() != NUM_FEATURES {
            return Err(ModelError::WrongWeightCount {
                expected: NUM_FEATURES,
                found: self.weights.len(),
            });
        }
        check_finite(&self.weights, "weights")?;
        if !self.bias.is_finite() {
            return Err(ModelError::NonFinite("bias"));
        }

        Ok(Model::Linear(LinearModel {
            weights: self.weights,
            bias: self.bias,
            training: self.training,
        }))
    }
}

impl MlpModelFile {
    fn validate(self) -> Result<Model, ModelError> {
        if self.version != MLP_MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion {
                expected: MLP_MODEL_VERSION,
                found: self.version,
            });
        }
        if self.kind != "mlp" {
            return Err(ModelError::WrongKind(self.kind));
        }
        check_feature_names(&self.feature_names)?;
        if self.layers.is_empty() {
            return Err(ModelError::EmptyLayers);
        }

        let mut layers = Vec::with_capacity(self.layers.len());
        let mut expected_input = NUM_FEATURES;
        for (index, layer) in self.layers.into_iter().enumerate() {
            if layer.input_size == 0 || layer.output_size == 0 {
                return Err(ModelError::BadLayerShape { layer: index });
            }
            if layer.input_size != expected_input {
                return Err(ModelError::LayerChainMismatch {
                    layer: index,
                    expected: expected_input,
                    found: layer.input_size,
                });
            }
            if layer.weights.len() != layer.input_size * layer.output_size
                || layer.bias.len() != layer.output_size
            {
                return Err(ModelError::BadLayerShape { layer: index });
            }
            check_finite(&layer.weights, "layer weights")?;
            check_finite(&layer.bias, "layer bias")?;

            expected_input = layer.output_size;
            layers.push(MlpLayer {
                input_size: layer.input_size,
                output_size: layer.output_size,
                weights: layer.weights,
                bias: layer.bias,
                activation: layer.activation,
            });
        }

        let final_size = layers.last().map(|l| l.output_size).unwrap_or(0);
        if final_size != 1 {
            return Err(ModelError::FinalLayerNotScalar(final_size));
        }

        Ok(Model::Mlp(MlpModel {
            layers,
            output_activation: self.output_activation.unwrap_or(Activation::Tanh),
            training: self.training,
        }))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
