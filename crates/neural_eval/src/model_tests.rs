use super::*;
use crate::features::{FEATURE_NAMES, NUM_FEATURES};
use serde_json::json;

fn feature_names_json() -> serde_json::Value {
    json!(FEATURE_NAMES)
}

fn training_json(samples: u64) -> serde_json::Value {
    json!({
        "generatedAt": "2024-06-01T00:00:00.000Z",
        "games": 200,
        "positionSamples": samples,
        "epochs": 12,
        "difficulty": "mixed",
    })
}

fn linear_json(samples: u64) -> serde_json::Value {
    json!({
        "version": 1,
        "kind": "linear",
        "featureNames": feature_names_json(),
        "weights": vec![0.0; NUM_FEATURES],
        "bias": 0.25,
        "training": training_json(samples),
    })
}

fn mlp_json() -> serde_json::Value {
    // 27 -> 2 relu, 2 -> 1 linear, tanh output.
    json!({
        "version": 2,
        "kind": "mlp",
        "featureNames": feature_names_json(),
        "layers": [
            {
                "inputSize": NUM_FEATURES,
                "outputSize": 2,
                "weights": vec![0.01; NUM_FEATURES * 2],
                "bias": [0.0, 0.1],
                "activation": "relu",
            },
            {
                "inputSize": 2,
                "outputSize": 1,
                "weights": [0.5, -0.5],
                "bias": [0.0],
                "activation": "linear",
            },
        ],
        "training": training_json(9000),
    })
}

#[test]
fn test_valid_linear_artifact_parses() {
    let model = Model::from_json_value(linear_json(5000)).expect("valid linear model");
    assert!(!model.is_mlp());
    assert_eq!(model.training().position_samples, 5000);
}

#[test]
fn test_valid_mlp_artifact_parses_with_default_output_activation() {
    let model = Model::from_json_value(mlp_json()).expect("valid mlp model");
    assert!(model.is_mlp());
    let Model::Mlp(mlp) = &model else { unreachable!() };
    assert_eq!(mlp.layers.len(), 2);
    assert_eq!(mlp.output_activation, Activation::Tanh);
}

#[test]
fn test_kind_field_is_optional_for_linear() {
    let mut doc = linear_json(100);
    doc.as_object_mut().unwrap().remove("kind");
    assert!(Model::from_json_value(doc).is_ok());
}

#[test]
fn test_mismatched_feature_names_are_rejected() {
    let mut doc = linear_json(100);
    doc["featureNames"][0] = json!("not_a_feature");
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::FeatureNamesMismatch)
    ));

    // Reordering is also a mismatch even when the set is identical.
    let mut doc = linear_json(100);
    let swapped = doc["featureNames"][1].clone();
    doc["featureNames"][1] = doc["featureNames"][0].clone();
    doc["featureNames"][0] = swapped;
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::FeatureNamesMismatch)
    ));
}

#[test]
fn test_wrong_weight_count_is_rejected() {
    let mut doc = linear_json(100);
    doc["weights"] = json!(vec![0.0; NUM_FEATURES - 1]);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::WrongWeightCount { .. })
    ));
}

#[test]
fn test_non_finite_values_are_rejected() {
    // JSON cannot carry NaN/Infinity literals and serde_json refuses numbers
    // that overflow f64, so either way the artifact must be rejected.
    let raw = serde_json::to_string(&linear_json(100))
        .unwrap()
        .replace("0.25", "1e999");
    assert!(Model::from_json_str(&raw).is_err());

    let direct = check_finite(&[1.0, f64::INFINITY], "weights");
    assert!(matches!(direct, Err(ModelError::NonFinite("weights"))));
    let nan = check_finite(&[f64::NAN], "bias");
    assert!(matches!(nan, Err(ModelError::NonFinite("bias"))));
}

#[test]
fn test_wrong_versions_are_rejected() {
    let mut doc = linear_json(100);
    doc["version"] = json!(3);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::UnsupportedVersion { .. })
    ));
}

#[test]
fn test_layer_chain_mismatch_is_rejected() {
    let mut doc = mlp_json();
    doc["layers"][1]["inputSize"] = json!(3);
    doc["layers"][1]["weights"] = json!([0.5, -0.5, 0.1]);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::LayerChainMismatch { layer: 1, .. })
    ));
}

#[test]
fn test_bad_layer_shape_is_rejected() {
    let mut doc = mlp_json();
    doc["layers"][0]["weights"] = json!([0.1, 0.2, 0.3]);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::BadLayerShape { layer: 0 })
    ));
}

#[test]
fn test_final_layer_must_be_scalar() {
    let mut doc = mlp_json();
    doc["layers"][1]["outputSize"] = json!(2);
    doc["layers"][1]["weights"] = json!([0.5, -0.5, 0.1, 0.2]);
    doc["layers"][1]["bias"] = json!([0.0, 0.0]);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::FinalLayerNotScalar(2))
    ));
}

#[test]
fn test_unknown_activation_is_rejected() {
    let mut doc = mlp_json();
    doc["layers"][0]["activation"] = json!("sigmoid");
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::Parse(_))
    ));
}

#[test]
fn test_empty_layer_list_is_rejected() {
    let mut doc = mlp_json();
    doc["layers"] = json!([]);
    assert!(matches!(
        Model::from_json_value(doc),
        Err(ModelError::EmptyLayers)
    ));
}

#[test]
fn test_linear_inference_is_a_tanh_of_the_weighted_sum() {
    let mut doc = linear_json(100);
    let mut weights = vec![0.0; NUM_FEATURES];
    weights[0] = 1.0;
    doc["weights"] = json!(weights);
    doc["bias"] = json!(0.3);
    let model = Model::from_json_value(doc).unwrap();

    let mut features = vec![0.0; NUM_FEATURES];
    features[0] = 0.5;
    let expected = (0.3_f64 + 0.5).tanh();
    assert!((model.evaluate(&features) - expected).abs() < 1e-12);
}

#[test]
fn test_mlp_inference_propagates_layers() {
    // Single 27 -> 1 layer passing feature 0 straight through, tanh output.
    let mut weights = vec![0.0; NUM_FEATURES];
    weights[0] = 1.0;
    let doc = json!({
        "version": 2,
        "kind": "mlp",
        "featureNames": feature_names_json(),
        "layers": [{
            "inputSize": NUM_FEATURES,
            "outputSize": 1,
            "weights": weights,
            "bias": [0.0],
            "activation": "linear",
        }],
        "training": training_json(9000),
    });
    let model = Model::from_json_value(doc).unwrap();

    let mut features = vec![0.0; NUM_FEATURES];
    features[0] = 0.8;
    let expected = 0.8_f64.tanh();
    assert!((model.evaluate(&features) - expected).abs() < 1e-12);
}

#[test]
fn test_mlp_output_is_clamped() {
    let mut weights = vec![0.0; NUM_FEATURES];
    weights[0] = 100.0;
    let doc = json!({
        "version": 2,
        "kind": "mlp",
        "featureNames": feature_names_json(),
        "layers": [{
            "inputSize": NUM_FEATURES,
            "outputSize": 1,
            "weights": weights,
            "bias": [0.0],
            "activation": "linear",
        }],
        "outputActivation": "linear",
        "training": training_json(9000),
    });
    let model = Model::from_json_value(doc).unwrap();

    let mut features = vec![0.0; NUM_FEATURES];
    features[0] = 5.0;
    assert_eq!(model.evaluate(&features), 1.0, "output must clamp to [-1, 1]");
}

#[test]
fn test_zero_model_always_evaluates_to_zero() {
    let model = Model::zeroed();
    let features = vec![0.7; NUM_FEATURES];
    assert_eq!(model.evaluate(&features), 0.0);
    assert_eq!(model.training().position_samples, 0);
}
