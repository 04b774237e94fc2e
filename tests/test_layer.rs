//! Integration tests for BinaryLayer.
//!
//! Tests cover:
//! - Construction from configuration (including JSON)
//! - Forward data flow with shared and per-element thresholds
//! - Convergence of the training step on a separable target
//! - Activation-parameter learning and stochastic perturbation

use approx::assert_relative_eq;
use binnet::{
    ActivationKind, ActivationParams, BinaryLayer, BinnetError, LayerConfig, WeightMatrix,
};

fn split_input() -> [i8; 8] {
    [10, 10, 10, 10, -10, -10, -10, -10]
}

#[test]
fn test_layer_from_json_config() {
    let json = r#"{
        "num_inputs": 5,
        "num_outputs": 4,
        "threshold": 2,
        "learning_rate": 103,
        "activation": { "type": "identity" },
        "seed": 11
    }"#;
    let config = LayerConfig::from_json(json).unwrap();
    let mut layer = BinaryLayer::new(config).unwrap();
    assert_eq!(layer.num_inputs(), 5);
    assert_eq!(layer.num_outputs(), 4);

    let weights = WeightMatrix::from_column_words(5, &[&[19], &[28], &[31], &[29]]).unwrap();
    layer.set_weights(weights).unwrap();
    assert_eq!(layer.pre_activations(&[5, -2, 0, 3, -1]).unwrap(), vec![0, 0, 2, 2]);
}

#[test]
fn test_invalid_config_rejected() {
    let result = BinaryLayer::new(LayerConfig::new(0, 1));
    assert!(matches!(result, Err(BinnetError::InvalidParameter(_))));
}

#[test]
fn test_per_element_thresholds() {
    let config = LayerConfig::new(4, 1)
        .with_thresholds(vec![0, 5, -5, 100])
        .with_activation(ActivationKind::Identity);
    let layer = BinaryLayer::new(config).unwrap();
    let bits = layer.binarize_input(&[1, 5, -4, 101]).unwrap();
    assert_eq!(bits.get_acts(), vec![0, 2, 3]);
}

#[test]
fn test_relu_output() {
    let config = LayerConfig::new(5, 2).with_threshold(2);
    // column 0 = all -1, column 1 = all +1
    let weights = WeightMatrix::from_column_words(5, &[&[0], &[31]]).unwrap();
    let mut layer = BinaryLayer::with_weights(config, weights).unwrap();
    let out = layer.infer(&[5, -2, 0, 3, -1]).unwrap();
    assert_eq!(out, vec![0.0, 2.0]);
}

#[test]
fn test_training_reaches_target() {
    let config = LayerConfig::new(8, 2)
        .with_activation(ActivationKind::Identity)
        .with_learning_rate(1)
        .with_seed(17);
    let mut layer = BinaryLayer::new(config).unwrap();
    let x = split_input();
    let target = [4, -4];

    let first = layer.train_step(&x, &target).unwrap();
    let second = layer.train_step(&x, &target).unwrap();
    assert!(second.mse <= first.mse);
    assert_eq!(second.mse, 0.0);
    assert_eq!(second.outputs, vec![4, -4]);
    assert_eq!(layer.pre_activations(&x).unwrap(), vec![4, -4]);

    // With no remaining error nothing propagates back.
    assert!(second.input_delta.iter().all(|&d| d == 0));
}

#[test]
fn test_converged_layer_is_stable() {
    let config = LayerConfig::new(8, 1)
        .with_activation(ActivationKind::Identity)
        .with_learning_rate(5)
        .with_seed(1);
    let mut layer = BinaryLayer::new(config).unwrap();
    let x = split_input();
    layer.train_step(&x, &[4]).unwrap();
    let snapshot = layer.weights().clone();
    for _ in 0..5 {
        layer.train_step(&x, &[4]).unwrap();
    }
    assert_eq!(layer.weights(), &snapshot);
}

#[test]
fn test_parametric_activation_learns_offset() {
    let params = ActivationParams::new(0.25, 0.0, 0.0);
    let config = LayerConfig::new(5, 4)
        .with_threshold(2)
        .with_activation(ActivationKind::Parametric(params))
        .with_learning_rate(1000)
        .with_param_learning_rate(0.5);
    let weights = WeightMatrix::from_column_words(5, &[&[19], &[28], &[31], &[29]]).unwrap();
    let mut layer = BinaryLayer::with_weights(config, weights).unwrap();

    // Pre-activations are [0, 0, 2, 2]; outputs [0, 0, 2, 2]. A uniform +1
    // error above and at the level pushes the offset up.
    let x = [5i8, -2, 0, 3, -1];
    layer.train_step(&x, &[1, 1, 3, 3]).unwrap();

    let p = layer.activation_params().unwrap();
    assert_relative_eq!(p.offset, 0.5);
    // Two units at the level contribute -slope each, two above contribute -1.
    assert_relative_eq!(p.level, 0.5 / 4.0 * (-0.25 * 2.0 - 2.0));
    // Units at the level have x - level = 0, so the slope is unchanged.
    assert_relative_eq!(p.slope, 0.25);
}

#[test]
fn test_negative_perturb_rate_only_clears_weights() {
    let config = LayerConfig::new(200, 3)
        .with_activation(ActivationKind::Identity)
        .with_learning_rate(10)
        .with_perturb_rate(-1.0)
        .with_seed(23);
    let mut layer = BinaryLayer::new(config).unwrap();
    let before = layer.weights().clone();
    let x = [0i8; 200];
    layer.train_step(&x, &[0, 0, 0]).unwrap();

    for (old, new) in before.columns().iter().zip(layer.weights().columns()) {
        assert!(new.num_set() <= old.num_set());
        for i in new.get_acts() {
            assert_eq!(old.get_bit(i), 1);
        }
    }
}

#[test]
fn test_memory_usage() {
    let layer = BinaryLayer::new(LayerConfig::new(1024, 16)).unwrap();
    assert!(layer.memory_usage() >= 16 * 128);
}
