//! Layer configuration.
//!
//! `LayerConfig` captures everything needed to construct a
//! [`BinaryLayer`](crate::BinaryLayer): its shape, binarization threshold,
//! learning rates, activation choice and RNG seed. It serializes to JSON.
//! Trained weights are deliberately not part of it.
//!
//! # Example
//!
//! ```
//! use binnet::{ActivationKind, ActivationParams, LayerConfig};
//!
//! let config = LayerConfig::new(784, 128)
//!     .with_threshold(0)
//!     .with_learning_rate(64)
//!     .with_activation(ActivationKind::Parametric(ActivationParams::default()))
//!     .with_seed(7);
//! config.validate().unwrap();
//!
//! let json = config.to_json().unwrap();
//! let restored = LayerConfig::from_json(&json).unwrap();
//! assert_eq!(config, restored);
//! ```

use crate::activation::ActivationKind;
use crate::{BinnetError, Result};
use serde::{Deserialize, Serialize};

fn default_init_pct() -> f64 {
    0.5
}

fn default_param_learning_rate() -> f32 {
    0.01
}

/// Construction parameters of a single binary layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerConfig {
    /// Version of the crate that wrote this configuration
    #[serde(default)]
    pub version: String,

    /// Logical input length `m`
    pub num_inputs: usize,

    /// Number of output units (weight columns) `n`
    pub num_outputs: usize,

    /// Shared binarization threshold
    #[serde(default)]
    pub threshold: i8,

    /// Per-input thresholds; overrides `threshold` when present
    #[serde(default)]
    pub thresholds: Option<Vec<i8>>,

    /// Inertia term of the weight update rule
    pub learning_rate: i32,

    /// Step size for the activation parameters
    #[serde(default = "default_param_learning_rate")]
    pub param_learning_rate: f32,

    /// Pointwise activation
    #[serde(default)]
    pub activation: ActivationKind,

    /// Bit-flip rate applied after each training step (0 disables)
    #[serde(default)]
    pub perturb_rate: f64,

    /// Fraction of `+1` weights at initialization
    #[serde(default = "default_init_pct")]
    pub init_pct: f64,

    /// RNG seed for initialization and perturbation
    #[serde(default)]
    pub seed: u64,
}

impl LayerConfig {
    /// Configuration for an `m`-input, `n`-output layer with defaults.
    pub fn new(num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            num_inputs,
            num_outputs,
            threshold: 0,
            thresholds: None,
            learning_rate: 1,
            param_learning_rate: default_param_learning_rate(),
            activation: ActivationKind::default(),
            perturb_rate: 0.0,
            init_pct: default_init_pct(),
            seed: 0,
        }
    }

    pub fn with_threshold(mut self, threshold: i8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Vec<i8>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: i32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_param_learning_rate(mut self, rate: f32) -> Self {
        self.param_learning_rate = rate;
        self
    }

    pub fn with_activation(mut self, activation: ActivationKind) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_perturb_rate(mut self, rate: f64) -> Self {
        self.perturb_rate = rate;
        self
    }

    pub fn with_init_pct(mut self, pct: f64) -> Self {
        self.init_pct = pct;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.num_inputs == 0 {
            return Err(BinnetError::InvalidParameter("num_inputs must be > 0".into()));
        }
        if self.num_outputs == 0 {
            return Err(BinnetError::InvalidParameter("num_outputs must be > 0".into()));
        }
        if let Some(t) = &self.thresholds {
            if t.len() != self.num_inputs {
                return Err(BinnetError::InvalidInputSize {
                    expected: self.num_inputs,
                    actual: t.len(),
                });
            }
        }
        if self.learning_rate < 0 {
            return Err(BinnetError::InvalidParameter(format!(
                "learning_rate must be >= 0 (got {})",
                self.learning_rate
            )));
        }
        if !self.param_learning_rate.is_finite() {
            return Err(BinnetError::InvalidParameter(
                "param_learning_rate must be finite".into(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.perturb_rate) {
            return Err(BinnetError::InvalidParameter(format!(
                "perturb_rate must be in [-1, 1] (got {})",
                self.perturb_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.init_pct) {
            return Err(BinnetError::InvalidParameter(format!(
                "init_pct must be in [0, 1] (got {})",
                self.init_pct
            )));
        }
        Ok(())
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationParams;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayerConfig::new(5, 4);
        assert!(config.validate().is_ok());
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.activation, ActivationKind::Relu);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            LayerConfig::new(0, 4).validate(),
            Err(BinnetError::InvalidParameter(_))
        ));
        assert!(matches!(
            LayerConfig::new(4, 0).validate(),
            Err(BinnetError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_threshold_length_checked() {
        let config = LayerConfig::new(3, 1).with_thresholds(vec![0, 1]);
        assert!(matches!(
            config.validate(),
            Err(BinnetError::InvalidInputSize { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_rate_ranges() {
        assert!(LayerConfig::new(3, 1).with_learning_rate(-1).validate().is_err());
        assert!(LayerConfig::new(3, 1).with_perturb_rate(1.5).validate().is_err());
        assert!(LayerConfig::new(3, 1).with_perturb_rate(f64::NAN).validate().is_err());
        assert!(LayerConfig::new(3, 1).with_perturb_rate(-1.0).validate().is_ok());
        assert!(LayerConfig::new(3, 1).with_init_pct(1.1).validate().is_err());
        assert!(LayerConfig::new(3, 1)
            .with_param_learning_rate(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = LayerConfig::new(16, 2)
            .with_thresholds((0..16).collect())
            .with_activation(ActivationKind::Parametric(ActivationParams::new(0.5, 1.0, 2.0)))
            .with_perturb_rate(-0.25)
            .with_seed(99);
        let json = config.to_json().unwrap();
        assert_eq!(LayerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let json = r#"{ "num_inputs": 8, "num_outputs": 2, "learning_rate": 3 }"#;
        let config = LayerConfig::from_json(json).unwrap();
        assert_eq!(config.threshold, 0);
        assert_eq!(config.init_pct, 0.5);
        assert_eq!(config.activation, ActivationKind::Relu);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let json = r#"{ "num_inputs": 0, "num_outputs": 2, "learning_rate": 3 }"#;
        assert!(LayerConfig::from_json(json).is_err());
        assert!(matches!(
            LayerConfig::from_json("{"),
            Err(BinnetError::Serialization(_))
        ));
    }
}
