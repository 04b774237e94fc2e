//! BinaryLayer - one binary layer wired from the numeric kernels.
//!
//! The layer owns its packed weight matrix, its activation (including any
//! learnable parameters) and a seeded RNG. It runs the per-layer data flow:
//!
//! ```text
//! i8 input -> binarize -> forward per column -> activation -> output
//! ```
//!
//! and a single training step:
//!
//! ```text
//! delta = target - output          (loss::delta_into)
//! gated = delta * f'(pre)          (activation derivative)
//! input_delta = Σ_j sign(w_j) g_j  (backward, one call per column)
//! w_j <- update(input, -g_j)       (update_weights, per column)
//! params <- update(pre, delta)     (parametric activation only)
//! perturb columns                  (when perturb_rate != 0)
//! ```
//!
//! Chaining layers and iterating over a dataset is left to the caller.
//!
//! # Examples
//!
//! ```
//! use binnet::{ActivationKind, BinaryLayer, LayerConfig};
//!
//! let config = LayerConfig::new(8, 1)
//!     .with_activation(ActivationKind::Identity)
//!     .with_seed(3);
//! let mut layer = BinaryLayer::new(config).unwrap();
//!
//! let x = [10i8, 10, 10, 10, -10, -10, -10, -10];
//! layer.train_step(&x, &[4]).unwrap();
//! assert_eq!(layer.pre_activations(&x).unwrap(), vec![4]);
//! ```

use crate::activation::{Activation, ActivationKind, ActivationParams};
use crate::backward::backward;
use crate::binarize::{binarize_into, binarize_per_element_into};
use crate::config::LayerConfig;
use crate::linear::forward_columns;
use crate::loss::delta_into;
use crate::matrix::WeightMatrix;
use crate::packed::PackedBits;
use crate::perturb::perturb_column;
use crate::update::{update_activation_params, update_weights};
use crate::{BinnetError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Outcome of one [`BinaryLayer::train_step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Mean squared error of the outputs before the update
    pub mse: f64,
    /// Rounded layer outputs before the update
    pub outputs: Vec<i32>,
    /// Error propagated to the layer input (previous layer's delta)
    pub input_delta: Vec<i32>,
}

/// A single binary layer with packed +/-1 weights.
pub struct BinaryLayer {
    config: LayerConfig,
    weights: WeightMatrix,
    activation: ActivationKind,
    rng: StdRng,
    input_bits: PackedBits,
}

impl BinaryLayer {
    /// Build a layer from a configuration and randomize its weights.
    ///
    /// About `config.init_pct` of each column's weights start at `+1`.
    pub fn new(config: LayerConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut weights = WeightMatrix::new(config.num_inputs, config.num_outputs);
        weights.randomize(&mut rng, config.init_pct);

        debug!(
            num_inputs = config.num_inputs,
            num_outputs = config.num_outputs,
            seed = config.seed,
            "initialized binary layer"
        );

        Ok(Self {
            input_bits: PackedBits::new(config.num_inputs),
            activation: config.activation,
            weights,
            rng,
            config,
        })
    }

    /// Build a layer with explicit weights.
    pub fn with_weights(config: LayerConfig, weights: WeightMatrix) -> Result<Self> {
        let mut layer = Self::new(config)?;
        layer.set_weights(weights)?;
        Ok(layer)
    }

    /// Replace the weight matrix. Its shape must match the configuration.
    pub fn set_weights(&mut self, weights: WeightMatrix) -> Result<()> {
        if weights.num_rows() != self.config.num_inputs {
            return Err(BinnetError::InvalidInputSize {
                expected: self.config.num_inputs,
                actual: weights.num_rows(),
            });
        }
        if weights.num_cols() != self.config.num_outputs {
            return Err(BinnetError::InvalidInputSize {
                expected: self.config.num_outputs,
                actual: weights.num_cols(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    /// Re-randomize every column so that about `pct` of its weights are `+1`.
    pub fn init_random(&mut self, pct: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&pct) {
            return Err(BinnetError::InvalidParameter(format!(
                "pct must be in [0, 1] (got {})",
                pct
            )));
        }
        self.weights.randomize(&mut self.rng, pct);
        Ok(())
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn num_inputs(&self) -> usize {
        self.config.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.config.num_outputs
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut WeightMatrix {
        &mut self.weights
    }

    pub fn activation(&self) -> &ActivationKind {
        &self.activation
    }

    /// Current learnable activation parameters, if the activation has any.
    pub fn activation_params(&self) -> Option<&ActivationParams> {
        self.activation.params()
    }

    /// Binarize `x` with the configured threshold(s).
    pub fn binarize_input(&self, x: &[i8]) -> Result<PackedBits> {
        self.check_input(x)?;
        let mut bits = PackedBits::new(x.len());
        self.binarize_to(x, &mut bits);
        Ok(bits)
    }

    /// Pre-activation of every output unit.
    pub fn pre_activations(&mut self, x: &[i8]) -> Result<Vec<i32>> {
        self.check_input(x)?;
        let mut bits = std::mem::replace(&mut self.input_bits, PackedBits::new(0));
        self.binarize_to(x, &mut bits);
        let pre = forward_columns(&bits, &self.weights);
        self.input_bits = bits;
        Ok(pre)
    }

    /// Layer output: pre-activations through the activation.
    pub fn infer(&mut self, x: &[i8]) -> Result<Vec<f32>> {
        let pre = self.pre_activations(x)?;
        Ok(pre.iter().map(|&p| self.activation.apply(p as f32)).collect())
    }

    /// Run one forward pass and update weights and activation parameters
    /// toward `target`.
    pub fn train_step(&mut self, x: &[i8], target: &[i32]) -> Result<StepReport> {
        if target.len() != self.config.num_outputs {
            return Err(BinnetError::InvalidInputSize {
                expected: self.config.num_outputs,
                actual: target.len(),
            });
        }
        let pre = self.pre_activations(x)?;
        let outputs: Vec<i32> = pre
            .iter()
            .map(|&p| self.activation.apply(p as f32).round() as i32)
            .collect();

        let mut delta = vec![0; outputs.len()];
        let mse = delta_into(&outputs, target, &mut delta);

        let gated: Vec<i32> = pre
            .iter()
            .zip(&delta)
            .map(|(&p, &d)| (d as f32 * self.activation.derivative(p as f32)).round() as i32)
            .collect();

        let mut input_delta = vec![0; self.config.num_inputs];
        for (column, &g) in self.weights.columns().iter().zip(&gated) {
            backward(column, g, &mut input_delta);
        }

        let learning_rate = self.config.learning_rate;
        for (column, &g) in self.weights.columns_mut().iter_mut().zip(&gated) {
            // The rule moves weights against input * delta, so it takes
            // output - target.
            update_weights(x, -g, learning_rate, column);
        }

        if let Some(params) = self.activation.params_mut() {
            let pre_f: Vec<f32> = pre.iter().map(|&p| p as f32).collect();
            let err_f: Vec<f32> = delta.iter().map(|&d| d as f32).collect();
            update_activation_params(params, &pre_f, &err_f, self.config.param_learning_rate);
        }

        if self.config.perturb_rate != 0.0 {
            for column in self.weights.columns_mut() {
                perturb_column(column, self.config.perturb_rate, &mut self.rng);
            }
        }

        debug!(mse, num_outputs = outputs.len(), "training step");

        Ok(StepReport {
            mse,
            outputs,
            input_delta,
        })
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.weights.memory_usage() + self.input_bits.memory_usage()
    }

    fn check_input(&self, x: &[i8]) -> Result<()> {
        if x.len() != self.config.num_inputs {
            return Err(BinnetError::InvalidInputSize {
                expected: self.config.num_inputs,
                actual: x.len(),
            });
        }
        Ok(())
    }

    fn binarize_to(&self, x: &[i8], out: &mut PackedBits) {
        match &self.config.thresholds {
            Some(t) => binarize_per_element_into(x, t, out),
            None => binarize_into(x, self.config.threshold, out),
        }
    }
}
