//! Pointwise nonlinearities.
//!
//! All functions are pure. Learnable parameters are passed in explicitly and
//! owned by the layer; nothing here stores state.
//!
//! The parametric activation is a shifted, piecewise-linear unit with a
//! learnable slope below a learnable level and a learnable output offset:
//!
//! ```text
//! f(x) = (x - level) * (x <= level ? slope : 1) + offset
//! f'(x) = x > level ? 1 : slope
//! ```

use serde::{Deserialize, Serialize};

/// Rectified linear unit: `x` when positive, zero otherwise.
///
/// ```
/// use binnet::activation::relu;
///
/// assert_eq!(relu(7), 7);
/// assert_eq!(relu(-3), 0);
/// assert_eq!(relu(-0.5f32), 0.0);
/// ```
#[inline]
pub fn relu<T: PartialOrd + Default>(x: T) -> T {
    if x > T::default() {
        x
    } else {
        T::default()
    }
}

/// Parametric piecewise-linear activation.
///
/// ```
/// use binnet::activation::param_activation;
///
/// assert_eq!(param_activation(0.0, 1.0, 2.0, 3.0), 1.0);
/// assert_eq!(param_activation(3.0, 3.0, 2.0, 3.0), 4.0);
/// ```
#[inline]
pub fn param_activation(x: f32, slope: f32, level: f32, offset: f32) -> f32 {
    let gain = if x <= level { slope } else { 1.0 };
    (x - level) * gain + offset
}

/// Derivative of [`param_activation`] with respect to `x`.
#[inline]
pub fn param_activation_derivative(x: f32, slope: f32, level: f32) -> f32 {
    if x > level {
        1.0
    } else {
        slope
    }
}

/// A pointwise transform applied to layer pre-activations.
pub trait Activation {
    /// Activation value at `x`.
    fn apply(&self, x: f32) -> f32;

    /// Derivative at `x`, used to gate the output error before backward
    /// propagation.
    fn derivative(&self, x: f32) -> f32;
}

/// Pass-through activation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Activation for Identity {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        x
    }

    #[inline]
    fn derivative(&self, _x: f32) -> f32 {
        1.0
    }
}

/// Rectified linear unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Relu;

impl Activation for Relu {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        relu(x)
    }

    #[inline]
    fn derivative(&self, x: f32) -> f32 {
        if x > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

/// Learnable parameters of [`param_activation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationParams {
    /// Gain applied at or below `level`
    pub slope: f32,
    /// Breakpoint between the two linear pieces
    pub level: f32,
    /// Constant added to the output
    pub offset: f32,
}

impl ActivationParams {
    pub fn new(slope: f32, level: f32, offset: f32) -> Self {
        Self {
            slope,
            level,
            offset,
        }
    }
}

impl Default for ActivationParams {
    /// Leaky shape through the origin.
    fn default() -> Self {
        Self::new(0.25, 0.0, 0.0)
    }
}

impl Activation for ActivationParams {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        param_activation(x, self.slope, self.level, self.offset)
    }

    #[inline]
    fn derivative(&self, x: f32) -> f32 {
        param_activation_derivative(x, self.slope, self.level)
    }
}

/// Activation selected by a layer's configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivationKind {
    Identity,
    #[default]
    Relu,
    Parametric(ActivationParams),
}

impl ActivationKind {
    /// Learnable parameters, when the activation has any.
    pub fn params(&self) -> Option<&ActivationParams> {
        match self {
            ActivationKind::Parametric(p) => Some(p),
            _ => None,
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut ActivationParams> {
        match self {
            ActivationKind::Parametric(p) => Some(p),
            _ => None,
        }
    }
}

impl Activation for ActivationKind {
    #[inline]
    fn apply(&self, x: f32) -> f32 {
        match self {
            ActivationKind::Identity => Identity.apply(x),
            ActivationKind::Relu => Relu.apply(x),
            ActivationKind::Parametric(p) => p.apply(x),
        }
    }

    #[inline]
    fn derivative(&self, x: f32) -> f32 {
        match self {
            ActivationKind::Identity => Identity.derivative(x),
            ActivationKind::Relu => Relu.derivative(x),
            ActivationKind::Parametric(p) => p.derivative(x),
        }
    }
}
