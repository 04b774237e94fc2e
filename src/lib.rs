//! Binnet - Numeric Core for Binary Neural Networks
//!
//! Binnet implements the arithmetic of a binary neural network layer: weights
//! and activations are single bits packed into machine words, multiplication
//! becomes a bitwise AND/XNOR and accumulation becomes a population count.
//!
//! # Key Characteristics
//!
//! - Bit-packed vectors with exact handling of partial last words
//! - Forward transform as `popcount(x & w) - popcount(x & !w)` per word
//! - Sign-based (straight-through) error back-propagation
//! - In-place perceptron-style weight updates and learnable activation
//!   parameters
//! - Injected, seedable randomness for stochastic weight perturbation
//!
//! # Architecture
//!
//! - **word / popcount**: word-size arithmetic and interchangeable popcount
//!   strategies
//! - **PackedBits / WeightMatrix**: packed storage, one column per output unit
//! - **binarize / linear / backward / update**: the numeric kernels
//! - **activation / loss / perturb**: pointwise transforms, error utilities and
//!   exploration noise
//! - **BinaryLayer / LayerConfig**: one layer wired from the kernels
//!
//! # Examples
//!
//! ## Forward pass
//!
//! ```
//! use binnet::{binarize, forward, PackedBits};
//!
//! let x = binarize(&[5i8, -2, 0, 3, -1], 2);
//! assert_eq!(x.words(), &[9]);
//!
//! let outputs: Vec<i32> = [19u64, 28, 31, 29]
//!     .iter()
//!     .map(|&w| forward(&x, &PackedBits::from_words(&[w], 5).unwrap()))
//!     .collect();
//! assert_eq!(outputs, vec![0, 0, 2, 2]);
//! ```
//!
//! ## Training update
//!
//! ```
//! use binnet::{backward, update_weights, PackedBits};
//!
//! let mut w = PackedBits::from_words(&[9], 5).unwrap();
//!
//! let mut prev_delta = vec![0; 5];
//! backward(&w, 20, &mut prev_delta);
//! assert_eq!(prev_delta, vec![20, -20, -20, 20, -20]);
//!
//! update_weights(&[13i8, 9, 127, 6, 3], 20, 103, &mut w);
//! assert_eq!(w.words(), &[0]);
//! ```
//!
//! # Safety
//!
//! Binnet uses `debug_assert!` for bit-index bounds in hot paths and
//! `assert!` for length mismatches between operands. Fallible construction
//! and configuration return [`Result`].

pub mod activation;
pub mod backward;
pub mod binarize;
pub mod config;
pub mod error;
pub mod layer;
pub mod linear;
pub mod loss;
pub mod matrix;
pub mod packed;
pub mod perturb;
pub mod popcount;
pub mod update;
pub mod word;

pub use activation::{
    param_activation, param_activation_derivative, relu, Activation, ActivationKind,
    ActivationParams, Identity, Relu,
};
pub use backward::{backward, backward_columns};
pub use binarize::{binarize, binarize_into, binarize_per_element, binarize_per_element_into};
pub use config::LayerConfig;
pub use error::{BinnetError, Result};
pub use layer::{BinaryLayer, StepReport};
pub use linear::{forward, forward_columns, forward_with, forward_xnor};
pub use loss::{delta_into, elementwise_delta, mean_squared_error};
pub use matrix::WeightMatrix;
pub use packed::PackedBits;
pub use perturb::{perturb_column, stochastic_perturb};
pub use popcount::{popcount, DefaultPopcount, HardwarePopcount, Popcount, SoftwarePopcount};
pub use update::{update_activation_params, update_weights, UpdateInput};
pub use word::{BitWord, Word, BITS_PER_WORD};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Binnet";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
