//! NNUE (Efficiently Updatable Neural Network) evaluation.
//!
//! Provides HalfKP network inference with:
//! - Strict loading of the Stockfish 12 `.nnue` format
//! - Per-perspective accumulators with incremental updates
//! - SIMD-optimized accumulator rows (AVX2/NEON)
//! - Clipped ReLU hidden layers, integer arithmetic only
//!
//! Architecture: HalfKP(41024) -> 256x2 -> 32 -> 32 -> 1

pub mod accumulator;
pub mod architecture;
pub mod error;
pub mod feature_transformer;
pub mod features;
pub mod layers;
pub mod network;
mod reader;
pub mod simd;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod testing;

pub use accumulator::Accumulator;
pub use architecture::Architecture;
pub use error::{NetworkError, Section};
pub use feature_transformer::FeatureTransformer;
pub use features::{feature_index, HALFKP_DIMENSIONS};
pub use layers::AffineTransform;
pub use network::NetworkWeights;

/// Header word of the supported format: NNUE magic plus version byte
pub const VERSION: u32 = 0x7AF3_2F16;

/// High 24 bits of the header word shared by every NNUE version
pub const NNUE_MAGIC: u32 = VERSION >> 8;

/// Divisor applied to the output neuron
pub const OUTPUT_SCALE: i32 = 16;

/// Right shift applied before each clipped ReLU
pub const WEIGHT_SCALE_BITS: u32 = 6;

/// Upper clamp of the clipped ReLU
pub const CLIP_MAX: i32 = 127;

/// Longest description accepted in a file header
pub const MAX_DESCRIPTION_LEN: u32 = 1 << 20;
