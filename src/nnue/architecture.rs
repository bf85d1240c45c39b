//! Layer dimensions and the structural hashes that pin them in a network file.
//!
//! A HalfKP network file does not store its dimensions. Instead each section
//! is preceded by a hash computed from the layer shapes, so the loader checks
//! that the file matches the expected architecture before reading any
//! weights. The hash recipes follow the Stockfish 12 trainer exactly, which
//! makes the reference `nn-04cf2b4ed1da.nnue` file validate as `0x3E5AA6EE`.

use std::fmt;

use super::features::HALFKP_DIMENSIONS;
use super::NetworkError;

/// Hash of the HalfKP(Friend) raw feature set
const HALFKP_FEATURE_HASH: u32 = 0x5D69_D5B8;
const INPUT_SLICE_HASH: u32 = 0xEC42_E90D;
const AFFINE_HASH: u32 = 0xCC03_DAE4;
const CLIPPED_RELU_HASH: u32 = 0x538D_24C7;

/// Affine layer input widths are padded to a multiple of this in the file
pub const INPUT_PADDING: usize = 32;

/// Upper bound on any single dimension accepted by [`Architecture::new`]
const MAX_DIMENSION: usize = 1 << 16;

#[inline]
#[must_use]
pub const fn padded(dims: usize) -> usize {
    dims.div_ceil(INPUT_PADDING) * INPUT_PADDING
}

/// Shape of a HalfKP network: `41024 -> half x 2 -> hidden... -> 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Architecture {
    half_dims: usize,
    /// Output width of every affine layer, in order; the last entry is 1
    layer_outputs: Vec<usize>,
}

impl Architecture {
    /// Build an architecture from the accumulator width and the hidden layer widths.
    ///
    /// The single-output final layer is appended automatically.
    pub fn new(half_dims: usize, hidden: &[usize]) -> Result<Self, NetworkError> {
        if half_dims == 0 || half_dims > MAX_DIMENSION {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!("accumulator width {half_dims} out of range"),
            });
        }
        if let Some(&bad) = hidden.iter().find(|&&w| w == 0 || w > MAX_DIMENSION) {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!("hidden layer width {bad} out of range"),
            });
        }
        let mut layer_outputs = hidden.to_vec();
        layer_outputs.push(1);
        Ok(Architecture {
            half_dims,
            layer_outputs,
        })
    }

    /// The `256x2-32-32-1` layout of the reference network.
    #[must_use]
    pub fn halfkp_256x2_32_32() -> Self {
        Architecture {
            half_dims: 256,
            layer_outputs: vec![32, 32, 1],
        }
    }

    /// Number of HalfKP input features.
    #[inline]
    #[must_use]
    pub const fn input_dims(&self) -> usize {
        HALFKP_DIMENSIONS
    }

    /// Accumulator width per perspective.
    #[inline]
    #[must_use]
    pub fn half_dims(&self) -> usize {
        self.half_dims
    }

    /// `(input, output)` dimensions of every affine layer, in file order.
    ///
    /// Each layer's input equals the previous layer's output; the first one
    /// consumes both accumulator halves.
    pub fn layer_shapes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let inputs = std::iter::once(2 * self.half_dims).chain(self.layer_outputs.iter().copied());
        inputs.zip(self.layer_outputs.iter().copied())
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_outputs.len()
    }

    /// Hash stored in front of the feature transformer section.
    #[must_use]
    pub fn transformer_hash(&self) -> u32 {
        HALFKP_FEATURE_HASH ^ (2 * self.half_dims) as u32
    }

    /// Hash stored in front of the affine layer stack.
    #[must_use]
    pub fn layer_stack_hash(&self) -> u32 {
        let mut hash = INPUT_SLICE_HASH ^ (2 * self.half_dims) as u32;
        let last = self.layer_outputs.len() - 1;
        for (i, &out) in self.layer_outputs.iter().enumerate() {
            let mut affine = AFFINE_HASH.wrapping_add(out as u32);
            affine ^= hash >> 1;
            affine ^= hash << 31;
            hash = if i == last {
                affine
            } else {
                CLIPPED_RELU_HASH.wrapping_add(affine)
            };
        }
        hash
    }

    /// Hash stored in the file header.
    #[must_use]
    pub fn network_hash(&self) -> u32 {
        self.transformer_hash() ^ self.layer_stack_hash()
    }

    /// Exact number of bytes of the transformer section, hash included.
    #[must_use]
    pub fn transformer_bytes(&self) -> u64 {
        let values = self.half_dims * (1 + self.input_dims());
        4 + 2 * values as u64
    }

    /// Exact number of bytes of the layer stack section, hash included.
    #[must_use]
    pub fn layer_stack_bytes(&self) -> u64 {
        self.layer_shapes()
            .map(|(input, output)| (4 * output + output * padded(input)) as u64)
            .sum::<u64>()
            + 4
    }
}

impl Default for Architecture {
    fn default() -> Self {
        Architecture::halfkp_256x2_32_32()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HalfKP({}) -> {}x2", self.input_dims(), self.half_dims)?;
        for out in &self.layer_outputs {
            write!(f, " -> {out}")?;
        }
        Ok(())
    }
}
