//! HalfKP feature transformer: the sparse first layer.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::accumulator::Accumulator;
use super::architecture::Architecture;
use super::error::{NetworkError, Section};
use super::reader::SectionReader;
use crate::board::Board;

/// Bias and weight rows of the feature transformer.
///
/// Weights are stored row-major: feature `f` owns
/// `weights[f * half_dims..(f + 1) * half_dims]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureTransformer {
    half_dims: usize,
    biases: Vec<i16>,
    weights: Vec<i16>,
}

impl FeatureTransformer {
    /// Build a transformer from raw tables.
    pub fn from_parts(
        half_dims: usize,
        biases: Vec<i16>,
        weights: Vec<i16>,
    ) -> Result<Self, NetworkError> {
        if biases.len() != half_dims || weights.len() != half_dims * super::HALFKP_DIMENSIONS {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!(
                    "transformer tables of {} biases and {} weights do not fit width {half_dims}",
                    biases.len(),
                    weights.len()
                ),
            });
        }
        Ok(FeatureTransformer {
            half_dims,
            biases,
            weights,
        })
    }

    pub(crate) fn read<R: Read>(
        reader: &mut SectionReader<R>,
        arch: &Architecture,
    ) -> Result<Self, NetworkError> {
        reader.ensure(Section::Transformer, arch.transformer_bytes())?;
        reader.expect_hash(Section::Transformer, arch.transformer_hash())?;
        let half_dims = arch.half_dims();
        let biases = reader.read_i16_vec(Section::Transformer, half_dims)?;
        let weights = reader.read_i16_vec(Section::Transformer, half_dims * arch.input_dims())?;
        Ok(FeatureTransformer {
            half_dims,
            biases,
            weights,
        })
    }

    pub(crate) fn write<W: Write>(&self, out: &mut W, arch: &Architecture) -> io::Result<()> {
        out.write_u32::<LittleEndian>(arch.transformer_hash())?;
        for &b in &self.biases {
            out.write_i16::<LittleEndian>(b)?;
        }
        for &w in &self.weights {
            out.write_i16::<LittleEndian>(w)?;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn half_dims(&self) -> usize {
        self.half_dims
    }

    #[inline]
    #[must_use]
    pub fn biases(&self) -> &[i16] {
        &self.biases
    }

    /// Weight row of feature `index`.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> &[i16] {
        let start = index * self.half_dims;
        &self.weights[start..start + self.half_dims]
    }

    /// Full accumulator for `board`, computed from scratch.
    #[must_use]
    pub fn transform(&self, board: &Board) -> Accumulator {
        let mut acc = Accumulator::new(self);
        acc.refresh(self, board);
        acc
    }
}
