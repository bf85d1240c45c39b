//! Dense layers of the network head.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::architecture::padded;
use super::error::{NetworkError, Section};
use super::reader::SectionReader;
use super::{CLIP_MAX, WEIGHT_SCALE_BITS};

/// Fully connected `i8` layer with `i32` biases.
///
/// Each output owns one row of `padded_input` weights; only the first
/// `input` columns take part in the dot product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineTransform {
    input: usize,
    output: usize,
    padded_input: usize,
    biases: Vec<i32>,
    weights: Vec<i8>,
}

impl AffineTransform {
    pub fn from_parts(
        input: usize,
        output: usize,
        biases: Vec<i32>,
        weights: Vec<i8>,
    ) -> Result<Self, NetworkError> {
        let padded_input = padded(input);
        if biases.len() != output || weights.len() != output * padded_input {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!(
                    "{input}->{output} layer needs {output} biases and {} weights, got {} and {}",
                    output * padded_input,
                    biases.len(),
                    weights.len()
                ),
            });
        }
        Ok(AffineTransform {
            input,
            output,
            padded_input,
            biases,
            weights,
        })
    }

    pub(crate) fn read<R: Read>(
        reader: &mut SectionReader<R>,
        index: usize,
        input: usize,
        output: usize,
    ) -> Result<Self, NetworkError> {
        let section = Section::Layer(index);
        let padded_input = padded(input);
        reader.ensure(section, (4 * output + output * padded_input) as u64)?;
        let biases = reader.read_i32_vec(section, output)?;
        let weights = reader.read_i8_vec(section, output * padded_input)?;
        Ok(AffineTransform {
            input,
            output,
            padded_input,
            biases,
            weights,
        })
    }

    pub(crate) fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for &b in &self.biases {
            out.write_i32::<LittleEndian>(b)?;
        }
        let bytes: Vec<u8> = self.weights.iter().map(|&w| w as u8).collect();
        out.write_all(&bytes)
    }

    #[inline]
    #[must_use]
    pub fn input_dims(&self) -> usize {
        self.input
    }

    #[inline]
    #[must_use]
    pub fn output_dims(&self) -> usize {
        self.output
    }

    #[must_use]
    pub fn biases(&self) -> &[i32] {
        &self.biases
    }

    /// `bias[o] + sum(weight[o][i] * input[i])` for every output `o`.
    #[must_use]
    pub fn propagate(&self, input: &[u8]) -> Vec<i32> {
        debug_assert_eq!(input.len(), self.input);
        self.weights
            .chunks_exact(self.padded_input)
            .zip(&self.biases)
            .map(|(row, &bias)| {
                row[..self.input]
                    .iter()
                    .zip(input)
                    .fold(bias, |sum, (&w, &x)| {
                        sum.wrapping_add(i32::from(w) * i32::from(x))
                    })
            })
            .collect()
    }

    /// Smallest and largest value [`AffineTransform::propagate`] can return
    /// for inputs in `0..=input_max`.
    #[must_use]
    pub fn output_bounds(&self, input_max: i64) -> (i64, i64) {
        let mut lo = i64::MAX;
        let mut hi = i64::MIN;
        for (row, &bias) in self.weights.chunks_exact(self.padded_input).zip(&self.biases) {
            let (mut row_lo, mut row_hi) = (i64::from(bias), i64::from(bias));
            for &w in &row[..self.input] {
                let w = i64::from(w);
                if w < 0 {
                    row_lo += w * input_max;
                } else {
                    row_hi += w * input_max;
                }
            }
            lo = lo.min(row_lo);
            hi = hi.max(row_hi);
        }
        (lo, hi)
    }
}

/// Scale down by `2^6` and clamp into `0..=127`.
#[must_use]
pub fn clipped_relu(values: &[i32]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| (v >> WEIGHT_SCALE_BITS).clamp(0, CLIP_MAX) as u8)
        .collect()
}
