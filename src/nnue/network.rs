//! NNUE network file loading and the forward pass.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use super::accumulator::Accumulator;
use super::architecture::Architecture;
use super::error::{NetworkError, Section};
use super::feature_transformer::FeatureTransformer;
use super::layers::{clipped_relu, AffineTransform};
use super::reader::SectionReader;
use super::{CLIP_MAX, MAX_DESCRIPTION_LEN, NNUE_MAGIC, OUTPUT_SCALE, VERSION};
use crate::board::{Board, Color};
use crate::error::Error;

/// A fully loaded, immutable network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkWeights {
    architecture: Architecture,
    description: String,
    transformer: FeatureTransformer,
    /// Affine layers in file order; the last one has a single output
    layers: Vec<AffineTransform>,
}

impl NetworkWeights {
    /// Load a `256x2-32-32-1` network from a `.nnue` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        Self::load_with(path, &Architecture::default())
    }

    /// Load a network file that must match `arch`.
    pub fn load_with<P: AsRef<Path>>(path: P, arch: &Architecture) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        debug!("opening network file {}", path.display());
        let file = File::open(path).map_err(NetworkError::Unreadable)?;
        let len = file.metadata().map_err(NetworkError::Unreadable)?.len();
        let network = Self::from_reader(BufReader::new(file), len, arch)?;
        info!(
            "loaded {} ({}) from {}",
            network.architecture,
            network.description,
            path.display()
        );
        Ok(network)
    }

    /// Parse a `256x2-32-32-1` network held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NetworkError> {
        Self::from_bytes_with(bytes, &Architecture::default())
    }

    pub fn from_bytes_with(bytes: &[u8], arch: &Architecture) -> Result<Self, NetworkError> {
        Self::from_reader(Cursor::new(bytes), bytes.len() as u64, arch)
    }

    /// Parse exactly `len` bytes from `reader`.
    ///
    /// Fails unless the stream holds precisely one network of shape `arch`:
    /// short sections are [`NetworkError::Truncated`] and leftover bytes are
    /// [`NetworkError::TrailingBytes`].
    pub fn from_reader<R: Read>(
        reader: R,
        len: u64,
        arch: &Architecture,
    ) -> Result<Self, NetworkError> {
        let mut reader = SectionReader::new(reader, len);

        let version = reader.read_u32(Section::Header)?;
        if version >> 8 != NNUE_MAGIC {
            return Err(NetworkError::BadMagic { found: version });
        }
        if version != VERSION {
            return Err(NetworkError::UnsupportedVersion { found: version });
        }
        reader.expect_hash(Section::Header, arch.network_hash())?;

        let desc_len = reader.read_u32(Section::Header)?;
        if desc_len > MAX_DESCRIPTION_LEN {
            return Err(NetworkError::DescriptionTooLong {
                len: u64::from(desc_len),
                max: u64::from(MAX_DESCRIPTION_LEN),
            });
        }
        let raw = reader.read_bytes(Section::Description, desc_len as usize)?;
        let description = String::from_utf8_lossy(&raw).into_owned();
        debug!("header ok, description: {description}");

        let transformer = FeatureTransformer::read(&mut reader, arch)?;
        debug!(
            "feature transformer: {} x {}",
            arch.input_dims(),
            arch.half_dims()
        );

        reader.ensure(Section::LayerStack, arch.layer_stack_bytes())?;
        reader.expect_hash(Section::LayerStack, arch.layer_stack_hash())?;
        let mut layers = Vec::with_capacity(arch.layer_count());
        for (index, (input, output)) in arch.layer_shapes().enumerate() {
            layers.push(AffineTransform::read(&mut reader, index, input, output)?);
            debug!("layer {index}: {input} -> {output}");
        }
        reader.finish()?;

        Ok(NetworkWeights {
            architecture: arch.clone(),
            description,
            transformer,
            layers,
        })
    }

    /// Assemble a network from parts, checking that every shape matches `architecture`.
    pub fn from_parts(
        architecture: Architecture,
        description: impl Into<String>,
        transformer: FeatureTransformer,
        layers: Vec<AffineTransform>,
    ) -> Result<Self, NetworkError> {
        let description = description.into();
        if description.len() > MAX_DESCRIPTION_LEN as usize {
            return Err(NetworkError::DescriptionTooLong {
                len: description.len() as u64,
                max: u64::from(MAX_DESCRIPTION_LEN),
            });
        }
        if transformer.half_dims() != architecture.half_dims() {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!(
                    "transformer width {} does not match {}",
                    transformer.half_dims(),
                    architecture
                ),
            });
        }
        let shapes: Vec<_> = architecture.layer_shapes().collect();
        let found: Vec<_> = layers
            .iter()
            .map(|l| (l.input_dims(), l.output_dims()))
            .collect();
        if shapes != found {
            return Err(NetworkError::InvalidArchitecture {
                reason: format!("layers {found:?} do not match {architecture}"),
            });
        }
        Ok(NetworkWeights {
            architecture,
            description,
            transformer,
            layers,
        })
    }

    /// Serialize in the same format [`NetworkWeights::from_reader`] accepts.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let arch = &self.architecture;
        out.write_u32::<LittleEndian>(VERSION)?;
        out.write_u32::<LittleEndian>(arch.network_hash())?;
        out.write_u32::<LittleEndian>(self.description.len() as u32)?;
        out.write_all(self.description.as_bytes())?;
        self.transformer.write(out, arch)?;
        out.write_u32::<LittleEndian>(arch.layer_stack_hash())?;
        for layer in &self.layers {
            layer.write(out)?;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// Free-form text stored in the file header.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn transformer(&self) -> &FeatureTransformer {
        &self.transformer
    }

    #[must_use]
    pub fn layers(&self) -> &[AffineTransform] {
        &self.layers
    }

    /// Run the layer stack on `acc` for `side_to_move`.
    /// Returns the score from the side to move's point of view.
    #[must_use]
    pub fn propagate(&self, acc: &Accumulator, side_to_move: Color) -> i32 {
        let mut input = acc.transformed_features(side_to_move);
        let Some((output, hidden)) = self.layers.split_last() else {
            return 0;
        };
        for layer in hidden {
            input = clipped_relu(&layer.propagate(&input));
        }
        output.propagate(&input)[0] / OUTPUT_SCALE
    }

    /// Transform `board` from scratch and score it.
    ///
    /// Fails with [`Error::KingCount`] unless each side has exactly one king.
    pub fn evaluate(&self, board: &Board) -> crate::Result<i32> {
        if let Some((color, count)) = board.king_count_violation() {
            return Err(Error::KingCount { color, count });
        }
        let acc = self.transformer.transform(board);
        Ok(self.propagate(&acc, board.side_to_move()))
    }

    /// Every score [`NetworkWeights::propagate`] can return.
    ///
    /// Derived from the output layer alone, with its inputs ranging over
    /// `0..=127`.
    #[must_use]
    pub fn output_bounds(&self) -> RangeInclusive<i64> {
        let Some(output) = self.layers.last() else {
            return 0..=0;
        };
        let (lo, hi) = output.output_bounds(i64::from(CLIP_MAX));
        let scale = i64::from(OUTPUT_SCALE);
        lo / scale..=hi / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Square, START_FEN};
    use crate::nnue::testing::{small_architecture, small_network};

    fn serialize(network: &NetworkWeights) -> Vec<u8> {
        let mut bytes = Vec::new();
        network.write_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_write_then_load() {
        let network = small_network(21);
        let bytes = serialize(&network);
        let arch = network.architecture();
        assert_eq!(
            bytes.len() as u64,
            12 + network.description().len() as u64
                + arch.transformer_bytes()
                + arch.layer_stack_bytes()
        );
        let loaded = NetworkWeights::from_bytes_with(&bytes, arch).unwrap();
        assert_eq!(loaded, network);
    }

    #[test]
    fn test_load_from_disk() {
        let network = small_network(22);
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serialize(&network)).unwrap();
        let loaded = NetworkWeights::load_with(file.path(), network.architecture()).unwrap();
        assert_eq!(loaded.description(), network.description());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetworkWeights::load(dir.path().join("absent.nnue")).unwrap_err();
        assert!(matches!(err, NetworkError::Unreadable(_)));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = serialize(&small_network(23));
        bytes[3] = 0x00;
        let err = NetworkWeights::from_bytes_with(&bytes, &small_architecture()).unwrap_err();
        assert!(matches!(err, NetworkError::BadMagic { .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = serialize(&small_network(24));
        bytes[0] = 0x17;
        let err = NetworkWeights::from_bytes_with(&bytes, &small_architecture()).unwrap_err();
        assert!(err.is_unsupported_version());
        assert!(matches!(
            err,
            NetworkError::UnsupportedVersion { found: 0x7AF3_2F17 }
        ));
    }

    #[test]
    fn test_wrong_architecture_is_hash_mismatch() {
        let bytes = serialize(&small_network(25));
        let err = NetworkWeights::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::HashMismatch {
                section: Section::Header,
                ..
            }
        ));
    }

    #[test]
    fn test_corrupt_layer_hash() {
        let network = small_network(26);
        let mut bytes = serialize(&network);
        let arch = network.architecture();
        let offset = 12 + network.description().len() + arch.transformer_bytes() as usize;
        bytes[offset] ^= 0xFF;
        let err = NetworkWeights::from_bytes_with(&bytes, arch).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::HashMismatch {
                section: Section::LayerStack,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_sections() {
        let network = small_network(27);
        let bytes = serialize(&network);
        let arch = network.architecture();

        let err = NetworkWeights::from_bytes_with(&bytes[..bytes.len() - 1], arch).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Truncated {
                section: Section::LayerStack,
                ..
            }
        ));

        let err = NetworkWeights::from_bytes_with(&bytes[..100], arch).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Truncated {
                section: Section::Transformer,
                ..
            }
        ));

        let err = NetworkWeights::from_bytes_with(&bytes[..2], arch).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Truncated {
                section: Section::Header,
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let network = small_network(28);
        let mut bytes = serialize(&network);
        bytes.extend_from_slice(&[0, 0, 0]);
        let err = NetworkWeights::from_bytes_with(&bytes, network.architecture()).unwrap_err();
        assert!(matches!(err, NetworkError::TrailingBytes { trailing: 3 }));
    }

    #[test]
    fn test_description_limit() {
        let network = small_network(29);
        let mut bytes = serialize(&network);
        bytes[8..12].copy_from_slice(&(MAX_DESCRIPTION_LEN + 1).to_le_bytes());
        let err = NetworkWeights::from_bytes_with(&bytes, network.architecture()).unwrap_err();
        assert!(matches!(err, NetworkError::DescriptionTooLong { .. }));
    }

    #[test]
    fn test_propagate_by_hand() {
        // Two inputs per perspective, no hidden layer: score = (bias + w . x) / 16
        let arch = Architecture::new(2, &[]).unwrap();
        let mut weights = vec![0i16; 2 * arch.input_dims()];
        let feature = crate::nnue::feature_index(
            Color::White,
            Square(0, 4),
            Square(1, 0),
            Color::White,
            crate::board::Piece::Pawn,
        )
        .unwrap();
        weights[2 * feature] = 40;
        let ft = FeatureTransformer::from_parts(2, vec![10, 200], weights).unwrap();
        let mut out_weights = vec![0i8; 32];
        out_weights[..4].copy_from_slice(&[1, 2, 3, 4]);
        let output = AffineTransform::from_parts(4, 1, vec![-5], out_weights).unwrap();
        let network = NetworkWeights::from_parts(arch, "", ft, vec![output]).unwrap();

        let board = Board::try_from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").unwrap();
        // White half [50, 200] clips to [50, 127]; black half [10, 127]
        // (the a2 pawn is at a different index from Black's view)
        let white = (-5 + 50 + 2 * 127 + 3 * 10 + 4 * 127) / 16;
        let black = (-5 + 10 + 2 * 127 + 3 * 50 + 4 * 127) / 16;
        assert_eq!(network.evaluate(&board).unwrap(), white);

        let board = Board::try_from_fen("4k3/8/8/8/8/8/P7/4K3 b - - 0 1").unwrap();
        assert_eq!(network.evaluate(&board).unwrap(), black);
    }

    #[test]
    fn test_score_truncates_towards_zero() {
        let arch = Architecture::new(1, &[]).unwrap();
        let ft = FeatureTransformer::from_parts(1, vec![0], vec![0; arch.input_dims()]).unwrap();
        let output = AffineTransform::from_parts(2, 1, vec![-17], vec![0; 32]).unwrap();
        let network = NetworkWeights::from_parts(arch, "", ft, vec![output]).unwrap();
        let board = Board::try_from_fen(START_FEN).unwrap();
        assert_eq!(network.evaluate(&board).unwrap(), -1);
    }

    #[test]
    fn test_scores_within_bounds() {
        let network = small_network(30);
        let bounds = network.output_bounds();
        for fen in [
            START_FEN,
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "8/8/4k3/8/8/3K4/8/8 b - - 0 1",
        ] {
            let board = Board::try_from_fen(fen).unwrap();
            assert!(bounds.contains(&i64::from(network.evaluate(&board).unwrap())));
        }
    }

    #[test]
    fn test_from_parts_rejects_wrong_layers() {
        let network = small_network(31);
        let arch = Architecture::new(8, &[4, 5]).unwrap();
        let result = NetworkWeights::from_parts(
            arch,
            "",
            network.transformer().clone(),
            network.layers().to_vec(),
        );
        assert!(matches!(
            result,
            Err(NetworkError::InvalidArchitecture { .. })
        ));
    }

    #[test]
    fn test_board_without_one_king_each_is_rejected() {
        let network = small_network(32);
        let mut board = Board::try_from_fen(START_FEN).unwrap();
        assert_eq!(
            board.clear_square(Square(7, 4)),
            Some((Color::Black, Piece::King))
        );
        assert!(matches!(
            network.evaluate(&board),
            Err(Error::KingCount {
                color: Color::Black,
                count: 0
            })
        ));

        board.set_piece(Square(7, 4), Color::Black, Piece::King);
        board.set_piece(Square(3, 3), Color::White, Piece::King);
        assert!(matches!(
            network.evaluate(&board),
            Err(Error::KingCount {
                color: Color::White,
                count: 2
            })
        ));
    }
}
