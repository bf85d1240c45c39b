//! HalfKP NNUE evaluation of chess positions.
//!
//! Load a Stockfish 12 style `.nnue` network once, then score positions given
//! as FEN:
//!
//! ```no_run
//! use nnue_probe::Evaluator;
//!
//! let evaluator = Evaluator::load("nn-04cf2b4ed1da.nnue")?;
//! let score = evaluator.evaluate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
//! println!("{score}");
//! # Ok::<(), nnue_probe::Error>(())
//! ```
//!
//! [`probe`] wraps a single process-wide evaluator behind `init`/`evaluate`.

pub mod board;
pub mod error;
pub mod evaluator;
pub mod nnue;
pub mod probe;

pub use board::{Board, Color, FenError, Piece, Square};
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use nnue::{Accumulator, Architecture, NetworkError, NetworkWeights};
