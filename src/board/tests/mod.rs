//! Board module tests.
//!
//! - `strategies.rs` - proptest strategies for random positions (shared with the nnue tests)
//! - `fen_properties.rs` - FEN round-trip properties and serde checks
