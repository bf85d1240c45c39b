//! Random networks written to temporary files.

#![allow(dead_code)]

use std::io::Write;

use nnue_probe::nnue::testing;
use nnue_probe::{Architecture, NetworkWeights};
use tempfile::NamedTempFile;

/// `HalfKP -> 16x2 -> 8 -> 8 -> 1`
pub fn test_architecture() -> Architecture {
    Architecture::new(16, &[8, 8]).unwrap()
}

pub fn random_network(seed: u64) -> NetworkWeights {
    random_network_with(&test_architecture(), seed)
}

pub fn random_network_with(arch: &Architecture, seed: u64) -> NetworkWeights {
    testing::random_network(arch, seed).unwrap()
}

pub fn network_bytes(network: &NetworkWeights) -> Vec<u8> {
    let mut bytes = Vec::new();
    network.write_to(&mut bytes).unwrap();
    bytes
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

pub fn network_file(seed: u64) -> NamedTempFile {
    write_temp(&network_bytes(&random_network(seed)))
}

/// Positions used across tests, none of them symmetric.
pub const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/8/8/8/8/8/8/4K2R w K - 0 1",
];
