//! Global constants shared by the program and its off-chain harness
//!
//! PDA seeds below are the Whirlpool program's, not ours: orcatest owns no
//! accounts of its own.

// Whirlpool PDA seed constants
pub const FEE_TIER_SEED: &[u8] = b"fee_tier";
pub const WHIRLPOOL_SEED: &[u8] = b"whirlpool";
pub const POSITION_SEED: &[u8] = b"position";
pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
pub const ORACLE_SEED: &[u8] = b"oracle";

// Whirlpool layout constants
pub const NUM_REWARDS: usize = 3;
pub const TICK_ARRAY_SIZE: i32 = 88;

// Math constants
pub const Q64: u128 = 1u128 << 64;
