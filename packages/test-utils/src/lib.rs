//! Test utilities for orcatest
//!
//! Fixtures, typed instruction requests and a chain client that runs the
//! same scenario in-memory or against a local validator.

pub mod client;
pub mod constants;
pub mod context;
pub mod environment;
pub mod error;
pub mod fixtures;
pub mod instructions;
pub mod logging;
pub mod pda;
pub mod poll;
pub mod ticks;
pub mod tokens;
pub mod units;

pub use client::{default_program_binaries, program_binaries_available, ProgramBinary, TestClient};
pub use context::{HarnessContext, TestPoolParams};
pub use environment::{
    current_test_environment, should_run_localnet_tests, HarnessConfig, TestEnvironment,
};
pub use error::{HarnessError, HarnessResult};
pub use fixtures::{
    build_config_fixture, build_fee_tier_fixture, build_pool_init_fixture, order_mint_pair,
    ConfigFixture, ConfigOverrides, FeeTierFixture, PoolInitFixture, TokenMintPair,
};
pub use logging::init_test_tracing;
pub use pda::Pda;
pub use poll::PollPolicy;
pub use ticks::TickRange;

// Integration tests reach the program crate through here so both sides share
// one copy of its types
pub use orcatest;
