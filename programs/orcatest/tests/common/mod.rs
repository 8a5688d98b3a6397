//! Shared setup for orcatest integration tests
//!
//! Every test gets a fresh `HarnessContext`; tests run in-memory by default
//! and against a validator when `RUN_LOCALNET_TESTS` is set.

#[macro_use]
pub mod macros;

// Type alias for test results
pub type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub use orcatest_test_utils::{
    constants::*,
    current_test_environment, default_program_binaries, init_test_tracing,
    instructions::*,
    orcatest::whirlpool::{Position, Whirlpool, WHIRLPOOL_PROGRAM_ID},
    pda::{associated_token_address, derive_tick_array},
    program_binaries_available, should_run_localnet_tests,
    ticks::{quote_increase_by_token_a, tick_array_start_index},
    units::lamports,
    HarnessConfig, HarnessContext, HarnessError, TestEnvironment, TestPoolParams, TickRange,
    TokenMintPair,
};
pub use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

/// In-memory runs need both compiled programs; missing binaries skip the
/// test instead of failing it
pub fn programs_available() -> bool {
    let available = program_binaries_available(&default_program_binaries());
    if !available {
        tracing::warn!("skipping: run `anchor build` and dump whirlpool.so into tests/fixtures");
    }
    available
}

pub async fn harness_context(environment: TestEnvironment) -> TestResult<HarnessContext> {
    let config = HarnessConfig::from_env()?;
    Ok(HarnessContext::new(environment, config).await?)
}
