use std::time::Duration;

pub use orcatest::constants::{NUM_REWARDS, Q64};

// Program binaries loaded by the in-memory client
pub const ORCATEST_PROGRAM_PATH: &str = "../../target/deploy/orcatest.so";
pub const WHIRLPOOL_PROGRAM_PATH: &str = "tests/fixtures/whirlpool.so";

pub const DEFAULT_LOCALNET_URL: &str = "http://localhost:8899";

// Pool parameters
pub const DEFAULT_PROTOCOL_FEE_RATE: u16 = 300;
pub const DEFAULT_FEE_RATE: u16 = 3000;
pub const DEFAULT_TICK_SPACING: u16 = 10;
pub const PRICE_1_TO_1: u128 = Q64;

// Mints created by the harness
pub const DEFAULT_MINT_DECIMALS: u8 = 0;

// Funding
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const DEFAULT_AIRDROP: u64 = 10 * LAMPORTS_PER_SOL;

// Polling
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Clock advance per poll attempt when running in-memory
pub const IN_MEMORY_TIME_STEP: Duration = Duration::from_secs(5);

pub const DEFAULT_COMPUTE_UNIT_LIMIT: u64 = 1_400_000;

// Env vars
pub const ENV_RPC_URL: &str = "TEST_RPC_URL";
pub const ENV_PAYER_PATH: &str = "TEST_PAYER_PATH";
pub const ENV_RUN_LOCALNET: &str = "RUN_LOCALNET_TESTS";
pub const ENV_POLL_TIMEOUT_MS: &str = "ORCATEST_POLL_TIMEOUT_MS";
pub const ENV_POLL_INTERVAL_MS: &str = "ORCATEST_POLL_INTERVAL_MS";
