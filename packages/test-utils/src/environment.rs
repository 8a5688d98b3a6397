//! Test environment configuration

use solana_sdk::commitment_config::CommitmentConfig;
use std::time::Duration;

use crate::constants::{
    DEFAULT_COMPUTE_UNIT_LIMIT, DEFAULT_LOCALNET_URL, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
    ENV_PAYER_PATH, ENV_POLL_INTERVAL_MS, ENV_POLL_TIMEOUT_MS, ENV_RPC_URL, ENV_RUN_LOCALNET,
};
use crate::error::{HarnessError, HarnessResult};
use crate::poll::PollPolicy;

/// Where the programs under test run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestEnvironment {
    /// In-process bank from `solana-program-test`
    InMemory,

    /// A validator reachable over RPC, usually `solana-test-validator`
    Localnet {
        url: String,
        /// Keypair file of the payer; a fresh funded keypair when absent
        payer_path: Option<String>,
    },
}

impl TestEnvironment {
    pub fn in_memory() -> Self {
        TestEnvironment::InMemory
    }

    pub fn localnet() -> Self {
        Self::localnet_with_url(DEFAULT_LOCALNET_URL)
    }

    /// Validator at `url`, payer keypair from `TEST_PAYER_PATH` when set
    pub fn localnet_with_url(url: &str) -> Self {
        TestEnvironment::Localnet {
            url: url.to_string(),
            payer_path: std::env::var(ENV_PAYER_PATH).ok(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self, TestEnvironment::InMemory)
    }
}

/// Check if we should run localnet tests
pub fn should_run_localnet_tests() -> bool {
    std::env::var(ENV_RUN_LOCALNET).is_ok()
}

/// Get the current test environment from env vars
pub fn current_test_environment() -> TestEnvironment {
    if let Ok(url) = std::env::var(ENV_RPC_URL) {
        TestEnvironment::localnet_with_url(&url)
    } else if should_run_localnet_tests() {
        TestEnvironment::localnet()
    } else {
        TestEnvironment::in_memory()
    }
}

/// Knobs shared by every client and context
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    pub commitment: CommitmentConfig,
    pub poll_timeout: Duration,
    pub poll_interval: Duration,
    /// Compute budget of the in-memory bank
    pub compute_unit_limit: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
        }
    }
}

impl HarnessConfig {
    /// Defaults with poll timings taken from the environment when set
    pub fn from_env() -> HarnessResult<Self> {
        let mut config = Self::default();
        if let Some(timeout) = duration_from_env(ENV_POLL_TIMEOUT_MS)? {
            config.poll_timeout = timeout;
        }
        if let Some(interval) = duration_from_env(ENV_POLL_INTERVAL_MS)? {
            config.poll_interval = interval;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_compute_unit_limit(mut self, limit: u64) -> Self {
        self.compute_unit_limit = limit;
        self
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.poll_timeout, self.poll_interval)
    }

    fn validate(&self) -> HarnessResult<()> {
        if self.poll_interval.is_zero() {
            return Err(HarnessError::Config(format!(
                "{ENV_POLL_INTERVAL_MS} must be positive"
            )));
        }
        Ok(())
    }
}

fn duration_from_env(name: &str) -> HarnessResult<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => parse_millis(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_millis(name: &str, raw: &str) -> HarnessResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| HarnessError::Config(format!("{name}={raw:?} is not milliseconds: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis() {
        assert_eq!(
            parse_millis(ENV_POLL_TIMEOUT_MS, " 2500 ").unwrap(),
            Duration::from_millis(2500)
        );
        assert!(matches!(
            parse_millis(ENV_POLL_TIMEOUT_MS, "soon"),
            Err(HarnessError::Config(_))
        ));
    }

    #[test]
    fn test_builder_setters() {
        let config = HarnessConfig::default()
            .with_poll_timeout(Duration::from_secs(3))
            .with_poll_interval(Duration::from_millis(250))
            .with_compute_unit_limit(200_000)
            .with_commitment(CommitmentConfig::finalized());

        assert_eq!(config.poll_timeout, Duration::from_secs(3));
        assert_eq!(config.compute_unit_limit, 200_000);
        assert_eq!(config.commitment, CommitmentConfig::finalized());
        assert_eq!(config.poll_policy().max_attempts(), 12);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = HarnessConfig::default().with_poll_interval(Duration::ZERO);
        assert!(matches!(config.validate(), Err(HarnessError::Config(_))));
    }

    #[test]
    fn test_localnet_with_url() {
        let env = TestEnvironment::localnet_with_url("http://127.0.0.1:8899");
        assert!(!env.is_in_memory());
        assert!(matches!(
            &env,
            TestEnvironment::Localnet { url, .. } if url == "http://127.0.0.1:8899"
        ));
        assert!(matches!(
            TestEnvironment::localnet(),
            TestEnvironment::Localnet { url, .. } if url == DEFAULT_LOCALNET_URL
        ));
        assert!(TestEnvironment::in_memory().is_in_memory());
    }
}
