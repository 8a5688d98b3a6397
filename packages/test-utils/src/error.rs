use solana_program_test::{BanksClientError, ProgramTestError};
use solana_sdk::{program_error::ProgramError, pubkey::Pubkey};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// Local precondition violation, raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error surfaced by the chain client or a remote program
    #[error("Remote failure: {0}")]
    RemoteFailure(String),

    #[error("Timed out waiting for {condition} after {attempts} attempts ({waited:?})")]
    Timeout {
        condition: String,
        attempts: u32,
        waited: Duration,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

impl HarnessError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        HarnessError::InvalidArgument(msg.into())
    }

    pub fn remote(err: impl std::fmt::Display) -> Self {
        HarnessError::RemoteFailure(err.to_string())
    }
}

impl From<BanksClientError> for HarnessError {
    fn from(err: BanksClientError) -> Self {
        HarnessError::remote(err)
    }
}

impl From<ProgramTestError> for HarnessError {
    fn from(err: ProgramTestError) -> Self {
        HarnessError::remote(err)
    }
}

impl From<solana_client::client_error::ClientError> for HarnessError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        HarnessError::remote(err)
    }
}

impl From<ProgramError> for HarnessError {
    fn from(err: ProgramError) -> Self {
        HarnessError::remote(err)
    }
}

impl From<anchor_lang::error::Error> for HarnessError {
    fn from(err: anchor_lang::error::Error) -> Self {
        HarnessError::remote(err)
    }
}
