//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum OrcatestError {
    // Position errors
    #[msg("Position token account does not hold the position mint")]
    PositionTokenAccountMismatch,

    #[msg("Position token account must hold exactly one position token")]
    PositionTokenAmountInvalid,

    // Pool errors
    #[msg("Token account mint does not match the whirlpool mint")]
    InvalidMint,

    #[msg("Token vault does not match the whirlpool vault")]
    InvalidVault,

    // Tick array errors
    #[msg("Tick array belongs to a different whirlpool")]
    TickArrayWhirlpoolMismatch,

    #[msg("Tick array account data is malformed")]
    InvalidTickArray,

    // Reward errors
    #[msg("Reward index out of range")]
    InvalidRewardIndex,

    #[msg("Reward account does not match the whirlpool reward slot")]
    InvalidRewardAccount,
}
