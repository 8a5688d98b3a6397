//! Fixture builder
//!
//! Pure construction of the parameters a pool and its prerequisite config and
//! fee tier need. Every failure here is a local precondition violation raised
//! before anything touches the network. Fixtures own their keypairs and are
//! read-only once built.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::cmp::Ordering;

use crate::constants::DEFAULT_PROTOCOL_FEE_RATE;
use crate::error::{HarnessError, HarnessResult};
use crate::pda::{derive_fee_tier, derive_whirlpool, Pda};
use orcatest::whirlpool::WHIRLPOOL_PROGRAM_ID;

/// Two token mints in pool order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenMintPair {
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
}

/// Order two mints by their raw 32 key bytes, the rule the Whirlpool program
/// enforces on `initialize_pool`
pub fn order_mint_pair(mint_x: Pubkey, mint_y: Pubkey) -> HarnessResult<TokenMintPair> {
    match mint_x.to_bytes().cmp(&mint_y.to_bytes()) {
        Ordering::Less => Ok(TokenMintPair {
            mint_a: mint_x,
            mint_b: mint_y,
        }),
        Ordering::Greater => Ok(TokenMintPair {
            mint_a: mint_y,
            mint_b: mint_x,
        }),
        Ordering::Equal => Err(HarnessError::invalid_argument(format!(
            "a pool cannot pair mint {mint_x} with itself"
        ))),
    }
}

// ============================================================================
// Config
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub default_protocol_fee_rate: Option<u16>,
    pub program_id: Option<Pubkey>,
}

#[derive(Debug)]
pub struct ConfigFixture {
    pub config_keypair: Keypair,
    pub fee_authority_keypair: Keypair,
    pub collect_protocol_fees_authority_keypair: Keypair,
    pub reward_emissions_super_authority_keypair: Keypair,
    /// Basis points of the swap fee routed to the protocol
    pub default_protocol_fee_rate: u16,
    pub program_id: Pubkey,
}

impl ConfigFixture {
    pub fn config(&self) -> Pubkey {
        self.config_keypair.pubkey()
    }

    pub fn fee_authority(&self) -> Pubkey {
        self.fee_authority_keypair.pubkey()
    }

    pub fn collect_protocol_fees_authority(&self) -> Pubkey {
        self.collect_protocol_fees_authority_keypair.pubkey()
    }

    pub fn reward_emissions_super_authority(&self) -> Pubkey {
        self.reward_emissions_super_authority_keypair.pubkey()
    }
}

pub fn build_config_fixture(overrides: Option<ConfigOverrides>) -> ConfigFixture {
    let overrides = overrides.unwrap_or_default();

    ConfigFixture {
        config_keypair: Keypair::new(),
        fee_authority_keypair: Keypair::new(),
        collect_protocol_fees_authority_keypair: Keypair::new(),
        reward_emissions_super_authority_keypair: Keypair::new(),
        default_protocol_fee_rate: overrides
            .default_protocol_fee_rate
            .unwrap_or(DEFAULT_PROTOCOL_FEE_RATE),
        program_id: overrides.program_id.unwrap_or(WHIRLPOOL_PROGRAM_ID),
    }
}

// ============================================================================
// Fee tier
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeTierFixture {
    pub config: Pubkey,
    pub fee_authority: Pubkey,
    pub fee_tier: Pda,
    pub tick_spacing: u16,
    /// Hundredths of a basis point
    pub default_fee_rate: u16,
    pub program_id: Pubkey,
}

/// The fee rate passes through unchecked; its ceiling belongs to the
/// Whirlpool program
pub fn build_fee_tier_fixture(
    config: &ConfigFixture,
    tick_spacing: u16,
    default_fee_rate: u16,
) -> HarnessResult<FeeTierFixture> {
    if tick_spacing == 0 {
        return Err(HarnessError::invalid_argument("tick spacing must be positive"));
    }

    Ok(FeeTierFixture {
        config: config.config(),
        fee_authority: config.fee_authority(),
        fee_tier: derive_fee_tier(&config.config(), tick_spacing, &config.program_id),
        tick_spacing,
        default_fee_rate,
        program_id: config.program_id,
    })
}

// ============================================================================
// Pool
// ============================================================================

#[derive(Debug)]
pub struct PoolInitFixture {
    pub config: Pubkey,
    pub fee_tier: Pubkey,
    pub mints: TokenMintPair,
    pub whirlpool: Pda,
    pub token_vault_a_keypair: Keypair,
    pub token_vault_b_keypair: Keypair,
    pub tick_spacing: u16,
    /// Q64.64
    pub initial_sqrt_price: u128,
    pub program_id: Pubkey,
}

impl PoolInitFixture {
    pub fn whirlpool(&self) -> Pubkey {
        self.whirlpool.address
    }

    pub fn token_vault_a(&self) -> Pubkey {
        self.token_vault_a_keypair.pubkey()
    }

    pub fn token_vault_b(&self) -> Pubkey {
        self.token_vault_b_keypair.pubkey()
    }
}

pub fn build_pool_init_fixture(
    config: &ConfigFixture,
    fee_tier: &FeeTierFixture,
    mint_x: Pubkey,
    mint_y: Pubkey,
    tick_spacing: u16,
    initial_sqrt_price: u128,
) -> HarnessResult<PoolInitFixture> {
    if initial_sqrt_price == 0 {
        return Err(HarnessError::invalid_argument(
            "initial sqrt price must be strictly positive",
        ));
    }
    if fee_tier.config != config.config() {
        return Err(HarnessError::invalid_argument(format!(
            "fee tier {} belongs to config {}, not {}",
            fee_tier.fee_tier.address,
            fee_tier.config,
            config.config()
        )));
    }
    if tick_spacing != fee_tier.tick_spacing {
        return Err(HarnessError::invalid_argument(format!(
            "tick spacing {tick_spacing} does not match fee tier spacing {}",
            fee_tier.tick_spacing
        )));
    }

    let mints = order_mint_pair(mint_x, mint_y)?;
    let whirlpool = derive_whirlpool(
        &config.config(),
        &mints.mint_a,
        &mints.mint_b,
        tick_spacing,
        &config.program_id,
    );

    Ok(PoolInitFixture {
        config: config.config(),
        fee_tier: fee_tier.fee_tier.address,
        mints,
        whirlpool,
        token_vault_a_keypair: Keypair::new(),
        token_vault_b_keypair: Keypair::new(),
        tick_spacing,
        initial_sqrt_price,
        program_id: config.program_id,
    })
}
