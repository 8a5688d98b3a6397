//! Whirlpool instruction data
//!
//! Each instruction has:
//! - A discriminator (8 bytes) identifying the instruction
//! - Borsh-serialized arguments following the discriminator
//!
//! Discriminators are the first 8 bytes of `sha256("global:<instruction_name>")`.
//! Every argument struct implements `InstructionData`, so `args.data()` is the
//! complete instruction payload.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::AccountMeta;
use anchor_lang::InstructionData;

pub mod discriminators {
    pub const INITIALIZE_CONFIG: [u8; 8] = [208, 127, 21, 1, 194, 190, 196, 70];
    pub const INITIALIZE_FEE_TIER: [u8; 8] = [183, 74, 156, 160, 112, 2, 42, 30];
    pub const INITIALIZE_POOL: [u8; 8] = [95, 180, 10, 172, 84, 174, 232, 40];
    pub const INITIALIZE_TICK_ARRAY: [u8; 8] = [11, 188, 193, 214, 141, 91, 149, 184];
    pub const INITIALIZE_REWARD: [u8; 8] = [95, 135, 192, 196, 242, 129, 230, 68];
    pub const SET_REWARD_EMISSIONS: [u8; 8] = [13, 197, 86, 168, 109, 176, 27, 244];
    pub const OPEN_POSITION: [u8; 8] = [135, 128, 47, 77, 15, 152, 240, 49];
    pub const INCREASE_LIQUIDITY: [u8; 8] = [46, 156, 243, 118, 13, 205, 251, 178];
    pub const DECREASE_LIQUIDITY: [u8; 8] = [160, 38, 208, 111, 104, 91, 44, 1];
    pub const CLOSE_POSITION: [u8; 8] = [123, 134, 81, 0, 49, 68, 98, 98];
    pub const UPDATE_FEES_AND_REWARDS: [u8; 8] = [154, 230, 250, 13, 236, 209, 75, 223];
    pub const COLLECT_FEES: [u8; 8] = [164, 152, 207, 99, 30, 186, 19, 182];
    pub const COLLECT_REWARD: [u8; 8] = [70, 5, 132, 87, 86, 235, 177, 34];
    pub const SWAP: [u8; 8] = [248, 198, 158, 145, 225, 117, 135, 200];
}

macro_rules! whirlpool_instruction {
    ($ty:ident, $discriminator:expr) => {
        impl Discriminator for $ty {
            const DISCRIMINATOR: &'static [u8] = &$discriminator;
        }

        impl InstructionData for $ty {}
    };
}

// ============================================================
// POOL SETUP
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeConfigArgs {
    pub fee_authority: Pubkey,
    pub collect_protocol_fees_authority: Pubkey,
    pub reward_emissions_super_authority: Pubkey,
    pub default_protocol_fee_rate: u16,
}

whirlpool_instruction!(InitializeConfigArgs, discriminators::INITIALIZE_CONFIG);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeFeeTierArgs {
    pub tick_spacing: u16,
    pub default_fee_rate: u16,
}

whirlpool_instruction!(InitializeFeeTierArgs, discriminators::INITIALIZE_FEE_TIER);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WhirlpoolBumps {
    pub whirlpool_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializePoolArgs {
    pub bumps: WhirlpoolBumps,
    pub tick_spacing: u16,
    pub initial_sqrt_price: u128,
}

whirlpool_instruction!(InitializePoolArgs, discriminators::INITIALIZE_POOL);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeTickArrayArgs {
    pub start_tick_index: i32,
}

whirlpool_instruction!(InitializeTickArrayArgs, discriminators::INITIALIZE_TICK_ARRAY);

// ============================================================
// REWARDS
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeRewardArgs {
    pub reward_index: u8,
}

whirlpool_instruction!(InitializeRewardArgs, discriminators::INITIALIZE_REWARD);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SetRewardEmissionsArgs {
    pub reward_index: u8,
    pub emissions_per_second_x64: u128,
}

whirlpool_instruction!(SetRewardEmissionsArgs, discriminators::SET_REWARD_EMISSIONS);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CollectRewardArgs {
    pub reward_index: u8,
}

whirlpool_instruction!(CollectRewardArgs, discriminators::COLLECT_REWARD);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateFeesAndRewardsArgs {}

whirlpool_instruction!(UpdateFeesAndRewardsArgs, discriminators::UPDATE_FEES_AND_REWARDS);

// ============================================================
// POSITIONS
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenPositionBumps {
    pub position_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OpenPositionArgs {
    pub bumps: OpenPositionBumps,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
}

whirlpool_instruction!(OpenPositionArgs, discriminators::OPEN_POSITION);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct IncreaseLiquidityArgs {
    pub liquidity_amount: u128,
    pub token_max_a: u64,
    pub token_max_b: u64,
}

whirlpool_instruction!(IncreaseLiquidityArgs, discriminators::INCREASE_LIQUIDITY);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DecreaseLiquidityArgs {
    pub liquidity_amount: u128,
    pub token_min_a: u64,
    pub token_min_b: u64,
}

whirlpool_instruction!(DecreaseLiquidityArgs, discriminators::DECREASE_LIQUIDITY);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClosePositionArgs {}

whirlpool_instruction!(ClosePositionArgs, discriminators::CLOSE_POSITION);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CollectFeesArgs {}

whirlpool_instruction!(CollectFeesArgs, discriminators::COLLECT_FEES);

// ============================================================
// SWAP
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SwapArgs {
    pub amount: u64,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
}

whirlpool_instruction!(SwapArgs, discriminators::SWAP);

// ============================================================
// ACCOUNT META HELPERS
// ============================================================

pub fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

pub fn writable_signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

pub fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

pub fn readonly_signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}
