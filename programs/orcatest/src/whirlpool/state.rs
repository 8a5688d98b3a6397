//! Whirlpool account mirrors
//!
//! Field-for-field copies of the Whirlpool program's borsh layouts. They
//! implement Anchor's account traits with the Whirlpool program as owner, so
//! handlers can take them as `Account<'info, Whirlpool>` and the harness can
//! fetch them with the same types. Nothing here is ever written back.
//!
//! ## Account Sizes
//!
//! | Account | Size (bytes) |
//! |---------|--------------|
//! | WhirlpoolsConfig | 108 (106 serialized) |
//! | FeeTier | 44 |
//! | Whirlpool | 653 |
//! | Position | 216 |
//! | TickArray | 9988 |

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use super::WHIRLPOOL_PROGRAM_ID;
use crate::constants::{NUM_REWARDS, TICK_ARRAY_SIZE};
use crate::error::OrcatestError;

macro_rules! whirlpool_account {
    ($ty:ident, $discriminator:expr) => {
        impl Discriminator for $ty {
            const DISCRIMINATOR: &'static [u8] = &$discriminator;
        }

        impl Owner for $ty {
            fn owner() -> Pubkey {
                WHIRLPOOL_PROGRAM_ID
            }
        }

        impl AccountSerialize for $ty {}

        impl AccountDeserialize for $ty {
            fn try_deserialize(buf: &mut &[u8]) -> Result<Self> {
                if buf.len() < Self::DISCRIMINATOR.len() {
                    return Err(ErrorCode::AccountDiscriminatorNotFound.into());
                }
                if &buf[..Self::DISCRIMINATOR.len()] != Self::DISCRIMINATOR {
                    return Err(ErrorCode::AccountDiscriminatorMismatch.into());
                }
                Self::try_deserialize_unchecked(buf)
            }

            fn try_deserialize_unchecked(buf: &mut &[u8]) -> Result<Self> {
                let mut data: &[u8] = buf
                    .get(Self::DISCRIMINATOR.len()..)
                    .ok_or(ErrorCode::AccountDidNotDeserialize)?;
                AnchorDeserialize::deserialize(&mut data)
                    .map_err(|_| ErrorCode::AccountDidNotDeserialize.into())
            }
        }

        #[cfg(feature = "idl-build")]
        impl anchor_lang::IdlBuild for $ty {}
    };
}

// ============================================================
// CONFIG AND FEE TIER
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WhirlpoolsConfig {
    pub fee_authority: Pubkey,
    pub collect_protocol_fees_authority: Pubkey,
    pub reward_emissions_super_authority: Pubkey,
    pub default_protocol_fee_rate: u16,
}

impl WhirlpoolsConfig {
    /// Serialized fields only, the account carries two bytes of padding
    pub const LEN: usize = 8 + 32 * 3 + 2;
}

whirlpool_account!(WhirlpoolsConfig, [157, 20, 49, 224, 217, 87, 193, 254]);

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FeeTier {
    pub whirlpools_config: Pubkey,
    pub tick_spacing: u16,
    pub default_fee_rate: u16,
}

impl FeeTier {
    pub const LEN: usize = 8 + 32 + 2 + 2;
}

whirlpool_account!(FeeTier, [56, 75, 159, 76, 142, 68, 190, 105]);

// ============================================================
// WHIRLPOOL
// ============================================================

/// One of the three emission slots of a pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WhirlpoolRewardInfo {
    /// Reward token mint, default pubkey while the slot is unused
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub authority: Pubkey,
    /// Q64.64 tokens emitted per second
    pub emissions_per_second_x64: u128,
    pub growth_global_x64: u128,
}

impl WhirlpoolRewardInfo {
    pub fn initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Whirlpool {
    pub whirlpools_config: Pubkey,
    pub whirlpool_bump: [u8; 1],

    pub tick_spacing: u16,
    pub tick_spacing_seed: [u8; 2],

    /// Hundredths of a basis point
    pub fee_rate: u16,
    /// Basis points of the swap fee
    pub protocol_fee_rate: u16,

    pub liquidity: u128,
    /// Q64.64
    pub sqrt_price: u128,
    pub tick_current_index: i32,

    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,

    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub fee_growth_global_a: u128,

    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
    pub fee_growth_global_b: u128,

    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [WhirlpoolRewardInfo; NUM_REWARDS],
}

impl Whirlpool {
    pub const LEN: usize = 653;

    pub fn reward_info(&self, reward_index: u8) -> Result<&WhirlpoolRewardInfo> {
        self.reward_infos
            .get(reward_index as usize)
            .ok_or_else(|| OrcatestError::InvalidRewardIndex.into())
    }
}

whirlpool_account!(Whirlpool, [63, 149, 209, 12, 225, 128, 99, 9]);

// ============================================================
// POSITION
// ============================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionRewardInfo {
    pub growth_inside_checkpoint: u128,
    pub amount_owed: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub whirlpool: Pubkey,
    pub position_mint: Pubkey,
    pub liquidity: u128,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,

    pub fee_growth_checkpoint_a: u128,
    pub fee_owed_a: u64,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_b: u64,

    pub reward_infos: [PositionRewardInfo; NUM_REWARDS],
}

impl Position {
    pub const LEN: usize = 216;

    /// Owed amount of one reward slot, zero for an out-of-range index
    pub fn reward_owed(&self, reward_index: usize) -> u64 {
        self.reward_infos
            .get(reward_index)
            .map(|info| info.amount_owed)
            .unwrap_or_default()
    }
}

whirlpool_account!(Position, [170, 188, 143, 228, 122, 64, 247, 208]);

// ============================================================
// TICK ARRAY
// ============================================================

pub const TICK_ARRAY_DISCRIMINATOR: [u8; 8] = [69, 97, 189, 190, 110, 7, 66, 187];

/// Serialized size of one tick
pub const TICK_LEN: usize = 113;

/// Header and trailer of a zero-copy tick array
///
/// The 88 ticks between them are never read here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickArrayHeader {
    pub start_tick_index: i32,
    pub whirlpool: Pubkey,
}

impl TickArrayHeader {
    pub const LEN: usize = 8 + 4 + TICK_LEN * TICK_ARRAY_SIZE as usize + 32;
    const WHIRLPOOL_OFFSET: usize = Self::LEN - 32;

    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() == Self::LEN, OrcatestError::InvalidTickArray);
        require!(
            data[..8] == TICK_ARRAY_DISCRIMINATOR,
            OrcatestError::InvalidTickArray
        );

        let mut start = [0u8; 4];
        start.copy_from_slice(&data[8..12]);
        let mut whirlpool = [0u8; 32];
        whirlpool.copy_from_slice(&data[Self::WHIRLPOOL_OFFSET..]);

        Ok(Self {
            start_tick_index: i32::from_le_bytes(start),
            whirlpool: Pubkey::new_from_array(whirlpool),
        })
    }

    /// Decode a Whirlpool-owned tick array and check its pool
    pub fn load_for(info: &AccountInfo, whirlpool: &Pubkey) -> Result<Self> {
        require_keys_eq!(
            *info.owner,
            WHIRLPOOL_PROGRAM_ID,
            OrcatestError::InvalidTickArray
        );
        let header = Self::decode(&info.try_borrow_data()?)?;
        require_keys_eq!(
            header.whirlpool,
            *whirlpool,
            OrcatestError::TickArrayWhirlpoolMismatch
        );
        Ok(header)
    }
}
