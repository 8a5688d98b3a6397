//! Orca Whirlpools CPI driver.
//!
//! Every instruction validates its accounts against the Whirlpool state it
//! touches and then forwards to the Whirlpool program through a CPI. No
//! pricing or liquidity math happens here.
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod whirlpool;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod orcatest {
    use super::*;

    pub fn open_position(
        ctx: Context<OpenPositionCpi>,
        position_bump: u8,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<()> {
        instructions::open_position::handler(ctx, position_bump, tick_lower_index, tick_upper_index)
    }

    pub fn initialize_tick_array(
        ctx: Context<InitializeTickArrayCpi>,
        start_tick_index: i32,
    ) -> Result<()> {
        instructions::initialize_tick_array::handler(ctx, start_tick_index)
    }

    pub fn increase_liquidity(
        ctx: Context<ModifyLiquidityCpi>,
        liquidity_amount: u128,
        token_max_a: u64,
        token_max_b: u64,
    ) -> Result<()> {
        instructions::modify_liquidity::increase_handler(
            ctx,
            liquidity_amount,
            token_max_a,
            token_max_b,
        )
    }

    pub fn decrease_liquidity(
        ctx: Context<ModifyLiquidityCpi>,
        liquidity_amount: u128,
        token_min_a: u64,
        token_min_b: u64,
    ) -> Result<()> {
        instructions::modify_liquidity::decrease_handler(
            ctx,
            liquidity_amount,
            token_min_a,
            token_min_b,
        )
    }

    pub fn close_position(ctx: Context<ClosePositionCpi>) -> Result<()> {
        instructions::close_position::handler(ctx)
    }

    pub fn update_fees_and_rewards(ctx: Context<UpdateFeesAndRewardsCpi>) -> Result<()> {
        instructions::update_fees_and_rewards::handler(ctx)
    }

    pub fn collect_fees(ctx: Context<CollectFeesCpi>) -> Result<()> {
        instructions::collect_fees::handler(ctx)
    }

    pub fn collect_reward(ctx: Context<CollectRewardCpi>, reward_index: u8) -> Result<()> {
        instructions::collect_reward::handler(ctx, reward_index)
    }
}
