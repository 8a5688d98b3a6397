//! Refresh a position's owed fees and rewards through CPI

use anchor_lang::prelude::*;

use crate::error::OrcatestError;
use crate::whirlpool::{
    self, cpi::UpdateFeesAndRewardsAccounts, Position, TickArrayHeader, Whirlpool,
    WhirlpoolProgram, WHIRLPOOL_PROGRAM_ID,
};

#[derive(Accounts)]
pub struct UpdateFeesAndRewardsCpi<'info> {
    #[account(mut)]
    pub whirlpool: Box<Account<'info, Whirlpool>>,

    #[account(mut, has_one = whirlpool)]
    pub position: Box<Account<'info, Position>>,

    /// CHECK: Whirlpool-owned tick array, pool checked in the handler
    #[account(owner = WHIRLPOOL_PROGRAM_ID @ OrcatestError::InvalidTickArray)]
    pub tick_array_lower: UncheckedAccount<'info>,
    /// CHECK: Whirlpool-owned tick array, pool checked in the handler
    #[account(owner = WHIRLPOOL_PROGRAM_ID @ OrcatestError::InvalidTickArray)]
    pub tick_array_upper: UncheckedAccount<'info>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
}

pub fn handler(ctx: Context<UpdateFeesAndRewardsCpi>) -> Result<()> {
    let accounts = &ctx.accounts;
    let pool = accounts.whirlpool.key();
    TickArrayHeader::load_for(&accounts.tick_array_lower, &pool)?;
    TickArrayHeader::load_for(&accounts.tick_array_upper, &pool)?;

    whirlpool::cpi::update_fees_and_rewards(
        &accounts.whirlpool_program.to_account_info(),
        UpdateFeesAndRewardsAccounts {
            whirlpool: accounts.whirlpool.to_account_info(),
            position: accounts.position.to_account_info(),
            tick_array_lower: accounts.tick_array_lower.to_account_info(),
            tick_array_upper: accounts.tick_array_upper.to_account_info(),
        },
    )
}
