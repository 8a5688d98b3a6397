//! Initialize a Whirlpool tick array through CPI

use anchor_lang::prelude::*;

use crate::whirlpool::{
    self, cpi::InitializeTickArrayAccounts, instructions::InitializeTickArrayArgs, Whirlpool,
    WhirlpoolProgram,
};

#[derive(Accounts)]
pub struct InitializeTickArrayCpi<'info> {
    pub whirlpool: Box<Account<'info, Whirlpool>>,

    #[account(mut)]
    pub funder: Signer<'info>,

    /// CHECK: Tick array PDA, created by the Whirlpool program
    #[account(mut)]
    pub tick_array: UncheckedAccount<'info>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeTickArrayCpi>, start_tick_index: i32) -> Result<()> {
    let accounts = &ctx.accounts;

    whirlpool::cpi::initialize_tick_array(
        &accounts.whirlpool_program.to_account_info(),
        InitializeTickArrayAccounts {
            whirlpool: accounts.whirlpool.to_account_info(),
            funder: accounts.funder.to_account_info(),
            tick_array: accounts.tick_array.to_account_info(),
            system_program: accounts.system_program.to_account_info(),
        },
        InitializeTickArrayArgs { start_tick_index },
    )
}
