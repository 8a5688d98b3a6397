//! Open a Whirlpool position through CPI
//!
//! The Whirlpool program creates the position PDA, the position mint and the
//! owner's position token account; this wrapper only checks the surrounding
//! programs and forwards the tick bounds.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::Token;

use crate::whirlpool::{
    self,
    cpi::OpenPositionAccounts,
    instructions::{OpenPositionArgs, OpenPositionBumps},
    Whirlpool, WhirlpoolProgram,
};

#[derive(Accounts)]
pub struct OpenPositionCpi<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    /// CHECK: Receives the position token, any wallet may own a position
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Position PDA, created and validated by the Whirlpool program
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    #[account(mut)]
    pub position_mint: Signer<'info>,

    /// CHECK: Associated token account created by the Whirlpool program
    #[account(mut)]
    pub position_token_account: UncheckedAccount<'info>,

    pub whirlpool: Box<Account<'info, Whirlpool>>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<OpenPositionCpi>,
    position_bump: u8,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<()> {
    let accounts = &ctx.accounts;

    msg!(
        "open_position: whirlpool={} ticks=[{}, {}]",
        accounts.whirlpool.key(),
        tick_lower_index,
        tick_upper_index
    );

    whirlpool::cpi::open_position(
        &accounts.whirlpool_program.to_account_info(),
        OpenPositionAccounts {
            funder: accounts.funder.to_account_info(),
            owner: accounts.owner.to_account_info(),
            position: accounts.position.to_account_info(),
            position_mint: accounts.position_mint.to_account_info(),
            position_token_account: accounts.position_token_account.to_account_info(),
            whirlpool: accounts.whirlpool.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
            system_program: accounts.system_program.to_account_info(),
            rent: accounts.rent.to_account_info(),
            associated_token_program: accounts.associated_token_program.to_account_info(),
        },
        OpenPositionArgs {
            bumps: OpenPositionBumps { position_bump },
            tick_lower_index,
            tick_upper_index,
        },
    )
}
