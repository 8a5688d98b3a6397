//! Close an empty position through CPI
//!
//! The Whirlpool program burns the position token, closes the token account
//! and the position, and refunds rent to `receiver`.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::OrcatestError;
use crate::whirlpool::{self, cpi::ClosePositionAccounts, Position, WhirlpoolProgram};

#[derive(Accounts)]
pub struct ClosePositionCpi<'info> {
    pub position_authority: Signer<'info>,

    /// CHECK: Rent refund destination
    #[account(mut)]
    pub receiver: UncheckedAccount<'info>,

    #[account(mut)]
    pub position: Box<Account<'info, Position>>,

    #[account(mut, address = position.position_mint @ OrcatestError::PositionTokenAccountMismatch)]
    pub position_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = position_token_account.mint == position.position_mint
            @ OrcatestError::PositionTokenAccountMismatch,
        constraint = position_token_account.amount == 1
            @ OrcatestError::PositionTokenAmountInvalid,
    )]
    pub position_token_account: Box<Account<'info, TokenAccount>>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClosePositionCpi>) -> Result<()> {
    let accounts = &ctx.accounts;

    msg!("close_position: position={}", accounts.position.key());

    whirlpool::cpi::close_position(
        &accounts.whirlpool_program.to_account_info(),
        ClosePositionAccounts {
            position_authority: accounts.position_authority.to_account_info(),
            receiver: accounts.receiver.to_account_info(),
            position: accounts.position.to_account_info(),
            position_mint: accounts.position_mint.to_account_info(),
            position_token_account: accounts.position_token_account.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
        },
    )
}
