//! Collect a position's owed trading fees through CPI
//!
//! Owed amounts only move when `update_fees_and_rewards` (or a liquidity
//! change) ran first; collecting without a refresh transfers what was already
//! checkpointed.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::OrcatestError;
use crate::whirlpool::{self, cpi::CollectFeesAccounts, Position, Whirlpool, WhirlpoolProgram};

#[derive(Accounts)]
pub struct CollectFeesCpi<'info> {
    pub whirlpool: Box<Account<'info, Whirlpool>>,

    pub position_authority: Signer<'info>,

    #[account(mut, has_one = whirlpool)]
    pub position: Box<Account<'info, Position>>,

    #[account(
        constraint = position_token_account.mint == position.position_mint
            @ OrcatestError::PositionTokenAccountMismatch,
        constraint = position_token_account.amount == 1
            @ OrcatestError::PositionTokenAmountInvalid,
    )]
    pub position_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = token_owner_account_a.mint == whirlpool.token_mint_a @ OrcatestError::InvalidMint,
    )]
    pub token_owner_account_a: Box<Account<'info, TokenAccount>>,
    #[account(mut, address = whirlpool.token_vault_a @ OrcatestError::InvalidVault)]
    pub token_vault_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = token_owner_account_b.mint == whirlpool.token_mint_b @ OrcatestError::InvalidMint,
    )]
    pub token_owner_account_b: Box<Account<'info, TokenAccount>>,
    #[account(mut, address = whirlpool.token_vault_b @ OrcatestError::InvalidVault)]
    pub token_vault_b: Box<Account<'info, TokenAccount>>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<CollectFeesCpi>) -> Result<()> {
    let accounts = &ctx.accounts;

    msg!(
        "collect_fees: position={} owed_a={} owed_b={}",
        accounts.position.key(),
        accounts.position.fee_owed_a,
        accounts.position.fee_owed_b
    );

    whirlpool::cpi::collect_fees(
        &accounts.whirlpool_program.to_account_info(),
        CollectFeesAccounts {
            whirlpool: accounts.whirlpool.to_account_info(),
            position_authority: accounts.position_authority.to_account_info(),
            position: accounts.position.to_account_info(),
            position_token_account: accounts.position_token_account.to_account_info(),
            token_owner_account_a: accounts.token_owner_account_a.to_account_info(),
            token_vault_a: accounts.token_vault_a.to_account_info(),
            token_owner_account_b: accounts.token_owner_account_b.to_account_info(),
            token_vault_b: accounts.token_vault_b.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
        },
    )
}
