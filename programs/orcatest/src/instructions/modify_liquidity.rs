//! Increase or decrease position liquidity through CPI
//!
//! Both directions share one account context. Token bounds are passed through
//! untouched: slippage is enforced by the Whirlpool program.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::error::OrcatestError;
use crate::whirlpool::{
    self,
    cpi::ModifyLiquidityAccounts,
    instructions::{DecreaseLiquidityArgs, IncreaseLiquidityArgs},
    Position, TickArrayHeader, Whirlpool, WhirlpoolProgram, WHIRLPOOL_PROGRAM_ID,
};

#[derive(Accounts)]
pub struct ModifyLiquidityCpi<'info> {
    #[account(mut)]
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
    #[account(
        mut,
        constraint = token_owner_account_b.mint == whirlpool.token_mint_b @ OrcatestError::InvalidMint,
    )]
    pub token_owner_account_b: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = whirlpool.token_vault_a @ OrcatestError::InvalidVault)]
    pub token_vault_a: Box<Account<'info, TokenAccount>>,
    #[account(mut, address = whirlpool.token_vault_b @ OrcatestError::InvalidVault)]
    pub token_vault_b: Box<Account<'info, TokenAccount>>,

    /// CHECK: Whirlpool-owned tick array, pool checked in the handler
    #[account(mut, owner = WHIRLPOOL_PROGRAM_ID @ OrcatestError::InvalidTickArray)]
    pub tick_array_lower: UncheckedAccount<'info>,
    /// CHECK: Whirlpool-owned tick array, pool checked in the handler
    #[account(mut, owner = WHIRLPOOL_PROGRAM_ID @ OrcatestError::InvalidTickArray)]
    pub tick_array_upper: UncheckedAccount<'info>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub token_program: Program<'info, Token>,
}

impl<'info> ModifyLiquidityCpi<'info> {
    fn validate_tick_arrays(&self) -> Result<()> {
        let whirlpool = self.whirlpool.key();
        TickArrayHeader::load_for(&self.tick_array_lower, &whirlpool)?;
        TickArrayHeader::load_for(&self.tick_array_upper, &whirlpool)?;
        Ok(())
    }

    fn cpi_accounts(&self) -> ModifyLiquidityAccounts<'info> {
        ModifyLiquidityAccounts {
            whirlpool: self.whirlpool.to_account_info(),
            token_program: self.token_program.to_account_info(),
            position_authority: self.position_authority.to_account_info(),
            position: self.position.to_account_info(),
            position_token_account: self.position_token_account.to_account_info(),
            token_owner_account_a: self.token_owner_account_a.to_account_info(),
            token_owner_account_b: self.token_owner_account_b.to_account_info(),
            token_vault_a: self.token_vault_a.to_account_info(),
            token_vault_b: self.token_vault_b.to_account_info(),
            tick_array_lower: self.tick_array_lower.to_account_info(),
            tick_array_upper: self.tick_array_upper.to_account_info(),
        }
    }
}

pub fn increase_handler(
    ctx: Context<ModifyLiquidityCpi>,
    liquidity_amount: u128,
    token_max_a: u64,
    token_max_b: u64,
) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.validate_tick_arrays()?;

    msg!(
        "increase_liquidity: position={} liquidity={}",
        accounts.position.key(),
        liquidity_amount
    );

    whirlpool::cpi::increase_liquidity(
        &accounts.whirlpool_program.to_account_info(),
        accounts.cpi_accounts(),
        IncreaseLiquidityArgs {
            liquidity_amount,
            token_max_a,
            token_max_b,
        },
    )
}

pub fn decrease_handler(
    ctx: Context<ModifyLiquidityCpi>,
    liquidity_amount: u128,
    token_min_a: u64,
    token_min_b: u64,
) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.validate_tick_arrays()?;

    msg!(
        "decrease_liquidity: position={} liquidity={}",
        accounts.position.key(),
        liquidity_amount
    );

    whirlpool::cpi::decrease_liquidity(
        &accounts.whirlpool_program.to_account_info(),
        accounts.cpi_accounts(),
        DecreaseLiquidityArgs {
            liquidity_amount,
            token_min_a,
            token_min_b,
        },
    )
}
