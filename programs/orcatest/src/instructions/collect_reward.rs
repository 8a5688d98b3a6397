//! Collect one reward slot of a position through CPI

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::NUM_REWARDS;
use crate::error::OrcatestError;
use crate::whirlpool::{
    self, cpi::CollectRewardAccounts, instructions::CollectRewardArgs, Position, Whirlpool,
    WhirlpoolProgram,
};

#[derive(Accounts)]
#[instruction(reward_index: u8)]
pub struct CollectRewardCpi<'info> {
    #[account(
        constraint = (reward_index as usize) < NUM_REWARDS @ OrcatestError::InvalidRewardIndex,
    )]
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

    #[account(mut)]
    pub reward_owner_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub whirlpool_program: Program<'info, WhirlpoolProgram>,
    pub token_program: Program<'info, Token>,
}

impl<'info> CollectRewardCpi<'info> {
    fn validate_reward_accounts(&self, reward_index: u8) -> Result<()> {
        let reward = self.whirlpool.reward_info(reward_index)?;
        require_keys_eq!(
            self.reward_owner_account.mint,
            reward.mint,
            OrcatestError::InvalidRewardAccount
        );
        require_keys_eq!(
            self.reward_vault.key(),
            reward.vault,
            OrcatestError::InvalidRewardAccount
        );
        Ok(())
    }
}

pub fn handler(ctx: Context<CollectRewardCpi>, reward_index: u8) -> Result<()> {
    let accounts = &ctx.accounts;
    accounts.validate_reward_accounts(reward_index)?;

    msg!(
        "collect_reward: position={} index={} owed={}",
        accounts.position.key(),
        reward_index,
        accounts.position.reward_owed(reward_index as usize)
    );

    whirlpool::cpi::collect_reward(
        &accounts.whirlpool_program.to_account_info(),
        CollectRewardAccounts {
            whirlpool: accounts.whirlpool.to_account_info(),
            position_authority: accounts.position_authority.to_account_info(),
            position: accounts.position.to_account_info(),
            position_token_account: accounts.position_token_account.to_account_info(),
            reward_owner_account: accounts.reward_owner_account.to_account_info(),
            reward_vault: accounts.reward_vault.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
        },
        CollectRewardArgs { reward_index },
    )
}
