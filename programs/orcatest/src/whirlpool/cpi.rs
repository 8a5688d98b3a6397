//! Whirlpool CPI helpers
//!
//! Each helper takes the Whirlpool program account, the accounts of one
//! instruction in the order the Whirlpool program expects them, and the
//! instruction arguments. Authorities are plain transaction signers, so
//! every call is a plain `invoke`.
//!
//! ```rust,ignore
//! whirlpool::cpi::collect_fees(
//!     &ctx.accounts.whirlpool_program.to_account_info(),
//!     whirlpool::cpi::CollectFeesAccounts { ... },
//! )?;
//! ```

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke,
};
use anchor_lang::InstructionData;

use super::instructions::*;

fn invoke_whirlpool<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: Vec<AccountMeta>,
    data: Vec<u8>,
    account_infos: &[AccountInfo<'info>],
) -> Result<()> {
    let ix = Instruction {
        program_id: whirlpool_program.key(),
        accounts,
        data,
    };
    invoke(&ix, account_infos)?;
    Ok(())
}

// ============================================================
// OPEN POSITION
// ============================================================

pub struct OpenPositionAccounts<'info> {
    pub funder: AccountInfo<'info>,
    pub owner: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub position_mint: AccountInfo<'info>,
    pub position_token_account: AccountInfo<'info>,
    pub whirlpool: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
    pub rent: AccountInfo<'info>,
    pub associated_token_program: AccountInfo<'info>,
}

pub fn open_position<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: OpenPositionAccounts<'info>,
    args: OpenPositionArgs,
) -> Result<()> {
    let metas = vec![
        writable_signer(accounts.funder.key()),
        readonly(accounts.owner.key()),
        writable(accounts.position.key()),
        writable_signer(accounts.position_mint.key()),
        writable(accounts.position_token_account.key()),
        readonly(accounts.whirlpool.key()),
        readonly(accounts.token_program.key()),
        readonly(accounts.system_program.key()),
        readonly(accounts.rent.key()),
        readonly(accounts.associated_token_program.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        args.data(),
        &[
            accounts.funder,
            accounts.owner,
            accounts.position,
            accounts.position_mint,
            accounts.position_token_account,
            accounts.whirlpool,
            accounts.token_program,
            accounts.system_program,
            accounts.rent,
            accounts.associated_token_program,
            whirlpool_program.clone(),
        ],
    )
}

// ============================================================
// INITIALIZE TICK ARRAY
// ============================================================

pub struct InitializeTickArrayAccounts<'info> {
    pub whirlpool: AccountInfo<'info>,
    pub funder: AccountInfo<'info>,
    pub tick_array: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

pub fn initialize_tick_array<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: InitializeTickArrayAccounts<'info>,
    args: InitializeTickArrayArgs,
) -> Result<()> {
    let metas = vec![
        readonly(accounts.whirlpool.key()),
        writable_signer(accounts.funder.key()),
        writable(accounts.tick_array.key()),
        readonly(accounts.system_program.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        args.data(),
        &[
            accounts.whirlpool,
            accounts.funder,
            accounts.tick_array,
            accounts.system_program,
            whirlpool_program.clone(),
        ],
    )
}

// ============================================================
// INCREASE / DECREASE LIQUIDITY
// ============================================================

/// Shared by increase and decrease liquidity
pub struct ModifyLiquidityAccounts<'info> {
    pub whirlpool: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub position_authority: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub position_token_account: AccountInfo<'info>,
    pub token_owner_account_a: AccountInfo<'info>,
    pub token_owner_account_b: AccountInfo<'info>,
    pub token_vault_a: AccountInfo<'info>,
    pub token_vault_b: AccountInfo<'info>,
    pub tick_array_lower: AccountInfo<'info>,
    pub tick_array_upper: AccountInfo<'info>,
}

impl<'info> ModifyLiquidityAccounts<'info> {
    fn metas(&self) -> Vec<AccountMeta> {
        vec![
            writable(self.whirlpool.key()),
            readonly(self.token_program.key()),
            readonly_signer(self.position_authority.key()),
            writable(self.position.key()),
            readonly(self.position_token_account.key()),
            writable(self.token_owner_account_a.key()),
            writable(self.token_owner_account_b.key()),
            writable(self.token_vault_a.key()),
            writable(self.token_vault_b.key()),
            writable(self.tick_array_lower.key()),
            writable(self.tick_array_upper.key()),
        ]
    }

    fn into_infos(self, whirlpool_program: &AccountInfo<'info>) -> Vec<AccountInfo<'info>> {
        vec![
            self.whirlpool,
            self.token_program,
            self.position_authority,
            self.position,
            self.position_token_account,
            self.token_owner_account_a,
            self.token_owner_account_b,
            self.token_vault_a,
            self.token_vault_b,
            self.tick_array_lower,
            self.tick_array_upper,
            whirlpool_program.clone(),
        ]
    }
}

pub fn increase_liquidity<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: ModifyLiquidityAccounts<'info>,
    args: IncreaseLiquidityArgs,
) -> Result<()> {
    let metas = accounts.metas();
    let infos = accounts.into_infos(whirlpool_program);
    invoke_whirlpool(whirlpool_program, metas, args.data(), &infos)
}

pub fn decrease_liquidity<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: ModifyLiquidityAccounts<'info>,
    args: DecreaseLiquidityArgs,
) -> Result<()> {
    let metas = accounts.metas();
    let infos = accounts.into_infos(whirlpool_program);
    invoke_whirlpool(whirlpool_program, metas, args.data(), &infos)
}

// ============================================================
// CLOSE POSITION
// ============================================================

pub struct ClosePositionAccounts<'info> {
    pub position_authority: AccountInfo<'info>,
    pub receiver: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub position_mint: AccountInfo<'info>,
    pub position_token_account: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub fn close_position<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: ClosePositionAccounts<'info>,
) -> Result<()> {
    let metas = vec![
        readonly_signer(accounts.position_authority.key()),
        writable(accounts.receiver.key()),
        writable(accounts.position.key()),
        writable(accounts.position_mint.key()),
        writable(accounts.position_token_account.key()),
        readonly(accounts.token_program.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        ClosePositionArgs {}.data(),
        &[
            accounts.position_authority,
            accounts.receiver,
            accounts.position,
            accounts.position_mint,
            accounts.position_token_account,
            accounts.token_program,
            whirlpool_program.clone(),
        ],
    )
}

// ============================================================
// FEES AND REWARDS
// ============================================================

pub struct UpdateFeesAndRewardsAccounts<'info> {
    pub whirlpool: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub tick_array_lower: AccountInfo<'info>,
    pub tick_array_upper: AccountInfo<'info>,
}

pub fn update_fees_and_rewards<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: UpdateFeesAndRewardsAccounts<'info>,
) -> Result<()> {
    let metas = vec![
        writable(accounts.whirlpool.key()),
        writable(accounts.position.key()),
        readonly(accounts.tick_array_lower.key()),
        readonly(accounts.tick_array_upper.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        UpdateFeesAndRewardsArgs {}.data(),
        &[
            accounts.whirlpool,
            accounts.position,
            accounts.tick_array_lower,
            accounts.tick_array_upper,
            whirlpool_program.clone(),
        ],
    )
}

pub struct CollectFeesAccounts<'info> {
    pub whirlpool: AccountInfo<'info>,
    pub position_authority: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub position_token_account: AccountInfo<'info>,
    pub token_owner_account_a: AccountInfo<'info>,
    pub token_vault_a: AccountInfo<'info>,
    pub token_owner_account_b: AccountInfo<'info>,
    pub token_vault_b: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub fn collect_fees<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: CollectFeesAccounts<'info>,
) -> Result<()> {
    let metas = vec![
        readonly(accounts.whirlpool.key()),
        readonly_signer(accounts.position_authority.key()),
        writable(accounts.position.key()),
        readonly(accounts.position_token_account.key()),
        writable(accounts.token_owner_account_a.key()),
        writable(accounts.token_vault_a.key()),
        writable(accounts.token_owner_account_b.key()),
        writable(accounts.token_vault_b.key()),
        readonly(accounts.token_program.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        CollectFeesArgs {}.data(),
        &[
            accounts.whirlpool,
            accounts.position_authority,
            accounts.position,
            accounts.position_token_account,
            accounts.token_owner_account_a,
            accounts.token_vault_a,
            accounts.token_owner_account_b,
            accounts.token_vault_b,
            accounts.token_program,
            whirlpool_program.clone(),
        ],
    )
}

pub struct CollectRewardAccounts<'info> {
    pub whirlpool: AccountInfo<'info>,
    pub position_authority: AccountInfo<'info>,
    pub position: AccountInfo<'info>,
    pub position_token_account: AccountInfo<'info>,
    pub reward_owner_account: AccountInfo<'info>,
    pub reward_vault: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub fn collect_reward<'info>(
    whirlpool_program: &AccountInfo<'info>,
    accounts: CollectRewardAccounts<'info>,
    args: CollectRewardArgs,
) -> Result<()> {
    let metas = vec![
        readonly(accounts.whirlpool.key()),
        readonly_signer(accounts.position_authority.key()),
        writable(accounts.position.key()),
        readonly(accounts.position_token_account.key()),
        writable(accounts.reward_owner_account.key()),
        writable(accounts.reward_vault.key()),
        readonly(accounts.token_program.key()),
    ];

    invoke_whirlpool(
        whirlpool_program,
        metas,
        args.data(),
        &[
            accounts.whirlpool,
            accounts.position_authority,
            accounts.position,
            accounts.position_token_account,
            accounts.reward_owner_account,
            accounts.reward_vault,
            accounts.token_program,
            whirlpool_program.clone(),
        ],
    )
}
