//! Requests routed through the orcatest CPI program
//!
//! Built from the Anchor client types generated for the program, so account
//! order and flags always follow its `#[derive(Accounts)]` structs.

use anchor_lang::{InstructionData, ToAccountMetas};
use orcatest::whirlpool::{Whirlpool, WHIRLPOOL_PROGRAM_ID};
use orcatest::{accounts, instruction};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program, sysvar};

use crate::pda::{associated_token_address, derive_position, derive_tick_array};
use crate::ticks::TickRange;

fn orcatest_instruction(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: orcatest::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

/// Addresses of one position, all determined by its mint and owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionKeys {
    pub whirlpool: Pubkey,
    pub position: Pubkey,
    pub position_bump: u8,
    pub position_mint: Pubkey,
    pub position_token_account: Pubkey,
}

impl PositionKeys {
    pub fn new(whirlpool: Pubkey, position_mint: Pubkey, owner: &Pubkey) -> Self {
        let position = derive_position(&position_mint, &WHIRLPOOL_PROGRAM_ID);
        Self {
            whirlpool,
            position: position.address,
            position_bump: position.bump,
            position_mint,
            position_token_account: associated_token_address(owner, &position_mint),
        }
    }
}

/// Signers: the funder and the position mint keypair
#[derive(Clone, Debug)]
pub struct OpenPosition {
    pub funder: Pubkey,
    pub owner: Pubkey,
    pub keys: PositionKeys,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
}

impl OpenPosition {
    pub fn new(funder: Pubkey, owner: Pubkey, keys: PositionKeys, range: &TickRange) -> Self {
        Self {
            funder,
            owner,
            keys,
            tick_lower_index: range.tick_lower_index,
            tick_upper_index: range.tick_upper_index,
        }
    }

    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::OpenPositionCpi {
                funder: self.funder,
                owner: self.owner,
                position: self.keys.position,
                position_mint: self.keys.position_mint,
                position_token_account: self.keys.position_token_account,
                whirlpool: self.keys.whirlpool,
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
                token_program: spl_token::id(),
                system_program: system_program::id(),
                rent: sysvar::rent::id(),
                associated_token_program: spl_associated_token_account::id(),
            },
            instruction::OpenPosition {
                position_bump: self.keys.position_bump,
                tick_lower_index: self.tick_lower_index,
                tick_upper_index: self.tick_upper_index,
            },
        )
    }
}

#[derive(Clone, Debug)]
pub struct InitializeTickArray {
    pub whirlpool: Pubkey,
    pub funder: Pubkey,
    pub start_tick_index: i32,
}

impl InitializeTickArray {
    pub fn tick_array(&self) -> Pubkey {
        derive_tick_array(&self.whirlpool, self.start_tick_index, &WHIRLPOOL_PROGRAM_ID).address
    }

    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::InitializeTickArrayCpi {
                whirlpool: self.whirlpool,
                funder: self.funder,
                tick_array: self.tick_array(),
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
                system_program: system_program::id(),
            },
            instruction::InitializeTickArray {
                start_tick_index: self.start_tick_index,
            },
        )
    }
}

/// Shared accounts of `increase_liquidity` and `decrease_liquidity`
#[derive(Clone, Debug)]
pub struct ModifyLiquidity {
    pub position_authority: Pubkey,
    pub keys: PositionKeys,
    pub token_owner_account_a: Pubkey,
    pub token_owner_account_b: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    pub tick_array_lower: Pubkey,
    pub tick_array_upper: Pubkey,
}

impl ModifyLiquidity {
    pub fn new(
        pool: &Whirlpool,
        keys: PositionKeys,
        range: &TickRange,
        position_authority: Pubkey,
        token_owner_account_a: Pubkey,
        token_owner_account_b: Pubkey,
    ) -> Self {
        Self {
            position_authority,
            keys,
            token_owner_account_a,
            token_owner_account_b,
            token_vault_a: pool.token_vault_a,
            token_vault_b: pool.token_vault_b,
            tick_array_lower: range.tick_array_lower(&keys.whirlpool, &WHIRLPOOL_PROGRAM_ID),
            tick_array_upper: range.tick_array_upper(&keys.whirlpool, &WHIRLPOOL_PROGRAM_ID),
        }
    }

    fn accounts(&self) -> accounts::ModifyLiquidityCpi {
        accounts::ModifyLiquidityCpi {
            whirlpool: self.keys.whirlpool,
            position_authority: self.position_authority,
            position: self.keys.position,
            position_token_account: self.keys.position_token_account,
            token_owner_account_a: self.token_owner_account_a,
            token_owner_account_b: self.token_owner_account_b,
            token_vault_a: self.token_vault_a,
            token_vault_b: self.token_vault_b,
            tick_array_lower: self.tick_array_lower,
            tick_array_upper: self.tick_array_upper,
            whirlpool_program: WHIRLPOOL_PROGRAM_ID,
            token_program: spl_token::id(),
        }
    }

    pub fn increase(&self, liquidity_amount: u128, token_max_a: u64, token_max_b: u64) -> Instruction {
        orcatest_instruction(
            self.accounts(),
            instruction::IncreaseLiquidity {
                liquidity_amount,
                token_max_a,
                token_max_b,
            },
        )
    }

    pub fn decrease(&self, liquidity_amount: u128, token_min_a: u64, token_min_b: u64) -> Instruction {
        orcatest_instruction(
            self.accounts(),
            instruction::DecreaseLiquidity {
                liquidity_amount,
                token_min_a,
                token_min_b,
            },
        )
    }
}

#[derive(Clone, Debug)]
pub struct ClosePosition {
    pub position_authority: Pubkey,
    pub receiver: Pubkey,
    pub keys: PositionKeys,
}

impl ClosePosition {
    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::ClosePositionCpi {
                position_authority: self.position_authority,
                receiver: self.receiver,
                position: self.keys.position,
                position_mint: self.keys.position_mint,
                position_token_account: self.keys.position_token_account,
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
                token_program: spl_token::id(),
            },
            instruction::ClosePosition {},
        )
    }
}

#[derive(Clone, Debug)]
pub struct UpdateFeesAndRewards {
    pub keys: PositionKeys,
    pub tick_array_lower: Pubkey,
    pub tick_array_upper: Pubkey,
}

impl UpdateFeesAndRewards {
    pub fn new(keys: PositionKeys, range: &TickRange) -> Self {
        Self {
            keys,
            tick_array_lower: range.tick_array_lower(&keys.whirlpool, &WHIRLPOOL_PROGRAM_ID),
            tick_array_upper: range.tick_array_upper(&keys.whirlpool, &WHIRLPOOL_PROGRAM_ID),
        }
    }

    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::UpdateFeesAndRewardsCpi {
                whirlpool: self.keys.whirlpool,
                position: self.keys.position,
                tick_array_lower: self.tick_array_lower,
                tick_array_upper: self.tick_array_upper,
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
            },
            instruction::UpdateFeesAndRewards {},
        )
    }
}

#[derive(Clone, Debug)]
pub struct CollectFees {
    pub position_authority: Pubkey,
    pub keys: PositionKeys,
    pub token_owner_account_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_owner_account_b: Pubkey,
    pub token_vault_b: Pubkey,
}

impl CollectFees {
    pub fn new(
        pool: &Whirlpool,
        keys: PositionKeys,
        position_authority: Pubkey,
        token_owner_account_a: Pubkey,
        token_owner_account_b: Pubkey,
    ) -> Self {
        Self {
            position_authority,
            keys,
            token_owner_account_a,
            token_vault_a: pool.token_vault_a,
            token_owner_account_b,
            token_vault_b: pool.token_vault_b,
        }
    }

    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::CollectFeesCpi {
                whirlpool: self.keys.whirlpool,
                position_authority: self.position_authority,
                position: self.keys.position,
                position_token_account: self.keys.position_token_account,
                token_owner_account_a: self.token_owner_account_a,
                token_vault_a: self.token_vault_a,
                token_owner_account_b: self.token_owner_account_b,
                token_vault_b: self.token_vault_b,
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
                token_program: spl_token::id(),
            },
            instruction::CollectFees {},
        )
    }
}

#[derive(Clone, Debug)]
pub struct CollectReward {
    pub position_authority: Pubkey,
    pub keys: PositionKeys,
    pub reward_owner_account: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_index: u8,
}

impl CollectReward {
    pub fn instruction(&self) -> Instruction {
        orcatest_instruction(
            accounts::CollectRewardCpi {
                whirlpool: self.keys.whirlpool,
                position_authority: self.position_authority,
                position: self.keys.position,
                position_token_account: self.keys.position_token_account,
                reward_owner_account: self.reward_owner_account,
                reward_vault: self.reward_vault,
                whirlpool_program: WHIRLPOOL_PROGRAM_ID,
                token_program: spl_token::id(),
            },
            instruction::CollectReward {
                reward_index: self.reward_index,
            },
        )
    }
}
