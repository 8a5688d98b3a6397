//! Account validation of the CPI handlers, run natively
//!
//! The program runs as a builtin with hand-encoded Whirlpool accounts. The
//! Whirlpool program id is backed by a builtin that rejects every call, so a
//! rejected constraint shows up as an orcatest error and a passing one as the
//! builtin's error.

use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
};
use anchor_lang::{AnchorSerialize, Discriminator};
use orcatest::constants::Q64;
use orcatest::error::OrcatestError;
use orcatest::whirlpool::{
    Position, TickArrayHeader, Whirlpool, TICK_ARRAY_DISCRIMINATOR, WHIRLPOOL_PROGRAM_ID,
};
use orcatest_test_utils::instructions::{
    CollectFees, CollectReward, ModifyLiquidity, PositionKeys, UpdateFeesAndRewards,
};
use orcatest_test_utils::TickRange;
use solana_program_test::{processor, ProgramTest};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::{Account as TokenAccount, AccountState};

/// Returned by the stand-in Whirlpool program
const WHIRLPOOL_REACHED: u32 = 0x5747;

const FUNDED: u64 = 1_000_000_000;

fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    // Anchor's entry ties the slice and account lifetimes together
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    orcatest::entry(program_id, accounts, data)
}

fn reject_all(_program_id: &Pubkey, _accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    Err(ProgramError::Custom(WHIRLPOOL_REACHED))
}

fn token_account(mint: Pubkey, owner: Pubkey, amount: u64) -> Account {
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount {
        mint,
        owner,
        amount,
        state: AccountState::Initialized,
        ..Default::default()
    }
    .pack_into_slice(&mut data);

    Account {
        lamports: FUNDED,
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

fn whirlpool_owned<T: Discriminator + AnchorSerialize>(state: &T) -> anyhow::Result<Account> {
    let mut data = T::DISCRIMINATOR.to_vec();
    state.serialize(&mut data)?;
    Ok(Account {
        lamports: FUNDED,
        data,
        owner: WHIRLPOOL_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    })
}

fn tick_array(whirlpool: &Pubkey, start_tick_index: i32) -> Account {
    let mut data = vec![0u8; TickArrayHeader::LEN];
    data[..8].copy_from_slice(&TICK_ARRAY_DISCRIMINATOR);
    data[8..12].copy_from_slice(&start_tick_index.to_le_bytes());
    data[TickArrayHeader::LEN - 32..].copy_from_slice(whirlpool.as_ref());

    Account {
        lamports: FUNDED,
        data,
        owner: WHIRLPOOL_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// A pool with one open position, as the Whirlpool program would leave it
struct PoolAccounts {
    whirlpool: Pubkey,
    pool: Whirlpool,
    authority: Keypair,
    keys: PositionKeys,
    range: TickRange,
    owner_a: Pubkey,
    owner_b: Pubkey,
    reward_owner: Pubkey,
    /// Whirlpool-owned tick array of another pool
    foreign_tick_array: Pubkey,
    /// Valid token account of mint A that is not a pool vault
    stray_vault: Pubkey,
    position_tokens: u64,
}

impl PoolAccounts {
    fn new() -> anyhow::Result<Self> {
        let whirlpool = Pubkey::new_unique();
        let mut pool = Whirlpool {
            whirlpools_config: Pubkey::new_unique(),
            tick_spacing: 10,
            sqrt_price: Q64,
            token_mint_a: Pubkey::new_unique(),
            token_vault_a: Pubkey::new_unique(),
            token_mint_b: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            ..Default::default()
        };
        pool.reward_infos[0].mint = Pubkey::new_unique();
        pool.reward_infos[0].vault = Pubkey::new_unique();

        let authority = Keypair::new();
        let keys = PositionKeys::new(whirlpool, Pubkey::new_unique(), &authority.pubkey());

        Ok(Self {
            whirlpool,
            pool,
            authority,
            keys,
            range: TickRange::new(-100, 100, 10)?,
            owner_a: Pubkey::new_unique(),
            owner_b: Pubkey::new_unique(),
            reward_owner: Pubkey::new_unique(),
            foreign_tick_array: Pubkey::new_unique(),
            stray_vault: Pubkey::new_unique(),
            position_tokens: 1,
        })
    }

    fn with_position_tokens(mut self, amount: u64) -> Self {
        self.position_tokens = amount;
        self
    }

    fn position(&self) -> Position {
        Position {
            whirlpool: self.whirlpool,
            position_mint: self.keys.position_mint,
            liquidity: 1_000,
            tick_lower_index: self.range.tick_lower_index,
            tick_upper_index: self.range.tick_upper_index,
            ..Default::default()
        }
    }

    fn program_test(&self) -> anyhow::Result<ProgramTest> {
        let mut program_test =
            ProgramTest::new("orcatest", orcatest::ID, processor!(process_instruction));
        program_test.prefer_bpf(false);
        program_test.add_program("whirlpool", WHIRLPOOL_PROGRAM_ID, processor!(reject_all));

        let pool_key = self.whirlpool;
        let owner = self.authority.pubkey();
        let reward = self.pool.reward_infos[0];

        program_test.add_account(pool_key, whirlpool_owned(&self.pool)?);
        program_test.add_account(self.keys.position, whirlpool_owned(&self.position())?);
        program_test.add_account(
            self.keys.position_token_account,
            token_account(self.keys.position_mint, owner, self.position_tokens),
        );

        let tick_arrays = [
            (self.range.lower_start_index, self.range.tick_array_lower(&pool_key, &WHIRLPOOL_PROGRAM_ID)),
            (self.range.upper_start_index, self.range.tick_array_upper(&pool_key, &WHIRLPOOL_PROGRAM_ID)),
        ];
        for (start, address) in tick_arrays {
            program_test.add_account(address, tick_array(&pool_key, start));
        }
        program_test.add_account(
            self.foreign_tick_array,
            tick_array(&Pubkey::new_unique(), self.range.upper_start_index),
        );

        program_test.add_account(self.owner_a, token_account(self.pool.token_mint_a, owner, 1_000));
        program_test.add_account(self.owner_b, token_account(self.pool.token_mint_b, owner, 1_000));
        program_test.add_account(self.pool.token_vault_a, token_account(self.pool.token_mint_a, pool_key, 0));
        program_test.add_account(self.pool.token_vault_b, token_account(self.pool.token_mint_b, pool_key, 0));
        program_test.add_account(self.stray_vault, token_account(self.pool.token_mint_a, pool_key, 0));

        program_test.add_account(self.reward_owner, token_account(reward.mint, owner, 0));
        program_test.add_account(reward.vault, token_account(reward.mint, pool_key, 100));

        Ok(program_test)
    }

    fn modify_liquidity(&self) -> ModifyLiquidity {
        ModifyLiquidity::new(
            &self.pool,
            self.keys,
            &self.range,
            self.authority.pubkey(),
            self.owner_a,
            self.owner_b,
        )
    }

    fn collect_fees(&self) -> CollectFees {
        CollectFees::new(
            &self.pool,
            self.keys,
            self.authority.pubkey(),
            self.owner_a,
            self.owner_b,
        )
    }

    fn collect_reward(&self, reward_index: u8) -> CollectReward {
        CollectReward {
            position_authority: self.authority.pubkey(),
            keys: self.keys,
            reward_owner_account: self.reward_owner,
            reward_vault: self.pool.reward_infos[0].vault,
            reward_index,
        }
    }

    /// Submit one instruction and return the transaction error
    async fn reject(&self, instruction: Instruction, sign_as_authority: bool) -> anyhow::Result<TransactionError> {
        let context = self.program_test()?.start_with_context().await;

        let mut signers = vec![&context.payer];
        if sign_as_authority {
            signers.push(&self.authority);
        }
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&context.payer.pubkey()),
            &signers,
            context.last_blockhash,
        );

        match context.banks_client.process_transaction(transaction).await {
            Ok(()) => anyhow::bail!("transaction was accepted"),
            Err(err) => Ok(err.unwrap()),
        }
    }
}

fn custom_error(code: u32) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(code))
}

fn orcatest_error(error: OrcatestError) -> TransactionError {
    custom_error(error as u32 + ERROR_CODE_OFFSET)
}

#[tokio::test]
async fn test_collect_reward_rejects_index_out_of_range() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let err = accounts
        .reject(accounts.collect_reward(3).instruction(), true)
        .await?;
    assert_eq!(err, orcatest_error(OrcatestError::InvalidRewardIndex));
    Ok(())
}

#[tokio::test]
async fn test_collect_reward_rejects_vault_of_other_slot() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let mut request = accounts.collect_reward(0);
    request.reward_vault = accounts.pool.token_vault_a;

    let err = accounts.reject(request.instruction(), true).await?;
    assert_eq!(err, orcatest_error(OrcatestError::InvalidRewardAccount));
    Ok(())
}

#[tokio::test]
async fn test_collect_reward_forwards_valid_accounts() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let err = accounts
        .reject(accounts.collect_reward(0).instruction(), true)
        .await?;
    assert_eq!(err, custom_error(WHIRLPOOL_REACHED));
    Ok(())
}

#[tokio::test]
async fn test_update_fees_rejects_tick_array_of_other_pool() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let mut request = UpdateFeesAndRewards::new(accounts.keys, &accounts.range);
    request.tick_array_upper = accounts.foreign_tick_array;

    let err = accounts.reject(request.instruction(), false).await?;
    assert_eq!(err, orcatest_error(OrcatestError::TickArrayWhirlpoolMismatch));
    Ok(())
}

#[tokio::test]
async fn test_update_fees_rejects_non_tick_array_account() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    // Whirlpool-owned but a position, not a tick array
    let mut request = UpdateFeesAndRewards::new(accounts.keys, &accounts.range);
    request.tick_array_lower = accounts.keys.position;

    let err = accounts.reject(request.instruction(), false).await?;
    assert_eq!(err, orcatest_error(OrcatestError::InvalidTickArray));
    Ok(())
}

#[tokio::test]
async fn test_update_fees_forwards_valid_accounts() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let request = UpdateFeesAndRewards::new(accounts.keys, &accounts.range);

    let err = accounts.reject(request.instruction(), false).await?;
    assert_eq!(err, custom_error(WHIRLPOOL_REACHED));
    Ok(())
}

#[tokio::test]
async fn test_increase_liquidity_rejects_wrong_vault() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let mut request = accounts.modify_liquidity();
    request.token_vault_a = accounts.stray_vault;

    let err = accounts.reject(request.increase(1_000, 10, 10), true).await?;
    assert_eq!(err, orcatest_error(OrcatestError::InvalidVault));
    Ok(())
}

#[tokio::test]
async fn test_decrease_liquidity_rejects_swapped_owner_accounts() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let mut request = accounts.modify_liquidity();
    request.token_owner_account_a = accounts.owner_b;
    request.token_owner_account_b = accounts.owner_a;

    let err = accounts.reject(request.decrease(1_000, 0, 0), true).await?;
    assert_eq!(err, orcatest_error(OrcatestError::InvalidMint));
    Ok(())
}

#[tokio::test]
async fn test_collect_fees_rejects_empty_position_token_account() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?.with_position_tokens(0);
    let err = accounts
        .reject(accounts.collect_fees().instruction(), true)
        .await?;
    assert_eq!(err, orcatest_error(OrcatestError::PositionTokenAmountInvalid));
    Ok(())
}

#[tokio::test]
async fn test_collect_fees_rejects_token_account_of_other_mint() -> anyhow::Result<()> {
    let accounts = PoolAccounts::new()?;
    let mut request = accounts.collect_fees();
    request.keys.position_token_account = accounts.owner_a;

    let err = accounts.reject(request.instruction(), true).await?;
    assert_eq!(err, orcatest_error(OrcatestError::PositionTokenAccountMismatch));
    Ok(())
}
