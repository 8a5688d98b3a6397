//! Test context threaded through every test step
//!
//! Owns the client and the harness configuration. Steps take a context and
//! return whatever the next step needs, so no state hides in globals.

use anchor_lang::AccountDeserialize;
use solana_program::program_pack::Pack;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use spl_token::state::Mint;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::TestClient;
use crate::constants::{DEFAULT_MINT_DECIMALS, IN_MEMORY_TIME_STEP};
use crate::environment::{HarnessConfig, TestEnvironment};
use crate::error::{HarnessError, HarnessResult};
use crate::fixtures::{
    build_config_fixture, build_fee_tier_fixture, build_pool_init_fixture, order_mint_pair,
    ConfigFixture, ConfigOverrides, FeeTierFixture, PoolInitFixture, TokenMintPair,
};
use crate::instructions::{InitializeConfig, InitializeFeeTier, InitializePool};
use crate::pda::associated_token_address;
use crate::poll::poll_until_with;
use crate::tokens::{
    create_associated_token_account_instruction, create_mint_instructions, mint_to_instruction,
};
use orcatest::whirlpool::{Position, Whirlpool};

/// Everything `init_test_pool` set up
#[derive(Debug)]
pub struct TestPoolParams {
    pub config: ConfigFixture,
    pub fee_tier: FeeTierFixture,
    pub pool: PoolInitFixture,
}

#[derive(Clone)]
pub struct HarnessContext {
    pub client: Arc<Mutex<TestClient>>,
    pub config: HarnessConfig,
    pub environment: TestEnvironment,
}

impl HarnessContext {
    pub async fn new(environment: TestEnvironment, config: HarnessConfig) -> HarnessResult<Self> {
        let client = TestClient::new(&environment, &config).await?;
        info!(?environment, "harness context ready");

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            config,
            environment,
        })
    }

    pub async fn payer(&self) -> Pubkey {
        self.client.lock().await.payer()
    }

    /// A signing copy of the payer, for steps where the payer is also an
    /// authority
    pub async fn payer_keypair(&self) -> Keypair {
        self.client.lock().await.payer_keypair().insecure_clone()
    }

    pub async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> HarnessResult<Signature> {
        let signature = self
            .client
            .lock()
            .await
            .process_transaction(instructions, signers)
            .await?;
        debug!(%signature, count = instructions.len(), "submitted");
        Ok(signature)
    }

    // ------------------------------------------------------------------
    // Funding and reads
    // ------------------------------------------------------------------

    pub async fn airdrop(&self, to: &Pubkey, lamports: u64) -> HarnessResult<()> {
        self.client.lock().await.airdrop(to, lamports).await
    }

    pub async fn token_balance(&self, token_account: &Pubkey) -> HarnessResult<u64> {
        self.client.lock().await.get_token_balance(token_account).await
    }

    pub async fn lamport_balance(&self, address: &Pubkey) -> HarnessResult<u64> {
        self.client.lock().await.get_lamport_balance(address).await
    }

    pub async fn minimum_balance_for_rent_exemption(&self, len: usize) -> HarnessResult<u64> {
        self.client
            .lock()
            .await
            .minimum_balance_for_rent_exemption(len)
            .await
    }

    pub async fn fetch<T: AccountDeserialize>(&self, address: &Pubkey) -> HarnessResult<Option<T>> {
        self.client.lock().await.get_account(address).await
    }

    async fn fetch_required<T: AccountDeserialize>(&self, address: &Pubkey) -> HarnessResult<T> {
        self.fetch(address)
            .await?
            .ok_or(HarnessError::AccountNotFound(*address))
    }

    pub async fn fetch_whirlpool(&self, address: &Pubkey) -> HarnessResult<Whirlpool> {
        self.fetch_required(address).await
    }

    pub async fn fetch_position(&self, address: &Pubkey) -> HarnessResult<Position> {
        self.fetch_required(address).await
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    /// New mint with the harness default decimals
    pub async fn create_mint(&self, mint_authority: &Pubkey) -> HarnessResult<Pubkey> {
        self.create_mint_with_decimals(mint_authority, DEFAULT_MINT_DECIMALS)
            .await
    }

    pub async fn create_mint_with_decimals(
        &self,
        mint_authority: &Pubkey,
        decimals: u8,
    ) -> HarnessResult<Pubkey> {
        let mint = Keypair::new();
        let payer = self.payer().await;
        let rent = self.minimum_balance_for_rent_exemption(Mint::LEN).await?;

        let instructions =
            create_mint_instructions(&payer, &mint.pubkey(), mint_authority, decimals, rent)?;
        self.submit(&instructions, &[&mint]).await?;
        Ok(mint.pubkey())
    }

    /// Two fresh mints already in pool order
    pub async fn create_in_order_mints(&self, mint_authority: &Pubkey) -> HarnessResult<TokenMintPair> {
        let mint_x = self.create_mint(mint_authority).await?;
        let mint_y = self.create_mint(mint_authority).await?;
        order_mint_pair(mint_x, mint_y)
    }

    pub async fn create_associated_token_account(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> HarnessResult<Pubkey> {
        let payer = self.payer().await;
        let ix = create_associated_token_account_instruction(&payer, owner, mint);
        self.submit(&[ix], &[]).await?;
        Ok(associated_token_address(owner, mint))
    }

    pub async fn mint_to(
        &self,
        mint: &Pubkey,
        destination: &Pubkey,
        mint_authority: &Keypair,
        amount: u64,
    ) -> HarnessResult<()> {
        let ix = mint_to_instruction(mint, destination, &mint_authority.pubkey(), amount)?;
        self.submit(&[ix], &[mint_authority]).await?;
        Ok(())
    }

    /// Create `owner`'s ATA and fund it in one transaction
    pub async fn create_and_mint_to_associated_token_account(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        mint_authority: &Keypair,
        amount: u64,
    ) -> HarnessResult<Pubkey> {
        let payer = self.payer().await;
        let ata = associated_token_address(owner, mint);
        let instructions = vec![
            create_associated_token_account_instruction(&payer, owner, mint),
            mint_to_instruction(mint, &ata, &mint_authority.pubkey(), amount)?,
        ];
        self.submit(&instructions, &[mint_authority]).await?;
        Ok(ata)
    }

    /// Fund `owner` with both tokens of a pair, payer as mint authority
    pub async fn mint_tokens_to_test_account(
        &self,
        mints: &TokenMintPair,
        amount_a: u64,
        amount_b: u64,
        owner: &Pubkey,
    ) -> HarnessResult<(Pubkey, Pubkey)> {
        let authority = self.payer_keypair().await;
        let ata_a = self
            .create_and_mint_to_associated_token_account(owner, &mints.mint_a, &authority, amount_a)
            .await?;
        let ata_b = self
            .create_and_mint_to_associated_token_account(owner, &mints.mint_b, &authority, amount_b)
            .await?;
        Ok((ata_a, ata_b))
    }

    // ------------------------------------------------------------------
    // Pool bootstrap
    // ------------------------------------------------------------------

    /// Funder of a bootstrap step: `funder` when given, otherwise the payer
    async fn funder_key(&self, funder: Option<&Keypair>) -> Pubkey {
        match funder {
            Some(funder) => funder.pubkey(),
            None => self.payer().await,
        }
    }

    pub async fn init_config(
        &self,
        overrides: Option<ConfigOverrides>,
        funder: Option<&Keypair>,
    ) -> HarnessResult<ConfigFixture> {
        let fixture = build_config_fixture(overrides);
        let request = InitializeConfig::new(&fixture, self.funder_key(funder).await);

        let mut signers = vec![&fixture.config_keypair];
        signers.extend(funder);
        self.submit(&[request.instruction()], &signers).await?;

        info!(config = %fixture.config(), "initialized whirlpools config");
        Ok(fixture)
    }

    pub async fn init_fee_tier(
        &self,
        config: &ConfigFixture,
        tick_spacing: u16,
        default_fee_rate: u16,
        funder: Option<&Keypair>,
    ) -> HarnessResult<FeeTierFixture> {
        let fixture = build_fee_tier_fixture(config, tick_spacing, default_fee_rate)?;
        let request = InitializeFeeTier::new(&fixture, self.funder_key(funder).await);

        let mut signers = vec![&config.fee_authority_keypair];
        signers.extend(funder);
        self.submit(&[request.instruction()], &signers).await?;

        info!(fee_tier = %fixture.fee_tier.address, tick_spacing, "initialized fee tier");
        Ok(fixture)
    }

    /// Config and fee tier submitted, two fresh mints created, pool fixture
    /// built but not yet submitted
    pub async fn build_test_pool_params(
        &self,
        tick_spacing: u16,
        default_fee_rate: u16,
        initial_sqrt_price: u128,
        funder: Option<&Keypair>,
    ) -> HarnessResult<TestPoolParams> {
        let config = self.init_config(None, funder).await?;
        let fee_tier = self
            .init_fee_tier(&config, tick_spacing, default_fee_rate, funder)
            .await?;

        let payer = self.payer().await;
        let mints = self.create_in_order_mints(&payer).await?;
        let pool = build_pool_init_fixture(
            &config,
            &fee_tier,
            mints.mint_a,
            mints.mint_b,
            tick_spacing,
            initial_sqrt_price,
        )?;

        Ok(TestPoolParams {
            config,
            fee_tier,
            pool,
        })
    }

    /// `build_test_pool_params` with the default fee rate, then the pool
    /// itself; `funder` pays rent for every account when given
    pub async fn init_test_pool(
        &self,
        tick_spacing: u16,
        initial_sqrt_price: u128,
        funder: Option<&Keypair>,
    ) -> HarnessResult<TestPoolParams> {
        let params = self
            .build_test_pool_params(
                tick_spacing,
                crate::constants::DEFAULT_FEE_RATE,
                initial_sqrt_price,
                funder,
            )
            .await?;

        let request = InitializePool::new(&params.pool, self.funder_key(funder).await);
        let mut signers = vec![
            &params.pool.token_vault_a_keypair,
            &params.pool.token_vault_b_keypair,
        ];
        signers.extend(funder);
        self.submit(&[request.instruction()], &signers).await?;

        info!(whirlpool = %params.pool.whirlpool(), "initialized pool");
        Ok(params)
    }

    // ------------------------------------------------------------------
    // Waiting
    // ------------------------------------------------------------------

    /// Retry `check` until it yields a value, within the configured poll
    /// budget. In-memory the bank clock moves forward between attempts;
    /// against a validator the interval is slept.
    pub async fn wait_until<T, P, Fut>(&self, condition: &str, mut check: P) -> HarnessResult<T>
    where
        P: FnMut(HarnessContext) -> Fut,
        Fut: Future<Output = HarnessResult<Option<T>>>,
    {
        let policy = self.config.poll_policy();
        let in_memory = self.environment.is_in_memory();

        poll_until_with(
            policy,
            condition,
            || check(self.clone()),
            || {
                let ctx = self.clone();
                async move {
                    if in_memory {
                        ctx.client
                            .lock()
                            .await
                            .advance_time(IN_MEMORY_TIME_STEP)
                            .await
                    } else {
                        tokio::time::sleep(policy.interval).await;
                        Ok(())
                    }
                }
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryClient;
    use std::time::Duration;

    async fn bare_context() -> HarnessContext {
        let config = HarnessConfig::default()
            .with_poll_timeout(Duration::from_millis(30))
            .with_poll_interval(Duration::from_millis(10));
        let client = InMemoryClient::new(&[], &config).await.unwrap();

        HarnessContext {
            client: Arc::new(Mutex::new(TestClient::InMemory(client))),
            config,
            environment: TestEnvironment::InMemory,
        }
    }

    #[tokio::test]
    async fn test_mint_and_fund_accounts() {
        let ctx = bare_context().await;
        let owner = Pubkey::new_unique();

        let mints = ctx.create_in_order_mints(&ctx.payer().await).await.unwrap();
        assert!(mints.mint_a.to_bytes() < mints.mint_b.to_bytes());

        let (ata_a, ata_b) = ctx
            .mint_tokens_to_test_account(&mints, 150, 75, &owner)
            .await
            .unwrap();
        assert_eq!(ctx.token_balance(&ata_a).await.unwrap(), 150);
        assert_eq!(ctx.token_balance(&ata_b).await.unwrap(), 75);

        let authority = ctx.payer_keypair().await;
        ctx.mint_to(&mints.mint_a, &ata_a, &authority, 50).await.unwrap();
        assert_eq!(ctx.token_balance(&ata_a).await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_missing_whirlpool_is_account_not_found() {
        let ctx = bare_context().await;
        let address = Pubkey::new_unique();

        assert!(matches!(
            ctx.fetch_whirlpool(&address).await,
            Err(HarnessError::AccountNotFound(missing)) if missing == address
        ));
        assert!(ctx.fetch::<Position>(&address).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        let ctx = bare_context().await;
        let result: HarnessResult<()> = ctx
            .wait_until("nothing", |_ctx| async { Ok(None) })
            .await;

        assert!(matches!(result, Err(HarnessError::Timeout { attempts: 3, .. })));
    }

    #[tokio::test]
    async fn test_wait_until_sees_advanced_clock() {
        let ctx = bare_context().await;
        let start: solana_sdk::clock::Clock = match &mut *ctx.client.lock().await {
            TestClient::InMemory(client) => client.context.banks_client.get_sysvar().await.unwrap(),
            TestClient::Rpc(_) => unreachable!(),
        };

        let start_ts = start.unix_timestamp;

        let now = ctx
            .wait_until("clock moved", |ctx| async move {
                let clock: solana_sdk::clock::Clock = match &mut *ctx.client.lock().await {
                    TestClient::InMemory(client) => client.context.banks_client.get_sysvar().await?,
                    TestClient::Rpc(_) => unreachable!(),
                };
                Ok::<_, HarnessError>((clock.unix_timestamp > start_ts).then_some(clock.unix_timestamp))
            })
            .await
            .unwrap();

        assert!(now >= start_ts + IN_MEMORY_TIME_STEP.as_secs() as i64);
    }
}
