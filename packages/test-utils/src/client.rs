//! Unified test client that works with both ProgramTest and RPC

use anchor_lang::AccountDeserialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::program_pack::Pack;
use solana_program_test::{ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    bpf_loader,
    clock::Clock,
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_token::state::Account as TokenAccount;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_AIRDROP, ORCATEST_PROGRAM_PATH, WHIRLPOOL_PROGRAM_PATH};
use crate::environment::{HarnessConfig, TestEnvironment};
use crate::error::{HarnessError, HarnessResult};
use crate::units::sol;
use orcatest::whirlpool::WHIRLPOOL_PROGRAM_ID;

/// Slot duration assumed when converting wall time into slots
const MS_PER_SLOT: u128 = 400;

/// A compiled program loaded into the in-memory bank
#[derive(Clone, Debug)]
pub struct ProgramBinary {
    pub program_id: Pubkey,
    pub path: PathBuf,
}

impl ProgramBinary {
    pub fn new(program_id: Pubkey, path: impl Into<PathBuf>) -> Self {
        Self {
            program_id,
            path: path.into(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> HarnessResult<Account> {
        let data = std::fs::read(&self.path).map_err(|err| {
            HarnessError::Config(format!(
                "failed to read program {} from {}: {err}",
                self.program_id,
                self.path.display()
            ))
        })?;

        Ok(Account {
            lamports: 1_000_000,
            data,
            owner: bpf_loader::id(),
            executable: true,
            rent_epoch: 0,
        })
    }
}

/// orcatest from `anchor build` and the dumped Whirlpool program
pub fn default_program_binaries() -> Vec<ProgramBinary> {
    vec![
        ProgramBinary::new(orcatest::ID, ORCATEST_PROGRAM_PATH),
        ProgramBinary::new(WHIRLPOOL_PROGRAM_ID, WHIRLPOOL_PROGRAM_PATH),
    ]
}

pub fn program_binaries_available(binaries: &[ProgramBinary]) -> bool {
    let missing: Vec<&Path> = binaries
        .iter()
        .filter(|binary| !binary.exists())
        .map(|binary| binary.path.as_path())
        .collect();
    for path in &missing {
        warn!(path = %path.display(), "program binary not found");
    }
    missing.is_empty()
}

/// Enum that wraps different client implementations
pub enum TestClient {
    InMemory(InMemoryClient),
    Rpc(RpcTestClient),
}

impl TestClient {
    pub async fn new(environment: &TestEnvironment, config: &HarnessConfig) -> HarnessResult<Self> {
        match environment {
            TestEnvironment::InMemory => Ok(TestClient::InMemory(
                InMemoryClient::new(&default_program_binaries(), config).await?,
            )),
            TestEnvironment::Localnet { url, payer_path } => Ok(TestClient::Rpc(
                RpcTestClient::new(url, payer_path.as_deref(), config).await?,
            )),
        }
    }

    /// Sign with the payer plus `signers` and wait for confirmation
    pub async fn process_transaction(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> HarnessResult<Signature> {
        match self {
            TestClient::InMemory(client) => client.process_transaction(instructions, signers).await,
            TestClient::Rpc(client) => client.process_transaction(instructions, signers).await,
        }
    }

    /// Get and deserialize account data, `None` when absent or closed
    pub async fn get_account<T: AccountDeserialize>(
        &mut self,
        address: &Pubkey,
    ) -> HarnessResult<Option<T>> {
        match self.get_account_data(address).await? {
            Some(data) if data.len() >= 8 => Ok(Some(T::try_deserialize(&mut data.as_slice())?)),
            _ => Ok(None),
        }
    }

    pub async fn get_account_data(&mut self, address: &Pubkey) -> HarnessResult<Option<Vec<u8>>> {
        match self {
            TestClient::InMemory(client) => client.get_account_data(address).await,
            TestClient::Rpc(client) => client.get_account_data(address).await,
        }
    }

    /// Token account balance; a missing account is `AccountNotFound`
    pub async fn get_token_balance(&mut self, address: &Pubkey) -> HarnessResult<u64> {
        let data = self
            .get_account_data(address)
            .await?
            .ok_or(HarnessError::AccountNotFound(*address))?;
        Ok(TokenAccount::unpack(&data)?.amount)
    }

    pub async fn get_lamport_balance(&mut self, address: &Pubkey) -> HarnessResult<u64> {
        match self {
            TestClient::InMemory(client) => client.get_lamport_balance(address).await,
            TestClient::Rpc(client) => client.get_lamport_balance(address).await,
        }
    }

    pub async fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> HarnessResult<()> {
        match self {
            TestClient::InMemory(client) => client.airdrop(to, lamports).await,
            TestClient::Rpc(client) => client.airdrop(to, lamports).await,
        }
    }

    pub async fn minimum_balance_for_rent_exemption(&mut self, len: usize) -> HarnessResult<u64> {
        match self {
            TestClient::InMemory(client) => client.minimum_balance_for_rent_exemption(len).await,
            TestClient::Rpc(client) => client.minimum_balance_for_rent_exemption(len).await,
        }
    }

    /// Move chain time forward; in-memory this warps the bank, over RPC it
    /// waits real time
    pub async fn advance_time(&mut self, duration: Duration) -> HarnessResult<()> {
        match self {
            TestClient::InMemory(client) => client.advance_time(duration).await,
            TestClient::Rpc(_) => {
                tokio::time::sleep(duration).await;
                Ok(())
            }
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer_keypair().pubkey()
    }

    pub fn payer_keypair(&self) -> &Keypair {
        match self {
            TestClient::InMemory(client) => &client.context.payer,
            TestClient::Rpc(client) => &client.payer,
        }
    }
}

/// Payer first, then every other signer once
fn collect_signers<'a>(payer: &'a Keypair, signers: &[&'a Keypair]) -> Vec<&'a Keypair> {
    let mut all_signers: Vec<&Keypair> = vec![payer];
    for signer in signers {
        if !all_signers.iter().any(|s| s.pubkey() == signer.pubkey()) {
            all_signers.push(signer);
        }
    }
    all_signers
}

fn build_transaction(
    instructions: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
    recent_blockhash: solana_sdk::hash::Hash,
) -> HarnessResult<Transaction> {
    let all_signers = collect_signers(payer, signers);
    let mut tx = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    tx.try_sign(&all_signers, recent_blockhash)
        .map_err(|err| HarnessError::invalid_argument(format!("cannot sign transaction: {err}")))?;
    Ok(tx)
}

// Implementation for ProgramTest (in-memory testing)
pub struct InMemoryClient {
    pub context: ProgramTestContext,
}

impl InMemoryClient {
    pub async fn new(binaries: &[ProgramBinary], config: &HarnessConfig) -> HarnessResult<Self> {
        let mut program_test = ProgramTest::default();
        for binary in binaries {
            program_test.add_account(binary.program_id, binary.load()?);
            debug!(program = %binary.program_id, path = %binary.path.display(), "loaded program");
        }
        program_test.set_compute_max_units(config.compute_unit_limit);

        let context = program_test.start_with_context().await;
        info!(payer = %context.payer.pubkey(), "in-memory bank started");
        Ok(Self { context })
    }

    pub async fn process_transaction(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> HarnessResult<Signature> {
        let blockhash = self.context.banks_client.get_latest_blockhash().await?;
        self.context.last_blockhash = blockhash;

        let tx = build_transaction(instructions, &self.context.payer, signers, blockhash)?;
        let signature = tx.signatures[0];
        self.context.banks_client.process_transaction(tx).await?;
        Ok(signature)
    }

    pub async fn get_account_data(&mut self, address: &Pubkey) -> HarnessResult<Option<Vec<u8>>> {
        Ok(self
            .context
            .banks_client
            .get_account(*address)
            .await?
            .map(|account| account.data))
    }

    pub async fn get_lamport_balance(&mut self, address: &Pubkey) -> HarnessResult<u64> {
        Ok(self.context.banks_client.get_balance(*address).await?)
    }

    pub async fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> HarnessResult<()> {
        let ix = system_instruction::transfer(&self.context.payer.pubkey(), to, lamports);
        self.process_transaction(&[ix], &[]).await?;
        Ok(())
    }

    pub async fn minimum_balance_for_rent_exemption(&mut self, len: usize) -> HarnessResult<u64> {
        let rent = self.context.banks_client.get_rent().await?;
        Ok(rent.minimum_balance(len))
    }

    /// Warp at least one slot ahead and move the clock by `duration`
    pub async fn advance_time(&mut self, duration: Duration) -> HarnessResult<()> {
        let clock: Clock = self.context.banks_client.get_sysvar().await?;
        let slots = (duration.as_millis() / MS_PER_SLOT).max(1) as u64;
        self.context.warp_to_slot(clock.slot + slots)?;

        let mut clock: Clock = self.context.banks_client.get_sysvar().await?;
        clock.unix_timestamp = clock
            .unix_timestamp
            .saturating_add(duration.as_secs() as i64);
        self.context.set_sysvar(&clock);
        debug!(slot = clock.slot, unix_timestamp = clock.unix_timestamp, "advanced clock");
        Ok(())
    }
}

// Implementation for RPC client (localnet testing)
pub struct RpcTestClient {
    pub rpc_client: RpcClient,
    pub payer: Keypair,
    pub commitment: CommitmentConfig,
}

impl RpcTestClient {
    pub async fn new(url: &str, payer_path: Option<&str>, config: &HarnessConfig) -> HarnessResult<Self> {
        let rpc_client = RpcClient::new_with_commitment(url.to_string(), config.commitment);

        let payer = match payer_path {
            Some(path) => read_keypair_file(path).map_err(|err| {
                HarnessError::Config(format!("cannot read payer keypair {path}: {err}"))
            })?,
            None => {
                let payer = Keypair::new();
                let signature = rpc_client
                    .request_airdrop(&payer.pubkey(), DEFAULT_AIRDROP)
                    .await?;
                rpc_client.poll_for_signature(&signature).await?;
                info!(sol = sol(DEFAULT_AIRDROP), "funded fresh payer");
                payer
            }
        };
        info!(url, payer = %payer.pubkey(), "rpc client ready");

        Ok(Self {
            rpc_client,
            payer,
            commitment: config.commitment,
        })
    }

    pub async fn process_transaction(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> HarnessResult<Signature> {
        let blockhash = self.rpc_client.get_latest_blockhash().await?;
        let tx = build_transaction(instructions, &self.payer, signers, blockhash)?;

        let signature = self.rpc_client.send_and_confirm_transaction(&tx).await?;
        debug!(%signature, "transaction confirmed");
        Ok(signature)
    }

    pub async fn get_account_data(&mut self, address: &Pubkey) -> HarnessResult<Option<Vec<u8>>> {
        Ok(self
            .rpc_client
            .get_account_with_commitment(address, self.commitment)
            .await?
            .value
            .map(|account| account.data))
    }

    pub async fn get_lamport_balance(&mut self, address: &Pubkey) -> HarnessResult<u64> {
        Ok(self
            .rpc_client
            .get_balance_with_commitment(address, self.commitment)
            .await?
            .value)
    }

    pub async fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> HarnessResult<()> {
        let signature = self.rpc_client.request_airdrop(to, lamports).await?;
        self.rpc_client.poll_for_signature(&signature).await?;
        Ok(())
    }

    pub async fn minimum_balance_for_rent_exemption(&mut self, len: usize) -> HarnessResult<u64> {
        Ok(self
            .rpc_client
            .get_minimum_balance_for_rent_exemption(len)
            .await?)
    }
}
