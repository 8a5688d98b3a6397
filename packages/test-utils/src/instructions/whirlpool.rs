//! Requests sent straight to the Whirlpool program
//!
//! Pool bootstrap, reward setup and swaps have no orcatest wrapper; the
//! harness signs them itself. Account order and flags follow the Whirlpool
//! program's instruction contexts.

use anchor_lang::InstructionData;
use orcatest::whirlpool::instructions::{
    readonly, readonly_signer, writable, writable_signer, InitializeConfigArgs,
    InitializeFeeTierArgs, InitializePoolArgs, InitializeRewardArgs, SetRewardEmissionsArgs,
    SwapArgs, WhirlpoolBumps,
};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program, sysvar};

use crate::fixtures::{ConfigFixture, FeeTierFixture, PoolInitFixture};
use crate::pda::derive_oracle;

#[derive(Clone, Debug)]
pub struct InitializeConfig {
    pub program_id: Pubkey,
    pub config: Pubkey,
    pub funder: Pubkey,
    pub args: InitializeConfigArgs,
}

impl InitializeConfig {
    /// Signers: the funder and the fixture's config keypair
    pub fn new(fixture: &ConfigFixture, funder: Pubkey) -> Self {
        Self {
            program_id: fixture.program_id,
            config: fixture.config(),
            funder,
            args: InitializeConfigArgs {
                fee_authority: fixture.fee_authority(),
                collect_protocol_fees_authority: fixture.collect_protocol_fees_authority(),
                reward_emissions_super_authority: fixture.reward_emissions_super_authority(),
                default_protocol_fee_rate: fixture.default_protocol_fee_rate,
            },
        }
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                writable_signer(self.config),
                writable_signer(self.funder),
                readonly(system_program::id()),
            ],
            data: self.args.data(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InitializeFeeTier {
    pub program_id: Pubkey,
    pub config: Pubkey,
    pub fee_tier: Pubkey,
    pub funder: Pubkey,
    pub fee_authority: Pubkey,
    pub args: InitializeFeeTierArgs,
}

impl InitializeFeeTier {
    /// Signers: the funder and the config's fee authority
    pub fn new(fixture: &FeeTierFixture, funder: Pubkey) -> Self {
        Self {
            program_id: fixture.program_id,
            config: fixture.config,
            fee_tier: fixture.fee_tier.address,
            funder,
            fee_authority: fixture.fee_authority,
            args: InitializeFeeTierArgs {
                tick_spacing: fixture.tick_spacing,
                default_fee_rate: fixture.default_fee_rate,
            },
        }
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                readonly(self.config),
                writable(self.fee_tier),
                writable_signer(self.funder),
                readonly_signer(self.fee_authority),
                readonly(system_program::id()),
            ],
            data: self.args.data(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InitializePool {
    pub program_id: Pubkey,
    pub whirlpools_config: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub funder: Pubkey,
    pub whirlpool: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    pub fee_tier: Pubkey,
    pub args: InitializePoolArgs,
}

impl InitializePool {
    /// Signers: the funder and both vault keypairs of the fixture
    pub fn new(fixture: &PoolInitFixture, funder: Pubkey) -> Self {
        Self {
            program_id: fixture.program_id,
            whirlpools_config: fixture.config,
            token_mint_a: fixture.mints.mint_a,
            token_mint_b: fixture.mints.mint_b,
            funder,
            whirlpool: fixture.whirlpool(),
            token_vault_a: fixture.token_vault_a(),
            token_vault_b: fixture.token_vault_b(),
            fee_tier: fixture.fee_tier,
            args: InitializePoolArgs {
                bumps: WhirlpoolBumps {
                    whirlpool_bump: fixture.whirlpool.bump,
                },
                tick_spacing: fixture.tick_spacing,
                initial_sqrt_price: fixture.initial_sqrt_price,
            },
        }
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                readonly(self.whirlpools_config),
                readonly(self.token_mint_a),
                readonly(self.token_mint_b),
                writable_signer(self.funder),
                writable(self.whirlpool),
                writable_signer(self.token_vault_a),
                writable_signer(self.token_vault_b),
                readonly(self.fee_tier),
                readonly(spl_token::id()),
                readonly(system_program::id()),
                readonly(sysvar::rent::id()),
            ],
            data: self.args.data(),
        }
    }
}

/// Signers: the reward authority, the funder and the new reward vault
#[derive(Clone, Debug)]
pub struct InitializeReward {
    pub program_id: Pubkey,
    pub reward_authority: Pubkey,
    pub funder: Pubkey,
    pub whirlpool: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_index: u8,
}

impl InitializeReward {
    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                readonly_signer(self.reward_authority),
                writable_signer(self.funder),
                writable(self.whirlpool),
                readonly(self.reward_mint),
                writable_signer(self.reward_vault),
                readonly(spl_token::id()),
                readonly(system_program::id()),
                readonly(sysvar::rent::id()),
            ],
            data: InitializeRewardArgs {
                reward_index: self.reward_index,
            }
            .data(),
        }
    }
}

/// The vault must already hold a day of emissions or the Whirlpool program
/// rejects the rate
#[derive(Clone, Debug)]
pub struct SetRewardEmissions {
    pub program_id: Pubkey,
    pub whirlpool: Pubkey,
    pub reward_authority: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_index: u8,
    /// Q64.64 tokens per second
    pub emissions_per_second_x64: u128,
}

impl SetRewardEmissions {
    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                writable(self.whirlpool),
                readonly_signer(self.reward_authority),
                readonly(self.reward_vault),
            ],
            data: SetRewardEmissionsArgs {
                reward_index: self.reward_index,
                emissions_per_second_x64: self.emissions_per_second_x64,
            }
            .data(),
        }
    }
}

/// Token amount per day expressed as a Q64.64 per-second emission rate
pub fn emissions_per_second_x64(tokens_per_day: u64) -> u128 {
    ((tokens_per_day as u128) << 64) / 86_400
}

#[derive(Clone, Debug)]
pub struct Swap {
    pub program_id: Pubkey,
    pub token_authority: Pubkey,
    pub whirlpool: Pubkey,
    pub token_owner_account_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_owner_account_b: Pubkey,
    pub token_vault_b: Pubkey,
    /// Traversed in order from the current price
    pub tick_arrays: [Pubkey; 3],
    pub args: SwapArgs,
}

impl Swap {
    pub fn oracle(&self) -> Pubkey {
        derive_oracle(&self.whirlpool, &self.program_id).address
    }

    pub fn instruction(&self) -> Instruction {
        let [tick_array_0, tick_array_1, tick_array_2] = self.tick_arrays;
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                readonly(spl_token::id()),
                readonly_signer(self.token_authority),
                writable(self.whirlpool),
                writable(self.token_owner_account_a),
                writable(self.token_vault_a),
                writable(self.token_owner_account_b),
                writable(self.token_vault_b),
                writable(tick_array_0),
                writable(tick_array_1),
                writable(tick_array_2),
                // oracle is not created by this program version but must be writable
                writable(self.oracle()),
            ],
            data: self.args.data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_FEE_RATE, PRICE_1_TO_1};
    use crate::fixtures::{build_config_fixture, build_fee_tier_fixture, build_pool_init_fixture};
    use orcatest::whirlpool::instructions::discriminators;
    use orcatest::whirlpool::WHIRLPOOL_PROGRAM_ID;

    fn flags(ix: &Instruction) -> Vec<(bool, bool)> {
        ix.accounts
            .iter()
            .map(|meta| (meta.is_signer, meta.is_writable))
            .collect()
    }

    #[test]
    fn test_initialize_config_from_fixture() {
        let fixture = build_config_fixture(None);
        let funder = Pubkey::new_unique();
        let ix = InitializeConfig::new(&fixture, funder).instruction();

        assert_eq!(ix.program_id, WHIRLPOOL_PROGRAM_ID);
        assert_eq!(ix.accounts[0].pubkey, fixture.config());
        assert_eq!(ix.accounts[1].pubkey, funder);
        assert_eq!(flags(&ix), vec![(true, true), (true, true), (false, false)]);

        assert_eq!(&ix.data[..8], &discriminators::INITIALIZE_CONFIG);
        assert_eq!(&ix.data[8..40], fixture.fee_authority().as_ref());
        assert_eq!(&ix.data[104..106], &300u16.to_le_bytes());
        assert_eq!(ix.data.len(), 106);
    }

    #[test]
    fn test_initialize_fee_tier_requires_fee_authority() {
        let config = build_config_fixture(None);
        let fee_tier = build_fee_tier_fixture(&config, 10, DEFAULT_FEE_RATE).unwrap();
        let ix = InitializeFeeTier::new(&fee_tier, Pubkey::new_unique()).instruction();

        assert_eq!(ix.accounts[1].pubkey, fee_tier.fee_tier.address);
        assert_eq!(ix.accounts[3].pubkey, config.fee_authority());
        assert_eq!(
            flags(&ix),
            vec![
                (false, false),
                (false, true),
                (true, true),
                (true, false),
                (false, false)
            ]
        );
        assert_eq!(&ix.data[8..], &[10, 0, 0xb8, 0x0b]);
    }

    #[test]
    fn test_initialize_pool_orders_accounts() {
        let config = build_config_fixture(None);
        let fee_tier = build_fee_tier_fixture(&config, 10, DEFAULT_FEE_RATE).unwrap();
        let pool = build_pool_init_fixture(
            &config,
            &fee_tier,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            10,
            PRICE_1_TO_1,
        )
        .unwrap();
        let ix = InitializePool::new(&pool, Pubkey::new_unique()).instruction();

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(keys[1], pool.mints.mint_a);
        assert_eq!(keys[2], pool.mints.mint_b);
        assert_eq!(keys[4], pool.whirlpool());
        assert_eq!(keys[7], fee_tier.fee_tier.address);
        assert_eq!(keys[8], spl_token::id());
        assert_eq!(keys.len(), 11);
        assert!(ix.accounts[5].is_signer && ix.accounts[6].is_signer);

        assert_eq!(ix.data[8], pool.whirlpool.bump);
        assert_eq!(&ix.data[11..27], &PRICE_1_TO_1.to_le_bytes());
    }

    #[test]
    fn test_swap_accounts() {
        let whirlpool = Pubkey::new_unique();
        let tick_arrays = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let swap = Swap {
            program_id: WHIRLPOOL_PROGRAM_ID,
            token_authority: Pubkey::new_unique(),
            whirlpool,
            token_owner_account_a: Pubkey::new_unique(),
            token_vault_a: Pubkey::new_unique(),
            token_owner_account_b: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            tick_arrays,
            args: SwapArgs {
                amount: 10,
                other_amount_threshold: 0,
                sqrt_price_limit: 1 << 60,
                amount_specified_is_input: true,
                a_to_b: true,
            },
        };
        let ix = swap.instruction();

        assert_eq!(ix.accounts.len(), 11);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts[7].pubkey, tick_arrays[0]);
        assert_eq!(ix.accounts[9].pubkey, tick_arrays[2]);
        assert_eq!(
            ix.accounts[10].pubkey,
            derive_oracle(&whirlpool, &WHIRLPOOL_PROGRAM_ID).address
        );
        assert!(ix.accounts[10].is_writable);
    }

    #[test]
    fn test_reward_requests() {
        let init = InitializeReward {
            program_id: WHIRLPOOL_PROGRAM_ID,
            reward_authority: Pubkey::new_unique(),
            funder: Pubkey::new_unique(),
            whirlpool: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            reward_index: 0,
        }
        .instruction();
        assert_eq!(init.data, [&discriminators::INITIALIZE_REWARD[..], &[0]].concat());
        assert!(init.accounts[4].is_signer && init.accounts[4].is_writable);

        let rate = emissions_per_second_x64(100_000);
        let set = SetRewardEmissions {
            program_id: WHIRLPOOL_PROGRAM_ID,
            whirlpool: Pubkey::new_unique(),
            reward_authority: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            reward_index: 1,
            emissions_per_second_x64: rate,
        }
        .instruction();
        assert_eq!(set.data[8], 1);
        assert_eq!(&set.data[9..25], &rate.to_le_bytes());
        assert_eq!(flags(&set), vec![(false, true), (true, false), (false, false)]);
    }

    #[test]
    fn test_emission_rate_covers_a_day() {
        let rate = emissions_per_second_x64(86_400);
        assert_eq!(rate, 1u128 << 64);
    }
}
