//! PDA derivation helpers
//!
//! Addresses of the Whirlpool program's accounts, derived with the seeds the
//! Whirlpool program validates. Every helper takes the program id so fixtures
//! built for another deployment derive consistently.

use orcatest::constants::{
    FEE_TIER_SEED, ORACLE_SEED, POSITION_SEED, TICK_ARRAY_SEED, WHIRLPOOL_SEED,
};
use solana_sdk::pubkey::Pubkey;

/// A program-derived address and its bump
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pda {
    pub address: Pubkey,
    pub bump: u8,
}

impl From<(Pubkey, u8)> for Pda {
    fn from((address, bump): (Pubkey, u8)) -> Self {
        Self { address, bump }
    }
}

pub fn derive_fee_tier(config: &Pubkey, tick_spacing: u16, program_id: &Pubkey) -> Pda {
    Pubkey::find_program_address(
        &[FEE_TIER_SEED, config.as_ref(), &tick_spacing.to_le_bytes()],
        program_id,
    )
    .into()
}

pub fn derive_whirlpool(
    config: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    tick_spacing: u16,
    program_id: &Pubkey,
) -> Pda {
    Pubkey::find_program_address(
        &[
            WHIRLPOOL_SEED,
            config.as_ref(),
            mint_a.as_ref(),
            mint_b.as_ref(),
            &tick_spacing.to_le_bytes(),
        ],
        program_id,
    )
    .into()
}

pub fn derive_position(position_mint: &Pubkey, program_id: &Pubkey) -> Pda {
    Pubkey::find_program_address(&[POSITION_SEED, position_mint.as_ref()], program_id).into()
}

/// Tick arrays are seeded with the decimal string of their start index
pub fn derive_tick_array(whirlpool: &Pubkey, start_tick_index: i32, program_id: &Pubkey) -> Pda {
    Pubkey::find_program_address(
        &[
            TICK_ARRAY_SEED,
            whirlpool.as_ref(),
            start_tick_index.to_string().as_bytes(),
        ],
        program_id,
    )
    .into()
}

pub fn derive_oracle(whirlpool: &Pubkey, program_id: &Pubkey) -> Pda {
    Pubkey::find_program_address(&[ORACLE_SEED, whirlpool.as_ref()], program_id).into()
}

/// Associated token account of `owner` for an SPL Token mint
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orcatest::whirlpool::WHIRLPOOL_PROGRAM_ID;

    #[test]
    fn test_tick_array_seed_is_decimal_string() {
        let whirlpool = Pubkey::new_unique();
        let pda = derive_tick_array(&whirlpool, -880, &WHIRLPOOL_PROGRAM_ID);

        let expected = Pubkey::create_program_address(
            &[b"tick_array", whirlpool.as_ref(), b"-880", &[pda.bump]],
            &WHIRLPOOL_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(pda.address, expected);
    }

    #[test]
    fn test_fee_tier_seed_uses_le_spacing() {
        let config = Pubkey::new_unique();
        let pda = derive_fee_tier(&config, 10, &WHIRLPOOL_PROGRAM_ID);

        let expected = Pubkey::create_program_address(
            &[b"fee_tier", config.as_ref(), &[10, 0], &[pda.bump]],
            &WHIRLPOOL_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(pda.address, expected);
        assert_ne!(pda, derive_fee_tier(&config, 64, &WHIRLPOOL_PROGRAM_ID));
    }

    #[test]
    fn test_whirlpool_depends_on_mint_order() {
        let config = Pubkey::new_unique();
        let (x, y) = (Pubkey::new_unique(), Pubkey::new_unique());

        let forward = derive_whirlpool(&config, &x, &y, 10, &WHIRLPOOL_PROGRAM_ID);
        let reverse = derive_whirlpool(&config, &y, &x, 10, &WHIRLPOOL_PROGRAM_ID);
        assert_ne!(forward.address, reverse.address);
        assert_eq!(
            forward,
            derive_whirlpool(&config, &x, &y, 10, &WHIRLPOOL_PROGRAM_ID)
        );
    }

    #[test]
    fn test_position_and_oracle_seeds() {
        let mint = Pubkey::new_unique();
        let position = derive_position(&mint, &WHIRLPOOL_PROGRAM_ID);
        let expected = Pubkey::create_program_address(
            &[b"position", mint.as_ref(), &[position.bump]],
            &WHIRLPOOL_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(position.address, expected);

        let pool = Pubkey::new_unique();
        let oracle = derive_oracle(&pool, &WHIRLPOOL_PROGRAM_ID);
        let expected = Pubkey::create_program_address(
            &[b"oracle", pool.as_ref(), &[oracle.bump]],
            &WHIRLPOOL_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(oracle.address, expected);
    }
}
