//! SPL Token instruction builders

use solana_program::program_pack::Pack;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use spl_token::state::Mint;

use crate::error::HarnessResult;

/// Allocate and initialize a mint with no freeze authority
pub fn create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    decimals: u8,
    rent_lamports: u64,
) -> HarnessResult<Vec<Instruction>> {
    Ok(vec![
        system_instruction::create_account(
            payer,
            mint,
            rent_lamports,
            Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint(
            &spl_token::id(),
            mint,
            mint_authority,
            None,
            decimals,
        )?,
    ])
}

pub fn create_associated_token_account_instruction(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        owner,
        mint,
        &spl_token::id(),
    )
}

pub fn mint_to_instruction(
    mint: &Pubkey,
    destination: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> HarnessResult<Instruction> {
    Ok(spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        destination,
        mint_authority,
        &[],
        amount,
    )?)
}
