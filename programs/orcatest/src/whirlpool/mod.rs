//! Orca Whirlpools integration module
//!
//! Bindings for the external Whirlpool program, written against its on-chain
//! wire format rather than a published CPI crate.
//!
//! ## Key Components
//!
//! - **state**: read-only mirrors of `Whirlpool`, `Position` and `TickArray`
//! - **instructions**: discriminators and argument structs for every
//!   Whirlpool instruction the program or its harness sends
//! - **cpi**: invoke helpers used by the orcatest instruction handlers
//!
//! Argument structs implement Anchor's `InstructionData`, so the off-chain
//! harness builds its direct Whirlpool instructions from the same types.

pub mod cpi;
pub mod instructions;
pub mod state;

pub use state::*;

use anchor_lang::prelude::*;

/// Whirlpool program id
pub mod program {
    use anchor_lang::prelude::*;

    declare_id!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

    /// Marker type for `Program<'info, WhirlpoolProgram>`
    #[derive(Clone)]
    pub struct WhirlpoolProgram;

    impl anchor_lang::Id for WhirlpoolProgram {
        fn id() -> Pubkey {
            ID
        }
    }
}

pub use program::WhirlpoolProgram;

/// Whirlpool program id
pub const WHIRLPOOL_PROGRAM_ID: Pubkey = program::ID;
