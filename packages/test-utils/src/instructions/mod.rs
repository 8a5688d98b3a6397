//! Typed instruction requests
//!
//! One struct per instruction the harness sends. Each names every account it
//! touches and produces a ready-to-sign `Instruction`.

pub mod orcatest;
pub mod whirlpool;

pub use self::orcatest::{
    ClosePosition, CollectFees, CollectReward, InitializeTickArray, ModifyLiquidity,
    OpenPosition, PositionKeys, UpdateFeesAndRewards,
};
pub use self::whirlpool::{
    emissions_per_second_x64, InitializeConfig, InitializeFeeTier, InitializePool,
    InitializeReward, SetRewardEmissions, Swap,
};
