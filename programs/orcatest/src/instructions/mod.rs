/// Instruction handlers. Each one validates its accounts against the
/// Whirlpool state it touches and forwards to the Whirlpool program.

// Position lifecycle
pub mod close_position;
pub mod open_position;

// Liquidity
pub mod initialize_tick_array;
pub mod modify_liquidity;

// Fees and rewards
pub mod collect_fees;
pub mod collect_reward;
pub mod update_fees_and_rewards;

pub use close_position::*;
pub use collect_fees::*;
pub use collect_reward::*;
pub use initialize_tick_array::*;
pub use modify_liquidity::*;
pub use open_position::*;
pub use update_fees_and_rewards::*;
