//! Tick alignment and liquidity quotes
//!
//! Thin wrappers over `orca_whirlpools_core`; none of the math lives here.

use orca_whirlpools_core::{
    get_initializable_tick_index, get_tick_array_start_tick_index, increase_liquidity_quote_a,
    price_to_tick_index, IncreaseLiquidityQuote,
};
use solana_sdk::pubkey::Pubkey;

use crate::error::{HarnessError, HarnessResult};
use crate::pda::derive_tick_array;

/// Initializable tick for `price`; `round_up: None` picks the nearest one
pub fn initializable_tick_for_price(
    price: f64,
    decimals_a: u8,
    decimals_b: u8,
    tick_spacing: u16,
    round_up: Option<bool>,
) -> i32 {
    let tick = price_to_tick_index(price, decimals_a, decimals_b);
    get_initializable_tick_index(tick, tick_spacing, round_up)
}

pub fn tick_array_start_index(tick_index: i32, tick_spacing: u16) -> i32 {
    get_tick_array_start_tick_index(tick_index, tick_spacing)
}

/// Tick bounds of a position and the tick arrays that hold them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRange {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    pub lower_start_index: i32,
    pub upper_start_index: i32,
}

impl TickRange {
    pub fn new(tick_lower_index: i32, tick_upper_index: i32, tick_spacing: u16) -> HarnessResult<Self> {
        if tick_spacing == 0 {
            return Err(HarnessError::invalid_argument("tick spacing must be positive"));
        }
        if tick_lower_index >= tick_upper_index {
            return Err(HarnessError::invalid_argument(format!(
                "tick range [{tick_lower_index}, {tick_upper_index}] is empty"
            )));
        }

        Ok(Self {
            tick_lower_index,
            tick_upper_index,
            lower_start_index: tick_array_start_index(tick_lower_index, tick_spacing),
            upper_start_index: tick_array_start_index(tick_upper_index, tick_spacing),
        })
    }

    /// Range between two prices, each bound aligned to the spacing
    pub fn from_prices(
        lower_price: f64,
        upper_price: f64,
        decimals_a: u8,
        decimals_b: u8,
        tick_spacing: u16,
    ) -> HarnessResult<Self> {
        if !(lower_price > 0.0 && lower_price < upper_price) {
            return Err(HarnessError::invalid_argument(format!(
                "invalid price range [{lower_price}, {upper_price}]"
            )));
        }
        let lower = initializable_tick_for_price(lower_price, decimals_a, decimals_b, tick_spacing, None);
        let upper = initializable_tick_for_price(upper_price, decimals_a, decimals_b, tick_spacing, None);
        Self::new(lower, upper, tick_spacing)
    }

    /// Start indexes of the arrays to initialize, without duplicates
    pub fn distinct_start_indexes(&self) -> Vec<i32> {
        if self.lower_start_index == self.upper_start_index {
            vec![self.lower_start_index]
        } else {
            vec![self.lower_start_index, self.upper_start_index]
        }
    }

    pub fn tick_array_lower(&self, whirlpool: &Pubkey, program_id: &Pubkey) -> Pubkey {
        derive_tick_array(whirlpool, self.lower_start_index, program_id).address
    }

    pub fn tick_array_upper(&self, whirlpool: &Pubkey, program_id: &Pubkey) -> Pubkey {
        derive_tick_array(whirlpool, self.upper_start_index, program_id).address
    }
}

/// Quote for depositing exactly `token_amount_a` of token A into `range`
pub fn quote_increase_by_token_a(
    token_amount_a: u64,
    slippage_tolerance_bps: u16,
    current_sqrt_price: u128,
    range: &TickRange,
) -> HarnessResult<IncreaseLiquidityQuote> {
    increase_liquidity_quote_a(
        token_amount_a,
        slippage_tolerance_bps,
        current_sqrt_price,
        range.tick_lower_index,
        range.tick_upper_index,
        None,
        None,
    )
    .map_err(|err| HarnessError::invalid_argument(format!("liquidity quote failed: {err}")))
}
