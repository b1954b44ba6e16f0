//! Token amounts held by a concentrated-liquidity position.
//!
//! Amounts are computed in raw integers first (bit-exact with the pool
//! contracts) and only then scaled by `10^decimals` for display.

use crate::error::{Error, InputError};
use crate::fee_tier::FeeTier;
use crate::math::liquidity_amounts::{get_amounts_for_liquidity, get_liquidity_for_amounts};
use crate::math::liquidity_math::add_delta;
use crate::math::math_helpers::{mul_div, pow10, u256_to_f64};
use crate::math::tick_math::get_sqrt_ratio_at_tick;
use crate::pair::CanonicalPair;
use crate::range::TickRange;
use alloy_primitives::U256;
use std::collections::HashMap;
use std::hash::BuildHasher;
use tracing::trace;

const BPS_DENOMINATOR: u32 = 10_000;

/// Snapshot of the pool price, either as its current tick or as the exact
/// sqrt price read from `slot0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentPrice {
    Tick(i32),
    SqrtPriceX96(U256),
}

impl CurrentPrice {
    pub fn sqrt_price_x96(self) -> Result<U256, Error> {
        match self {
            CurrentPrice::Tick(tick) => Ok(get_sqrt_ratio_at_tick(tick)?),
            CurrentPrice::SqrtPriceX96(sqrt_price_x96) if sqrt_price_x96.is_zero() => {
                Err(InputError::InvalidPrice.into())
            }
            CurrentPrice::SqrtPriceX96(sqrt_price_x96) => Ok(sqrt_price_x96),
        }
    }
}

/// Source of USD prices keyed by token symbol.
///
/// Price tables are presentation data owned by the caller; the engine only
/// reads them through this trait.
pub trait PriceLookup {
    fn price_of(&self, symbol: &str) -> Option<f64>;
}

impl<S: BuildHasher> PriceLookup for HashMap<String, f64, S> {
    fn price_of(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).copied()
    }
}

/// Amounts of the canonical tokens, raw and in human units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionAmounts {
    pub raw_a: U256,
    pub raw_b: U256,
    pub amount_a: f64,
    pub amount_b: f64,
}

impl PositionAmounts {
    pub fn from_raw(raw_a: U256, raw_b: U256, decimals_a: u8, decimals_b: u8) -> Self {
        Self {
            raw_a,
            raw_b,
            amount_a: to_human(raw_a, decimals_a),
            amount_b: to_human(raw_b, decimals_b),
        }
    }

    pub fn zero() -> Self {
        Self::from_raw(U256::ZERO, U256::ZERO, 0, 0)
    }

    /// USD value of both sides, or `None` if either token has no price.
    pub fn usd_value(&self, pair: &CanonicalPair, lookup: &impl PriceLookup) -> Option<f64> {
        let price_a = lookup.price_of(&pair.token_a.symbol)?;
        let price_b = lookup.price_of(&pair.token_b.symbol)?;
        Some(self.amount_a * price_a + self.amount_b * price_b)
    }
}

/// Raw integer amount in human units.
#[inline]
pub fn to_human(raw: U256, decimals: u8) -> f64 {
    u256_to_f64(raw) / pow10(decimals as i32)
}

fn sqrt_bounds(range: TickRange) -> Result<(U256, U256), Error> {
    Ok((
        get_sqrt_ratio_at_tick(range.lower)?,
        get_sqrt_ratio_at_tick(range.upper)?,
    ))
}

/// Token amounts held by `liquidity` over `[tick_lower, tick_upper]` at the
/// current price, rounded down.
///
/// Below the range everything is token A, above it everything is token B.
/// Zero liquidity yields zero amounts; an empty or out-of-bounds range is
/// an `InvalidRange` error.
pub fn amounts_for_position(
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
    current: CurrentPrice,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<PositionAmounts, Error> {
    let range = TickRange::new(tick_lower, tick_upper)?;
    let sqrt_price_x96 = current.sqrt_price_x96()?;

    if liquidity == 0 {
        return Ok(PositionAmounts::from_raw(
            U256::ZERO,
            U256::ZERO,
            decimals_a,
            decimals_b,
        ));
    }

    let (sqrt_lower, sqrt_upper) = sqrt_bounds(range)?;
    trace!(
        liquidity,
        below = sqrt_price_x96 <= sqrt_lower,
        above = sqrt_price_x96 >= sqrt_upper,
        "valuing position"
    );

    let (raw_a, raw_b) =
        get_amounts_for_liquidity(sqrt_price_x96, sqrt_lower, sqrt_upper, liquidity, false)?;
    Ok(PositionAmounts::from_raw(raw_a, raw_b, decimals_a, decimals_b))
}

/// Raw amounts a deposit of `liquidity` must pay, rounded up: the
/// amount-desired values for an add-liquidity call.
pub fn deposit_amounts(
    liquidity: u128,
    range: TickRange,
    current: CurrentPrice,
) -> Result<(U256, U256), Error> {
    let (sqrt_lower, sqrt_upper) = sqrt_bounds(range)?;
    get_amounts_for_liquidity(
        current.sqrt_price_x96()?,
        sqrt_lower,
        sqrt_upper,
        liquidity,
        true,
    )
}

/// Largest liquidity that raw amounts `raw_a` and `raw_b` can back over
/// `range` at the current price.
pub fn liquidity_for_amounts(
    range: TickRange,
    current: CurrentPrice,
    raw_a: U256,
    raw_b: U256,
) -> Result<u128, Error> {
    let (sqrt_lower, sqrt_upper) = sqrt_bounds(range)?;
    get_liquidity_for_amounts(current.sqrt_price_x96()?, sqrt_lower, sqrt_upper, raw_a, raw_b)
}

/// Applies a slippage tolerance to desired amounts, producing the
/// amount-min values for the transaction.
pub fn min_amounts(raw_a: U256, raw_b: U256, slippage_bps: u32) -> Result<(U256, U256), Error> {
    if slippage_bps > BPS_DENOMINATOR {
        return Err(InputError::InvalidSlippage(slippage_bps).into());
    }
    let keep = U256::from(BPS_DENOMINATOR - slippage_bps);
    let denominator = U256::from(BPS_DENOMINATOR);
    Ok((
        mul_div(raw_a, keep, denominator)?,
        mul_div(raw_b, keep, denominator)?,
    ))
}

/// Snapshot of a liquidity position.
///
/// The ledger that owns positions lives elsewhere; this type only carries
/// the values needed to compute from a snapshot and to simulate
/// add/remove/collect before submitting them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub pair: CanonicalPair,
    pub fee_tier: FeeTier,
    pub range: TickRange,
    pub liquidity: u128,
    pub tokens_owed_a: u128,
    pub tokens_owed_b: u128,
}

impl Position {
    /// Builds a position, strictly requiring usable ticks for `fee_tier`.
    pub fn new(
        pair: CanonicalPair,
        fee_tier: FeeTier,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<Self, Error> {
        let range = TickRange::new_usable(tick_lower, tick_upper, fee_tier)?;
        Ok(Self {
            pair,
            fee_tier,
            range,
            liquidity,
            tokens_owed_a: 0,
            tokens_owed_b: 0,
        })
    }

    pub fn with_tokens_owed(mut self, tokens_owed_a: u128, tokens_owed_b: u128) -> Self {
        self.tokens_owed_a = tokens_owed_a;
        self.tokens_owed_b = tokens_owed_b;
        self
    }

    /// Whether the position earns fees at `current_tick`.
    #[inline]
    pub fn is_in_range(&self, current_tick: i32) -> bool {
        self.range.contains_tick(current_tick)
    }

    pub fn amounts(&self, current: CurrentPrice) -> Result<PositionAmounts, Error> {
        let (decimals_a, decimals_b) = self.pair.decimals();
        amounts_for_position(
            self.liquidity,
            self.range.lower,
            self.range.upper,
            current,
            decimals_a,
            decimals_b,
        )
    }

    /// Uncollected fees in human units.
    pub fn owed_amounts(&self) -> PositionAmounts {
        let (decimals_a, decimals_b) = self.pair.decimals();
        PositionAmounts::from_raw(
            U256::from(self.tokens_owed_a),
            U256::from(self.tokens_owed_b),
            decimals_a,
            decimals_b,
        )
    }

    /// Adds (positive) or removes (negative) liquidity, returning the new
    /// total. Removing more than the position holds is an error.
    pub fn apply_liquidity_delta(&mut self, delta: i128) -> Result<u128, Error> {
        self.liquidity = add_delta(self.liquidity, delta)?;
        Ok(self.liquidity)
    }

    /// Collects up to `max_a`/`max_b` of the owed amounts, returning what
    /// was actually collected.
    pub fn collect(&mut self, max_a: u128, max_b: u128) -> (u128, u128) {
        let collected_a = self.tokens_owed_a.min(max_a);
        let collected_b = self.tokens_owed_b.min(max_b);
        self.tokens_owed_a -= collected_a;
        self.tokens_owed_b -= collected_b;
        (collected_a, collected_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::math::tick_math::{MAX_TICK, MIN_TICK};
    use crate::pair::{Token, order};
    use alloy_primitives::address;
    use proptest::prelude::*;

    const LIQUIDITY: u128 = 1_000_000_000_000_000_000;

    fn usdc_weth() -> CanonicalPair {
        order(
            Token::new(address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), 18, "WETH"),
            Token::new(address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), 6, "USDC"),
        )
        .unwrap()
    }

    #[test]
    fn in_range_position_holds_both_tokens() {
        let amounts =
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::Tick(0), 18, 18).unwrap();
        assert_eq!(amounts.raw_a, U256::from(2995354955910780u64));
        assert_eq!(amounts.raw_b, U256::from(2995354955910780u64));
        assert!((amounts.amount_a - 0.00299535495591078).abs() < 1e-15);
    }

    #[test]
    fn position_above_current_price_is_all_token_a() {
        let amounts =
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::Tick(-100), 18, 18).unwrap();
        assert_eq!(amounts.raw_a, U256::from(5999709018652706u64));
        assert_eq!(amounts.raw_b, U256::ZERO);

        // sitting exactly on the lower tick still counts as below the range
        let amounts =
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::Tick(-60), 18, 18).unwrap();
        assert_eq!(amounts.raw_b, U256::ZERO);
    }

    #[test]
    fn position_below_current_price_is_all_token_b() {
        let amounts =
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::Tick(100), 18, 18).unwrap();
        assert_eq!(amounts.raw_a, U256::ZERO);
        assert_eq!(amounts.raw_b, U256::from(5999709018652706u64));

        let amounts =
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::Tick(60), 18, 18).unwrap();
        assert_eq!(amounts.raw_a, U256::ZERO);
    }

    #[test]
    fn sqrt_price_snapshot_matches_tick_snapshot() {
        let sqrt_price = get_sqrt_ratio_at_tick(80067).unwrap();
        let from_tick =
            amounts_for_position(
                1_000_000_000_000_000,
                78240,
                81900,
                CurrentPrice::Tick(80067),
                18,
                6,
            )
                .unwrap();
        let from_sqrt = amounts_for_position(
            1_000_000_000_000_000,
            78240,
            81900,
            CurrentPrice::SqrtPriceX96(sqrt_price),
            18,
            6,
        )
        .unwrap();

        assert_eq!(from_tick, from_sqrt);
        assert_eq!(from_tick.raw_a, U256::from(1598881545227u64));
        assert_eq!(from_tick.raw_b, U256::from(4781325347227477u64));
        assert!((from_tick.amount_b - 4781325347.227477).abs() < 1e-3);
    }

    #[test]
    fn empty_range_is_rejected() {
        for (lower, upper) in [(60, 60), (60, -60), (MIN_TICK - 1, 0), (0, MAX_TICK + 1)] {
            assert!(matches!(
                amounts_for_position(LIQUIDITY, lower, upper, CurrentPrice::Tick(0), 18, 6),
                Err(Error::InputError(InputError::InvalidRange))
            ));
        }
    }

    #[test]
    fn zero_sqrt_price_snapshot_is_rejected() {
        assert!(matches!(
            amounts_for_position(LIQUIDITY, -60, 60, CurrentPrice::SqrtPriceX96(U256::ZERO), 18, 6),
            Err(Error::InputError(InputError::InvalidPrice))
        ));
    }

    #[test]
    fn deposit_rounds_up_and_backs_requested_liquidity() {
        let range = TickRange::new(-60, 60).unwrap();
        let (raw_a, raw_b) = deposit_amounts(LIQUIDITY, range, CurrentPrice::Tick(0)).unwrap();
        assert_eq!(raw_a, U256::from(2995354955910781u64));
        assert_eq!(raw_b, U256::from(2995354955910781u64));

        let liquidity = liquidity_for_amounts(range, CurrentPrice::Tick(0), raw_a, raw_b).unwrap();
        assert!(liquidity >= LIQUIDITY);
    }

    #[test]
    fn min_amounts_apply_slippage() {
        let (min_a, min_b) = min_amounts(U256::from(10_000u32), U256::from(333u32), 50).unwrap();
        assert_eq!(min_a, U256::from(9_950u32));
        assert_eq!(min_b, U256::from(331u32));

        assert_eq!(
            min_amounts(U256::from(1u8), U256::from(1u8), 10_000).unwrap(),
            (U256::ZERO, U256::ZERO)
        );
        assert!(matches!(
            min_amounts(U256::from(1u8), U256::from(1u8), 10_001),
            Err(Error::InputError(InputError::InvalidSlippage(10_001)))
        ));
    }

    #[test]
    fn position_lifecycle_on_snapshot() {
        let mut position = Position::new(usdc_weth(), FeeTier::Medium, -60, 60, LIQUIDITY)
            .unwrap()
            .with_tokens_owed(1_500, 20);

        assert!(position.is_in_range(0));
        assert!(!position.is_in_range(60));

        assert_eq!(position.apply_liquidity_delta(-(LIQUIDITY as i128)).unwrap(), 0);
        let amounts = position.amounts(CurrentPrice::Tick(0)).unwrap();
        assert_eq!((amounts.raw_a, amounts.raw_b), (U256::ZERO, U256::ZERO));

        assert!(matches!(
            position.apply_liquidity_delta(-1),
            Err(Error::MathError(MathError::Underflow))
        ));

        // zero liquidity positions can still hold fees
        assert_eq!(position.collect(1_000, u128::MAX), (1_000, 20));
        assert_eq!(position.collect(u128::MAX, u128::MAX), (500, 0));
        assert_eq!(position.owed_amounts(), PositionAmounts::zero());
    }

    #[test]
    fn position_requires_usable_ticks() {
        assert!(matches!(
            Position::new(usdc_weth(), FeeTier::Medium, -60, 61, LIQUIDITY),
            Err(Error::InputError(InputError::NotUsableTick {
                tick: 61,
                spacing: 60
            }))
        ));
    }

    #[test]
    fn usd_value_uses_lookup_and_canonical_symbols() {
        let pair = usdc_weth();
        // canonical A = USDC (6), B = WETH (18)
        let amounts = PositionAmounts::from_raw(
            U256::from(1_500_000_000u64),
            U256::from(500_000_000_000_000_000u64),
            6,
            18,
        );

        let mut prices = HashMap::new();
        prices.insert("USDC".to_string(), 1.0);
        prices.insert("WETH".to_string(), 3000.0);
        assert_eq!(amounts.usd_value(&pair, &prices), Some(3000.0));

        prices.remove("WETH");
        assert_eq!(amounts.usd_value(&pair, &prices), None);
    }

    proptest! {
        #[test]
        fn zero_liquidity_is_worth_nothing(
            lower in -887272i32..0,
            upper in 1i32..887272,
            current in -887272i32..887272,
        ) {
            let amounts =
                amounts_for_position(0, lower, upper, CurrentPrice::Tick(current), 18, 6).unwrap();
            prop_assert_eq!(amounts.raw_a, U256::ZERO);
            prop_assert_eq!(amounts.raw_b, U256::ZERO);
        }

        #[test]
        fn regions_hold_single_token_outside_range(
            lower in -100_000i32..0,
            width in 1i32..50_000,
            liquidity in 1u128..u64::MAX as u128,
        ) {
            let upper = lower + width;
            let below_price = CurrentPrice::Tick(lower - 1);
            let below = amounts_for_position(liquidity, lower, upper, below_price, 18, 6).unwrap();
            prop_assert_eq!(below.raw_b, U256::ZERO);

            let above_price = CurrentPrice::Tick(upper + 1);
            let above = amounts_for_position(liquidity, lower, upper, above_price, 18, 6).unwrap();
            prop_assert_eq!(above.raw_a, U256::ZERO);
        }
    }
}
