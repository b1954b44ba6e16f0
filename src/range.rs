use crate::codec::adjust_for_decimals;
use crate::error::{Error, InputError};
use crate::fee_tier::FeeTier;
use crate::math::tick_math::{MAX_TICK, MIN_TICK, nearest_usable_tick, price_to_tick};
use tracing::{debug, warn};

/// A concrete `[lower, upper)` tick interval with `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    /// Validates ordering and tick bounds.
    pub fn new(lower: i32, upper: i32) -> Result<Self, InputError> {
        if lower >= upper || lower < MIN_TICK || upper > MAX_TICK {
            return Err(InputError::InvalidRange);
        }
        Ok(Self { lower, upper })
    }

    /// Like [`TickRange::new`], additionally requiring both ticks to be
    /// usable for `fee_tier`.
    pub fn new_usable(lower: i32, upper: i32, fee_tier: FeeTier) -> Result<Self, InputError> {
        let range = Self::new(lower, upper)?;
        fee_tier.check_usable(lower)?;
        fee_tier.check_usable(upper)?;
        Ok(range)
    }

    /// Full usable range of a fee tier.
    pub fn full(fee_tier: FeeTier) -> Self {
        Self {
            lower: fee_tier.min_usable_tick(),
            upper: fee_tier.max_usable_tick(),
        }
    }

    /// Whether liquidity in this range is active at `tick`.
    #[inline]
    pub fn contains_tick(&self, tick: i32) -> bool {
        self.lower <= tick && tick < self.upper
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.upper.abs_diff(self.lower)
    }
}

/// Named strategy for deriving a range from a reference price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeSpec {
    /// Every usable tick of the fee tier.
    Full,
    /// `reference * (1 - p) ..= reference * (1 + p)` with `0 < p < 1`.
    Percent(f64),
}

impl RangeSpec {
    /// ±50%
    pub const WIDE: RangeSpec = RangeSpec::Percent(0.5);
    /// ±10%
    pub const NARROW: RangeSpec = RangeSpec::Percent(0.1);
}

/// Resolves `spec` against a raw (tick-domain) reference price.
///
/// The reference price must be positive and finite for every spec, even
/// though `Full` does not use it. `Percent` bounds are each rounded to
/// the nearest usable tick; if rounding collapses them onto the same tick
/// the request fails with `InvalidRange` instead of widening silently.
pub fn resolve(
    spec: RangeSpec,
    reference_price: f64,
    fee_tier: FeeTier,
) -> Result<TickRange, Error> {
    if !reference_price.is_finite() || reference_price <= 0.0 {
        return Err(InputError::InvalidPrice.into());
    }
    let spacing = fee_tier.tick_spacing();

    let range = match spec {
        RangeSpec::Full => TickRange::full(fee_tier),
        RangeSpec::Percent(percent) => {
            if !(percent > 0.0 && percent < 1.0) {
                return Err(InputError::InvalidRangePercent.into());
            }

            let lower_tick = price_to_tick(reference_price * (1.0 - percent))?;
            let upper_tick = price_to_tick(reference_price * (1.0 + percent))?;
            let lower = nearest_usable_tick(lower_tick, spacing);
            let upper = nearest_usable_tick(upper_tick, spacing);

            if lower >= upper {
                warn!(
                    lower,
                    upper,
                    percent,
                    spacing,
                    "range collapsed after rounding to usable ticks"
                );
                return Err(InputError::InvalidRange.into());
            }
            TickRange { lower, upper }
        }
    };

    debug!(?spec, reference_price, lower = range.lower, upper = range.upper, "resolved range");
    Ok(range)
}

/// Resolves `spec` against a human price ("B per A"), applying the pair's
/// decimal adjustment first.
pub fn resolve_human(
    spec: RangeSpec,
    reference_price: f64,
    decimals_a: u8,
    decimals_b: u8,
    fee_tier: FeeTier,
) -> Result<TickRange, Error> {
    if !reference_price.is_finite() || reference_price <= 0.0 {
        return Err(InputError::InvalidPrice.into());
    }
    resolve(
        spec,
        adjust_for_decimals(reference_price, decimals_a, decimals_b),
        fee_tier,
    )
}
