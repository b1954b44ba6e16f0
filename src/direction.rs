//! Conversion between the canonical "B per A" price convention and the
//! direction a user reads prices in.
//!
//! Every inversion of a price or a price range goes through this module.
//! Inverting a range swaps its bounds (`min' = 1/max`, `max' = 1/min`), and
//! the open ends of a full-range position are carried as explicit
//! [`PriceBound::Zero`] / [`PriceBound::Infinity`] sentinels, never NaN.

use crate::codec::unadjust_for_decimals;
use crate::error::{Error, InputError};
use crate::fee_tier::FeeTier;
use crate::math::tick_math::tick_to_price;
use crate::range::TickRange;

/// Which token of a canonical pair is presented as the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Token A is the base: prices read as "B per A".
    #[default]
    Canonical,
    /// Token B is the base: prices read as "A per B".
    Inverted,
}

impl Direction {
    #[inline]
    pub fn from_base_is_token_a(base_is_token_a: bool) -> Self {
        if base_is_token_a {
            Direction::Canonical
        } else {
            Direction::Inverted
        }
    }

    #[inline]
    pub fn base_is_token_a(self) -> bool {
        matches!(self, Direction::Canonical)
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Direction::Canonical => Direction::Inverted,
            Direction::Inverted => Direction::Canonical,
        }
    }
}

/// One end of a price range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceBound {
    /// No lower bound.
    Zero,
    Finite(f64),
    /// No upper bound.
    Infinity,
}

impl PriceBound {
    /// Classifies a float as a bound. Zero and positive infinity become the
    /// matching sentinels; negative or NaN input is rejected.
    pub fn from_f64(value: f64) -> Result<Self, InputError> {
        if value.is_nan() || value < 0.0 {
            Err(InputError::InvalidPrice)
        } else if value == 0.0 {
            Ok(PriceBound::Zero)
        } else if value.is_infinite() {
            Ok(PriceBound::Infinity)
        } else {
            Ok(PriceBound::Finite(value))
        }
    }

    pub fn invert(self) -> Self {
        match self {
            PriceBound::Zero => PriceBound::Infinity,
            PriceBound::Infinity => PriceBound::Zero,
            PriceBound::Finite(price) => {
                let inverted = 1.0 / price;
                if inverted.is_infinite() {
                    PriceBound::Infinity
                } else if inverted == 0.0 {
                    PriceBound::Zero
                } else {
                    PriceBound::Finite(inverted)
                }
            }
        }
    }

    /// The bound as a float, with `0.0` and `f64::INFINITY` for the
    /// sentinels.
    pub fn value(self) -> f64 {
        match self {
            PriceBound::Zero => 0.0,
            PriceBound::Finite(price) => price,
            PriceBound::Infinity => f64::INFINITY,
        }
    }
}

/// A `[min, max]` price interval with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    pub min: PriceBound,
    pub max: PriceBound,
}

impl PriceRange {
    pub fn new(min: PriceBound, max: PriceBound) -> Result<Self, InputError> {
        if min.value() < max.value() {
            Ok(Self { min, max })
        } else {
            Err(InputError::InvalidRange)
        }
    }

    /// The same interval seen from the other token.
    pub fn invert(self) -> Self {
        Self {
            min: self.max.invert(),
            max: self.min.invert(),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.value() <= price && price <= self.max.value()
    }

    pub fn is_full_range(&self) -> bool {
        matches!(
            (self.min, self.max),
            (PriceBound::Zero, PriceBound::Infinity)
        )
    }
}

#[inline]
fn validate_price(price: f64) -> Result<(), InputError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidPrice)
    }
}

/// Converts a price typed by the user into the canonical "B per A" price.
///
/// When the user's base token is canonical B the price is inverted.
pub fn to_canonical(user_price: f64, user_base_is_token_a: bool) -> Result<f64, InputError> {
    validate_price(user_price)?;
    Ok(if user_base_is_token_a {
        user_price
    } else {
        1.0 / user_price
    })
}

/// Converts a canonical price into the direction the caller wants shown.
pub fn to_display(canonical_price: f64, want_base_is_token_a: bool) -> Result<f64, InputError> {
    // inversion is its own inverse
    to_canonical(canonical_price, want_base_is_token_a)
}

/// Range counterpart of [`to_canonical`]: inverts and swaps the bounds when
/// the user's base token is canonical B.
pub fn range_to_canonical(range: PriceRange, user_base_is_token_a: bool) -> PriceRange {
    if user_base_is_token_a {
        range
    } else {
        range.invert()
    }
}

/// Range counterpart of [`to_display`].
pub fn range_to_display(range: PriceRange, want_base_is_token_a: bool) -> PriceRange {
    range_to_canonical(range, want_base_is_token_a)
}

/// Human price of a tick in the requested direction.
pub fn tick_to_display_price(
    tick: i32,
    decimals_a: u8,
    decimals_b: u8,
    direction: Direction,
) -> Result<f64, Error> {
    let canonical = unadjust_for_decimals(tick_to_price(tick)?, decimals_a, decimals_b);
    Ok(to_display(canonical, direction.base_is_token_a())?)
}

/// Human price range of a tick range in the requested direction.
///
/// Ticks sitting on the fee tier's usable extremes are reported as the
/// open-ended sentinels, so a full-range position shows as `0 … ∞` in
/// either direction.
pub fn display_range(
    range: TickRange,
    fee_tier: FeeTier,
    decimals_a: u8,
    decimals_b: u8,
    direction: Direction,
) -> Result<PriceRange, Error> {
    let bound = |tick: i32, extreme: i32, sentinel: PriceBound| -> Result<PriceBound, Error> {
        if tick == extreme {
            return Ok(sentinel);
        }
        let price = unadjust_for_decimals(tick_to_price(tick)?, decimals_a, decimals_b);
        Ok(PriceBound::from_f64(price)?)
    };

    let canonical = PriceRange::new(
        bound(range.lower, fee_tier.min_usable_tick(), PriceBound::Zero)?,
        bound(range.upper, fee_tier.max_usable_tick(), PriceBound::Infinity)?,
    )?;

    Ok(range_to_display(canonical, direction.base_is_token_a()))
}
