//! Q64.96 sqrt price encoding of human prices.
//!
//! Human prices are "units of token B per unit of token A" for the
//! canonical pair. Decimal adjustment happens only here, at the boundary;
//! the encoded value is always in raw integer-unit terms.

use crate::error::{Error, InputError};
use crate::math::math_helpers::{f64_to_u256, pow10, u256_to_f64};
use crate::math::tick_math::{
    MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
};
use alloy_primitives::U256;

/// 2^96 as a float.
pub const Q96_F64: f64 = 79228162514264337593543950336.0;

#[inline]
fn validate_price(price: f64) -> Result<(), InputError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidPrice)
    }
}

/// Converts a human price into the raw tick-domain price:
/// `price * 10^(decimals_b - decimals_a)`.
#[inline]
pub fn adjust_for_decimals(price: f64, decimals_a: u8, decimals_b: u8) -> f64 {
    price * pow10(decimals_b as i32 - decimals_a as i32)
}

/// Inverse of [`adjust_for_decimals`].
#[inline]
pub fn unadjust_for_decimals(raw_price: f64, decimals_a: u8, decimals_b: u8) -> f64 {
    raw_price * pow10(decimals_a as i32 - decimals_b as i32)
}

/// Encodes a human price (B per A) as a Q64.96 sqrt price.
///
/// Fails with `InvalidPrice` for non-positive or non-finite input and with
/// `PriceOutOfRange` when the result would fall outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn encode(price: f64, decimals_a: u8, decimals_b: u8) -> Result<U256, Error> {
    validate_price(price)?;

    let raw_price = adjust_for_decimals(price, decimals_a, decimals_b);
    if !raw_price.is_finite() || raw_price == 0.0 {
        return Err(InputError::PriceOutOfRange.into());
    }

    let sqrt_price_x96 =
        f64_to_u256(raw_price.sqrt() * Q96_F64).ok_or(InputError::PriceOutOfRange)?;

    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(InputError::PriceOutOfRange.into());
    }
    Ok(sqrt_price_x96)
}

/// Decodes a Q64.96 sqrt price back into a human price (B per A).
///
/// Accepts the same `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)` window that
/// [`encode`] produces.
pub fn decode(sqrt_price_x96: U256, decimals_a: u8, decimals_b: u8) -> Result<f64, Error> {
    if sqrt_price_x96.is_zero() {
        return Err(InputError::InvalidPrice.into());
    }
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(InputError::PriceOutOfRange.into());
    }

    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96_F64;
    Ok(unadjust_for_decimals(
        sqrt_price * sqrt_price,
        decimals_a,
        decimals_b,
    ))
}

/// Exact sqrt price of a tick.
pub fn tick_to_sqrt_price_x96(tick: i32) -> Result<U256, Error> {
    Ok(get_sqrt_ratio_at_tick(tick)?)
}

/// Greatest tick whose sqrt price does not exceed `sqrt_price_x96`.
pub fn sqrt_price_x96_to_tick(sqrt_price_x96: U256) -> Result<i32, Error> {
    Ok(get_tick_at_sqrt_ratio(sqrt_price_x96)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;
    use crate::math::tick_math::{price_to_tick, tick_to_price};
    use proptest::prelude::*;

    fn relative_error(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn encode_unit_price_with_equal_decimals_is_q96() {
        assert_eq!(encode(1.0, 18, 18).unwrap(), Q96);
        assert_eq!(decode(Q96, 18, 18).unwrap(), 1.0);
    }

    #[test]
    fn eth_usdc_round_trip() {
        // token A = 18 decimals, token B = 6 decimals, 3000 B per A
        let encoded = encode(3000.0, 18, 6).unwrap();
        let decoded = decode(encoded, 18, 6).unwrap();
        assert!((decoded - 3000.0).abs() < 1e-6, "decoded {decoded}");

        // raw price 3e-9 lives around tick -196257
        assert_eq!(sqrt_price_x96_to_tick(encoded).unwrap(), -196257);
    }

    #[test]
    fn inverted_eth_usdc_lands_on_mirrored_tick() {
        // token A = 6 decimals, token B = 18 decimals, 1/3000 B per A
        let encoded = encode(1.0 / 3000.0, 6, 18).unwrap();
        assert_eq!(sqrt_price_x96_to_tick(encoded).unwrap(), 196256);
    }

    #[test]
    fn encode_rejects_invalid_prices() {
        for price in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                encode(price, 18, 6),
                Err(Error::InputError(InputError::InvalidPrice))
            ));
        }
    }

    #[test]
    fn encode_rejects_unrepresentable_prices() {
        assert!(matches!(
            encode(1e40, 0, 0),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
        assert!(matches!(
            encode(1e-40, 0, 0),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
        // finite price whose decimal adjustment overflows f64
        assert!(matches!(
            encode(1e300, 0, 255),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
    }

    #[test]
    fn decode_rejects_zero_and_out_of_range() {
        assert!(matches!(
            decode(U256::ZERO, 18, 6),
            Err(Error::InputError(InputError::InvalidPrice))
        ));
        assert!(matches!(
            decode(MAX_SQRT_RATIO + U256::ONE, 18, 6),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
        assert!(matches!(
            decode(MIN_SQRT_RATIO - U256::ONE, 18, 6),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
    }

    #[test]
    fn decode_window_matches_encode_window() {
        // the exclusive upper bound is rejected by encode and by the tick lookup
        assert!(matches!(
            decode(MAX_SQRT_RATIO, 0, 0),
            Err(Error::InputError(InputError::PriceOutOfRange))
        ));
        assert!(sqrt_price_x96_to_tick(MAX_SQRT_RATIO).is_err());

        assert!(decode(MAX_SQRT_RATIO - U256::ONE, 0, 0).is_ok());
        assert!(decode(MIN_SQRT_RATIO, 0, 0).is_ok());
    }

    #[test]
    fn tick_sqrt_price_helpers_agree() {
        let sqrt_price = tick_to_sqrt_price_x96(80040).unwrap();
        assert_eq!(sqrt_price_x96_to_tick(sqrt_price).unwrap(), 80040);

        let decoded = decode(sqrt_price, 0, 0).unwrap();
        let tick_price = tick_to_price(80040).unwrap();
        assert!(relative_error(decoded, tick_price) < 1e-12);
        assert_eq!(price_to_tick(decoded).unwrap(), 80040);
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            exponent in -9.0f64..9.0,
            decimals_a in prop::sample::select(vec![6u8, 8, 18]),
            decimals_b in prop::sample::select(vec![6u8, 8, 18]),
        ) {
            let price = 10f64.powf(exponent);
            let encoded = encode(price, decimals_a, decimals_b).unwrap();
            let decoded = decode(encoded, decimals_a, decimals_b).unwrap();
            prop_assert!(relative_error(decoded, price) < 1e-9);
        }
    }
}
