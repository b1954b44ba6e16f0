//! Conversions between liquidity and token amounts over a sqrt price range.
//!
//! All inputs are Q64.96 sqrt prices and raw (decimal-unadjusted) integer
//! amounts. Bounds may be passed in either order.

use crate::Q96;
use crate::RESOLUTION;
use crate::error::{Error, MathError};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up};
use alloy_primitives::U256;

#[inline]
fn sorted(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Amount of token0 held by `liquidity` between two sqrt prices:
/// `L * (sqrtB - sqrtA) / (sqrtA * sqrtB)`.
///
/// Round down when valuing a position, round up when computing what a
/// deposit must pay.
pub fn get_amount_0_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_a_x96.is_zero() {
        return Err(MathError::DivisionByZero.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_b_x96)?,
            sqrt_ratio_a_x96,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_b_x96)? / sqrt_ratio_a_x96)
    }
}

/// Amount of token1 held by `liquidity` between two sqrt prices:
/// `L * (sqrtB - sqrtA)`.
pub fn get_amount_1_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);

    let amount = if round_up {
        mul_div_rounding_up(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)?
    } else {
        mul_div(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)?
    };
    Ok(amount)
}

/// Splits `liquidity` into `(amount0, amount1)` at the current sqrt price
/// using the three-region rule: below the range everything is token0,
/// above it everything is token1, inside it both.
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<(U256, U256), Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_ratio_a_x96 {
        Ok((
            get_amount_0_for_liquidity(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)?,
            U256::ZERO,
        ))
    } else if sqrt_ratio_x96 < sqrt_ratio_b_x96 {
        Ok((
            get_amount_0_for_liquidity(sqrt_ratio_x96, sqrt_ratio_b_x96, liquidity, round_up)?,
            get_amount_1_for_liquidity(sqrt_ratio_a_x96, sqrt_ratio_x96, liquidity, round_up)?,
        ))
    } else {
        Ok((
            U256::ZERO,
            get_amount_1_for_liquidity(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)?,
        ))
    }
}

#[inline]
fn to_liquidity(value: U256) -> Result<u128, Error> {
    u128::try_from(value).map_err(|_| MathError::Overflow.into())
}

/// Liquidity obtained by depositing `amount0` of token0 over a range:
/// `amount0 * (sqrtA * sqrtB) / (sqrtB - sqrtA)`.
pub fn get_liquidity_for_amount_0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<u128, Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    let intermediate = mul_div(sqrt_ratio_a_x96, sqrt_ratio_b_x96, Q96)?;
    to_liquidity(mul_div(
        amount0,
        intermediate,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
    )?)
}

/// Liquidity obtained by depositing `amount1` of token1 over a range:
/// `amount1 / (sqrtB - sqrtA)`.
pub fn get_liquidity_for_amount_1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    to_liquidity(mul_div(
        amount1,
        Q96,
        sqrt_ratio_b_x96 - sqrt_ratio_a_x96,
    )?)
}

/// Maximum liquidity that `amount0` and `amount1` can back at the current
/// price. Inside the range the scarcer side wins.
pub fn get_liquidity_for_amounts(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_ratio_a_x96 {
        get_liquidity_for_amount_0(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount0)
    } else if sqrt_ratio_x96 < sqrt_ratio_b_x96 {
        let liquidity0 = get_liquidity_for_amount_0(sqrt_ratio_x96, sqrt_ratio_b_x96, amount0)?;
        let liquidity1 = get_liquidity_for_amount_1(sqrt_ratio_a_x96, sqrt_ratio_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount_1(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount1)
    }
}
