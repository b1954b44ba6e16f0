use crate::error::MathError;
use alloy_primitives::U256;

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

const TWO_POW_64: f64 = 18446744073709551616.0;
const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1075;

/// Computes `a * b / denominator` with full 512‑bit intermediate precision,
/// returning a `MathError` on overflow or division by zero.
///
/// This mirrors the Solidity `FullMath.mulDiv` behavior and underpins
/// the liquidity and amount calculations.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if denominator <= prod1 {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;

    macro_rules! newton_iteration {
        () => {
            inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)))
        };
    }

    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div`], but rounds the result up when there is a
/// non‑zero remainder.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let mut result = mul_div(a, b, denominator)?;

    if a.mul_mod(b, denominator) > U256::ZERO {
        if result >= U256::MAX {
            return Err(MathError::Overflow);
        }
        result += U256::ONE;
    }
    Ok(result)
}

/// Divides `a` by `b`, rounding the result up when there is a non‑zero
/// remainder.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// Converts a raw integer into the nearest `f64`.
///
/// Precision past 53 significant bits is lost, which is fine for display
/// values but must never feed back into on-chain integers.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * TWO_POW_64 + limb as f64)
}

/// Truncates a non-negative finite `f64` into a `U256`.
///
/// Returns `None` for negative, non-finite, or too-large inputs.
pub fn f64_to_u256(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value < 1.0 {
        return Some(U256::ZERO);
    }

    let bits = value.to_bits();
    let exponent = ((bits >> F64_MANTISSA_BITS) & 0x7ff) as i32 - F64_EXPONENT_BIAS;
    let mantissa = (bits & ((1u64 << F64_MANTISSA_BITS) - 1)) | (1u64 << F64_MANTISSA_BITS);

    if exponent >= 0 {
        let shift = exponent as usize;
        if shift > 256 - (F64_MANTISSA_BITS as usize + 1) {
            return None;
        }
        Some(U256::from(mantissa) << shift)
    } else {
        Some(U256::from(mantissa >> exponent.unsigned_abs()))
    }
}

/// `10^decimals` as a float, used at the human-readable boundary only.
#[inline]
pub fn pow10(decimals: i32) -> f64 {
    10f64.powi(decimals)
}
