use crate::error::MathError;

/// Applies a signed liquidity delta, failing instead of wrapping when a
/// removal exceeds the current liquidity or an addition overflows `u128`.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_delta_adds_positive_delta() {
        assert_eq!(add_delta(100, 20).unwrap(), 120);
    }

    #[test]
    fn add_delta_subtracts_negative_delta() {
        assert_eq!(add_delta(100, -20).unwrap(), 80);
    }

    #[test]
    fn add_delta_removes_everything_at_boundary() {
        assert_eq!(add_delta(1_000, -1_000).unwrap(), 0);
    }

    #[test]
    fn add_delta_handles_min_delta() {
        // i128::MIN has no positive counterpart in i128
        let x = i128::MIN.unsigned_abs();
        assert_eq!(add_delta(x, i128::MIN).unwrap(), 0);
    }

    #[test]
    fn add_delta_positive_overflow() {
        assert!(matches!(add_delta(u128::MAX, 1), Err(MathError::Overflow)));
    }

    #[test]
    fn add_delta_negative_underflow() {
        assert!(matches!(add_delta(100, -200), Err(MathError::Underflow)));
    }
}
