pub mod liquidity_amounts;
pub mod liquidity_math;
pub mod math_helpers;
pub mod tick_math;
