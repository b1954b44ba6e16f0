use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

/// Rejected caller input. None of these are ever clamped away: the caller
/// is expected to surface them and ask for different input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Input error - price must be positive and finite")]
    InvalidPrice,
    #[error("Input error - price outside the representable sqrt price range")]
    PriceOutOfRange,
    #[error("Input error - tick range is empty or outside tick bounds")]
    InvalidRange,
    #[error("Input error - range percent must lie strictly between 0 and 1")]
    InvalidRangePercent,
    #[error("Input error - pair tokens are identical")]
    IdenticalTokens,
    #[error("Input error - tick {tick} is not a multiple of spacing {spacing}")]
    NotUsableTick { tick: i32, spacing: i32 },
    #[error("Input error - token amount must be non-negative and finite")]
    InvalidAmount,
    #[error("Input error - slippage of {0} bps exceeds 100%")]
    InvalidSlippage(u32),
    #[error("Input error - unknown fee tier {0}")]
    UnknownFeeTier(u32),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    InputError(#[from] crate::error::InputError),
}
