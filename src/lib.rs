//! Concentrated-liquidity position math for Uniswap V3–style pools.
//!
//! This crate exposes:
//! - Low‑level integer primitives (`math::*`) for ticks, Q64.96 sqrt prices
//!   and liquidity/amount conversions, bit-exact with the on-chain contracts.
//! - Human-facing helpers that sit on top of them: price encoding with
//!   decimal adjustment ([`codec`]), canonical token ordering ([`pair`]),
//!   price direction handling ([`direction`]), range strategies ([`range`]),
//!   position valuation ([`valuation`]) and pool bootstrapping ([`bootstrap`]).
//!
//! Everything is pure and synchronous; callers supply a snapshot of pool
//! state and get back either display values or canonical integers ready
//! for transaction submission.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use clmm_position_math::{math::tick_math, RESOLUTION, U256};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert!(sqrt_price > U256::ZERO);
//! assert_eq!(RESOLUTION, 96);
//! ```
//!
//! ## Resolving a range and valuing a position
//! ```no_run
//! use clmm_position_math::{
//!     FeeTier,
//!     range::{RangeSpec, resolve},
//!     valuation::{CurrentPrice, amounts_for_position},
//! };
//!
//! let range = resolve(RangeSpec::Percent(0.1), 3000.0, FeeTier::Medium).unwrap();
//! let amounts = amounts_for_position(
//!     1_000_000_000_000_000_000u128,
//!     range.lower,
//!     range.upper,
//!     CurrentPrice::Tick(80_067),
//!     18,
//!     6,
//! )
//! .unwrap();
//! println!("amount_a: {}, amount_b: {}", amounts.amount_a, amounts.amount_b);
//! ```

pub use alloy_primitives::{Address, U256};

pub mod bootstrap;
pub mod codec;
pub mod direction;
pub mod error;
pub mod fee_tier;
pub mod linked;
pub mod math;
pub mod pair;
pub mod range;
pub mod valuation;

pub use error::{Error, InputError, MathError};
pub use fee_tier::FeeTier;
pub use pair::{CanonicalPair, Token};

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
