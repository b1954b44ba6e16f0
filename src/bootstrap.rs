use crate::codec::encode;
use crate::direction::to_canonical;
use crate::error::Error;
use crate::fee_tier::FeeTier;
use crate::math::tick_math::get_tick_at_sqrt_ratio;
use crate::pair::{CanonicalPair, Token, order};
use alloy_primitives::U256;
use tracing::debug;

/// Everything a pool-creation call needs, in canonical order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolInit {
    pub pair: CanonicalPair,
    pub fee_tier: FeeTier,
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Prepares the initial price of a pool that does not exist yet.
///
/// `price` is what the user typed: units of `quote` per unit of `base`.
/// If canonical order puts `base` second, the price is inverted, and the
/// encoding always uses the canonically ordered decimals.
pub fn bootstrap(
    base: Token,
    quote: Token,
    price: f64,
    fee_tier: FeeTier,
) -> Result<PoolInit, Error> {
    let pair = order(base, quote)?;
    let canonical_price = to_canonical(price, !pair.swapped)?;

    let (decimals_a, decimals_b) = pair.decimals();
    let sqrt_price_x96 = encode(canonical_price, decimals_a, decimals_b)?;
    let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;

    debug!(
        token_a = %pair.token_a.symbol,
        token_b = %pair.token_b.symbol,
        swapped = pair.swapped,
        canonical_price,
        tick,
        fee = fee_tier.fee(),
        "prepared pool initialization"
    );

    Ok(PoolInit {
        pair,
        fee_tier,
        sqrt_price_x96,
        tick,
    })
}
