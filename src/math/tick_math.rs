use crate::error::{Error, InputError};
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// Price ratio between two adjacent ticks.
pub const TICK_BASE: f64 = 1.0001;

/// `ln(1.0001)`, correctly rounded. `TICK_BASE.ln()` is off by ~1e-13
/// relative because `1.0001` itself is not representable.
pub const LN_TICK_BASE: f64 = 9.999500033330834e-5;

// Absorbs the rounding of `exp`/`ln` so exact tick prices map back to
// their own tick instead of the one below.
const TICK_EPSILON: f64 = 1e-9;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

/// Converts a positive price into the greatest tick whose price does not
/// exceed it: `floor(log(price) / log(1.0001))`.
///
/// The result is not necessarily usable for any fee tier; pass it through
/// [`nearest_usable_tick`] before building a range.
pub fn price_to_tick(price: f64) -> Result<i32, Error> {
    if !price.is_finite() || price <= 0.0 {
        return Err(InputError::InvalidPrice.into());
    }

    let tick = (price.ln() / LN_TICK_BASE + TICK_EPSILON).floor();
    if tick < MIN_TICK as f64 || tick > MAX_TICK as f64 {
        return Err(InputError::PriceOutOfRange.into());
    }

    Ok(tick as i32)
}

/// Returns `1.0001^tick`, the raw price of a tick.
///
/// Evaluated as `exp(tick * ln 1.0001)`; repeated squaring drifts by more
/// than [`price_to_tick`] tolerates at large ticks.
pub fn tick_to_price(tick: i32) -> Result<f64, Error> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(InputError::InvalidRange.into());
    }
    Ok((tick as f64 * LN_TICK_BASE).exp())
}

/// Rounds `tick` to the nearest multiple of `spacing`, breaking exact ties
/// toward positive infinity.
///
/// A rounded tick that lands outside `[MIN_TICK, MAX_TICK]` is moved one
/// spacing inward so the result is always a usable, in-bounds tick.
///
/// # Panics
///
/// If `spacing` is not positive. Spacings from [`FeeTier::tick_spacing`]
/// always are.
///
/// [`FeeTier::tick_spacing`]: crate::FeeTier::tick_spacing
pub fn nearest_usable_tick(tick: i32, spacing: i32) -> i32 {
    assert!(spacing > 0, "tick spacing must be positive, got {spacing}");

    let rounded = (tick + spacing / 2).div_euclid(spacing) * spacing;

    if rounded < MIN_TICK {
        rounded + spacing
    } else if rounded > MAX_TICK {
        rounded - spacing
    } else {
        rounded
    }
}

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index,
/// or `InputError::InvalidRange` if the tick is outside the tick bounds.
///
/// Bit-exact with the on-chain `TickMath.getSqrtRatioAtTick`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, InputError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(InputError::InvalidRange);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    macro_rules! apply_multiplier {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_tick & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> 128;
            }
        };
    }

    apply_multiplier!(2, 6459403834229662010, 18444899583751176498);
    apply_multiplier!(4, 17226890335427755468, 18443055278223354162);
    apply_multiplier!(8, 2032852871939366096, 18439367220385604838);
    apply_multiplier!(16, 14545316742740207172, 18431993317065449817);
    apply_multiplier!(32, 5129152022828963008, 18417254355718160513);
    apply_multiplier!(64, 4894419605888772193, 18387811781193591352);
    apply_multiplier!(128, 1280255884321894483, 18329067761203520168);
    apply_multiplier!(256, 15924666964335305636, 18212142134806087854);
    apply_multiplier!(512, 8010504389359918676, 17980523815641551639);
    apply_multiplier!(1024, 10668036004952895731, 17526086738831147013);
    apply_multiplier!(2048, 4878133418470705625, 16651378430235024244);
    apply_multiplier!(4096, 9537173718739605541, 15030750278693429944);
    apply_multiplier!(8192, 9972618978014552549, 12247334978882834399);
    apply_multiplier!(16384, 10428997489610666743, 8131365268884726200);
    apply_multiplier!(32768, 9305304367709015974, 3584323654723342297);
    apply_multiplier!(65536, 14301143598189091785, 696457651847595233);
    apply_multiplier!(131072, 7393154844743099908, 26294789957452057);
    apply_multiplier!(262144, 2209338891292245656, 37481735321082);
    apply_multiplier!(524288, 10518117631919034274, 76158723);

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let lower_32_bits = ratio.as_limbs()[0] & 0xFFFF_FFFF;
    Ok((ratio >> 32) + U256::from((lower_32_bits != 0) as u64))
}

/// Computes the greatest tick whose sqrt price is at most `sqrt_price_x96`,
/// failing with `InputError::PriceOutOfRange` outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, InputError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(InputError::PriceOutOfRange);
    }

    let ratio: U256 = sqrt_price_x96 << 32usize;
    let msb = 255 - ratio.leading_zeros();

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u32))) << 64usize;

    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> 127usize;
        let f = r >> 128usize;
        log_2 |= I256::from_raw(f << shift);
        r >>= f.to::<usize>();
    }

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = (log_sqrt10001 - TICK_LOW).asr(128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH).asr(128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}
