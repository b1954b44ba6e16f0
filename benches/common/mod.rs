#![allow(dead_code)]

use std::hint::black_box;

use clmm_position_math::{
    FeeTier, U256,
    codec::{decode, encode},
    math::{
        liquidity_amounts::{get_amounts_for_liquidity, get_liquidity_for_amounts},
        tick_math::{
            get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, nearest_usable_tick, price_to_tick,
        },
    },
    range::{RangeSpec, resolve},
    valuation::{CurrentPrice, amounts_for_position},
};
use criterion::Criterion;

pub fn bench_tick_math(c: &mut Criterion) {
    c.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| get_sqrt_ratio_at_tick(black_box(80067)))
    });

    let sqrt_price = get_sqrt_ratio_at_tick(80067).unwrap();
    c.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| get_tick_at_sqrt_ratio(black_box(sqrt_price)))
    });

    c.bench_function("price_to_usable_tick", |b| {
        b.iter(|| nearest_usable_tick(price_to_tick(black_box(3000.0)).unwrap(), 60))
    });
}

pub fn bench_codec(c: &mut Criterion) {
    c.bench_function("encode", |b| b.iter(|| encode(black_box(3000.0), 18, 6)));

    let encoded = encode(3000.0, 18, 6).unwrap();
    c.bench_function("decode", |b| b.iter(|| decode(black_box(encoded), 18, 6)));
}

pub fn bench_liquidity_amounts(c: &mut Criterion) {
    let lower = get_sqrt_ratio_at_tick(-600).unwrap();
    let upper = get_sqrt_ratio_at_tick(600).unwrap();
    let current = get_sqrt_ratio_at_tick(0).unwrap();

    c.bench_function("get_amounts_for_liquidity", |b| {
        b.iter(|| {
            get_amounts_for_liquidity(
                black_box(current),
                lower,
                upper,
                black_box(1_000_000_000_000_000_000u128),
                false,
            )
        })
    });

    c.bench_function("get_liquidity_for_amounts", |b| {
        b.iter(|| {
            get_liquidity_for_amounts(
                black_box(current),
                lower,
                upper,
                U256::from(1_000_000_000_000_000_000u128),
                U256::from(3_000_000_000u64),
            )
        })
    });
}

pub fn bench_position(c: &mut Criterion) {
    c.bench_function("resolve_percent_range", |b| {
        b.iter(|| resolve(black_box(RangeSpec::NARROW), black_box(3000.0), FeeTier::Medium))
    });

    c.bench_function("amounts_for_position", |b| {
        b.iter(|| {
            amounts_for_position(
                black_box(1_000_000_000_000_000u128),
                78240,
                81900,
                CurrentPrice::Tick(black_box(80067)),
                18,
                6,
            )
        })
    });
}
