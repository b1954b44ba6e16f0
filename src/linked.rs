//! Two linked amount inputs (token A and token B) for a deposit form.
//!
//! The field the user edited last is the source of truth; only the other
//! field is recomputed from it, once per edit or per fresh price snapshot.
//! Recomputing both directions in one update would make the values drift.

use crate::error::{Error, InputError, MathError};
use crate::math::liquidity_amounts::{
    get_amount_0_for_liquidity, get_amount_1_for_liquidity, get_liquidity_for_amount_0,
    get_liquidity_for_amount_1, get_liquidity_for_amounts,
};
use crate::math::tick_math::get_sqrt_ratio_at_tick;
use crate::range::TickRange;
use crate::valuation::{CurrentPrice, to_human};
use alloy_primitives::{U256, utils::parse_units};
use tracing::trace;

/// Which input the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Editing {
    A,
    B,
}

/// Converts a human amount into raw integer units.
///
/// The amount is scaled through its shortest decimal form, so `1.15` with
/// two decimals is exactly `115`. Digits beyond `decimals` are truncated.
pub fn to_raw_amount(amount: f64, decimals: u8) -> Result<U256, Error> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(InputError::InvalidAmount.into());
    }
    parse_units(&amount.to_string(), decimals)
        .map(<U256 as From<_>>::from)
        .map_err(|_| MathError::Overflow.into())
}

#[derive(Debug, Clone)]
pub struct LinkedAmounts {
    sqrt_lower: U256,
    sqrt_upper: U256,
    sqrt_price_x96: U256,
    decimals_a: u8,
    decimals_b: u8,
    last_edited: Option<Editing>,
    amount_a: f64,
    amount_b: f64,
}

impl LinkedAmounts {
    pub fn new(
        range: TickRange,
        current: CurrentPrice,
        decimals_a: u8,
        decimals_b: u8,
    ) -> Result<Self, Error> {
        Ok(Self {
            sqrt_lower: get_sqrt_ratio_at_tick(range.lower)?,
            sqrt_upper: get_sqrt_ratio_at_tick(range.upper)?,
            sqrt_price_x96: current.sqrt_price_x96()?,
            decimals_a,
            decimals_b,
            last_edited: None,
            amount_a: 0.0,
            amount_b: 0.0,
        })
    }

    #[inline]
    pub fn last_edited(&self) -> Option<Editing> {
        self.last_edited
    }

    /// `(amount_a, amount_b)` in human units.
    #[inline]
    pub fn amounts(&self) -> (f64, f64) {
        (self.amount_a, self.amount_b)
    }

    /// User typed `amount` of token A. Returns the recomputed token B amount.
    pub fn edit_a(&mut self, amount: f64) -> Result<f64, Error> {
        let counterpart = self.amount_b_for(amount)?;
        self.last_edited = Some(Editing::A);
        self.amount_a = amount;
        self.amount_b = counterpart;
        Ok(counterpart)
    }

    /// User typed `amount` of token B. Returns the recomputed token A amount.
    pub fn edit_b(&mut self, amount: f64) -> Result<f64, Error> {
        let counterpart = self.amount_a_for(amount)?;
        self.last_edited = Some(Editing::B);
        self.amount_b = amount;
        self.amount_a = counterpart;
        Ok(counterpart)
    }

    /// A fresher pool snapshot arrived: recompute the non-edited side from
    /// the edited one. Nothing changes if the price is rejected.
    pub fn refresh(&mut self, current: CurrentPrice) -> Result<(), Error> {
        let previous = self.sqrt_price_x96;
        self.sqrt_price_x96 = current.sqrt_price_x96()?;

        let recomputed = match self.last_edited {
            Some(Editing::A) => self.amount_b_for(self.amount_a).map(|b| (self.amount_a, b)),
            Some(Editing::B) => self.amount_a_for(self.amount_b).map(|a| (a, self.amount_b)),
            None => Ok((self.amount_a, self.amount_b)),
        };

        match recomputed {
            Ok((amount_a, amount_b)) => {
                self.amount_a = amount_a;
                self.amount_b = amount_b;
                Ok(())
            }
            Err(err) => {
                self.sqrt_price_x96 = previous;
                Err(err)
            }
        }
    }

    /// Liquidity the current pair of amounts can back.
    pub fn liquidity(&self) -> Result<u128, Error> {
        get_liquidity_for_amounts(
            self.sqrt_price_x96,
            self.sqrt_lower,
            self.sqrt_upper,
            to_raw_amount(self.amount_a, self.decimals_a)?,
            to_raw_amount(self.amount_b, self.decimals_b)?,
        )
    }

    fn amount_b_for(&self, amount_a: f64) -> Result<f64, Error> {
        let raw_a = to_raw_amount(amount_a, self.decimals_a)?;
        if self.sqrt_price_x96 <= self.sqrt_lower || self.sqrt_price_x96 >= self.sqrt_upper {
            trace!("price outside range, token B side stays empty");
            return Ok(0.0);
        }

        let liquidity = get_liquidity_for_amount_0(self.sqrt_price_x96, self.sqrt_upper, raw_a)?;
        let raw_b =
            get_amount_1_for_liquidity(self.sqrt_lower, self.sqrt_price_x96, liquidity, false)?;
        Ok(to_human(raw_b, self.decimals_b))
    }

    fn amount_a_for(&self, amount_b: f64) -> Result<f64, Error> {
        let raw_b = to_raw_amount(amount_b, self.decimals_b)?;
        if self.sqrt_price_x96 <= self.sqrt_lower || self.sqrt_price_x96 >= self.sqrt_upper {
            trace!("price outside range, token A side stays empty");
            return Ok(0.0);
        }

        let liquidity = get_liquidity_for_amount_1(self.sqrt_lower, self.sqrt_price_x96, raw_b)?;
        let raw_a =
            get_amount_0_for_liquidity(self.sqrt_price_x96, self.sqrt_upper, liquidity, false)?;
        Ok(to_human(raw_a, self.decimals_a))
    }
}
