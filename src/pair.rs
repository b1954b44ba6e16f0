use crate::error::InputError;
use alloy_primitives::{Address, U160};
use tracing::debug;

/// Token metadata as supplied by the caller's metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(address: Address, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
        }
    }
}

/// A token pair in canonical order (`token_a.address < token_b.address`).
///
/// `swapped` records whether the caller's `(x, y)` order had to be
/// reversed to reach canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalPair {
    pub token_a: Token,
    pub token_b: Token,
    pub swapped: bool,
}

impl CanonicalPair {
    /// `(decimals_a, decimals_b)` in canonical order.
    #[inline]
    pub fn decimals(&self) -> (u8, u8) {
        (self.token_a.decimals, self.token_b.decimals)
    }

    /// Whether `address` is the canonical token A of this pair, or `None`
    /// if it belongs to neither side.
    pub fn is_token_a(&self, address: &Address) -> Option<bool> {
        if *address == self.token_a.address {
            Some(true)
        } else if *address == self.token_b.address {
            Some(false)
        } else {
            None
        }
    }
}

/// Converts an `Address` into its `U160` numeric representation.
#[inline(always)]
pub fn address_to_u160(address: Address) -> U160 {
    address.into()
}

/// Returns the two addresses sorted by numeric value, as the pool
/// contracts require.
pub fn sort_tokens(token0: Address, token1: Address) -> Result<(Address, Address), InputError> {
    let (lhs, rhs) = (address_to_u160(token0), address_to_u160(token1));
    if lhs == rhs {
        Err(InputError::IdenticalTokens)
    } else if lhs < rhs {
        Ok((token0, token1))
    } else {
        Ok((token1, token0))
    }
}

/// Orders an arbitrary token pair canonically.
pub fn order(token_x: Token, token_y: Token) -> Result<CanonicalPair, InputError> {
    let (first, _) = sort_tokens(token_x.address, token_y.address)?;
    let swapped = first != token_x.address;

    if swapped {
        debug!(
            token_x = %token_x.symbol,
            token_y = %token_y.symbol,
            "pair reversed into canonical order"
        );
        Ok(CanonicalPair {
            token_a: token_y,
            token_b: token_x,
            swapped,
        })
    } else {
        Ok(CanonicalPair {
            token_a: token_x,
            token_b: token_y,
            swapped,
        })
    }
}
