//! Price oracle adapter.
//!
//! Derives spot prices from two-asset reserve pools:
//! - P(token0) = reserve1 * 1e18 / reserve0
//! - P(token1) = reserve0 * 1e18 / reserve1
//!
//! Reserves are normalized to 18 decimals from each pool's declared token
//! decimals before dividing, so a price is always "whole token per whole
//! token" scaled by 1e18. Division truncates.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::interfaces::VaultResult;
use crate::types::{PoolReserves, TOKEN_DECIMALS, WAD};

/// `a * b / denominator` with overflow and zero checks
pub fn mul_div(a: U256, b: U256, denominator: U256) -> VaultResult<U256> {
    if denominator.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(VaultError::MathOverflow)
}

/// `10^exponent`, failing once it no longer fits in a U256
fn pow10(exponent: u8) -> VaultResult<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .ok_or(VaultError::MathOverflow)
}

/// Scale a native token amount to 18 decimals
pub fn to_wad(amount: U256, decimals: u8) -> VaultResult<U256> {
    if decimals <= TOKEN_DECIMALS {
        amount
            .checked_mul(pow10(TOKEN_DECIMALS - decimals)?)
            .ok_or(VaultError::MathOverflow)
    } else {
        Ok(amount / pow10(decimals - TOKEN_DECIMALS)?)
    }
}

/// Scale an 18-decimal amount back to native units (truncating)
pub fn from_wad(amount: U256, decimals: u8) -> VaultResult<U256> {
    if decimals <= TOKEN_DECIMALS {
        Ok(amount / pow10(TOKEN_DECIMALS - decimals)?)
    } else {
        amount
            .checked_mul(pow10(decimals - TOKEN_DECIMALS)?)
            .ok_or(VaultError::MathOverflow)
    }
}

/// Price of `token` denominated in the other side of the pool
pub fn token_price(pool: &PoolReserves, token: &Address) -> VaultResult<U256> {
    let is_token0 = pool.token0 == *token;
    let is_token1 = pool.token1 == *token;

    let (numerator, denominator) = match (is_token0, is_token1) {
        (true, false) => (
            to_wad(pool.reserve1, pool.decimals1)?,
            to_wad(pool.reserve0, pool.decimals0)?,
        ),
        (false, true) => (
            to_wad(pool.reserve0, pool.decimals0)?,
            to_wad(pool.reserve1, pool.decimals1)?,
        ),
        _ => return Err(VaultError::InvalidToken),
    };

    if denominator.is_zero() {
        return Err(VaultError::ZeroReserves);
    }

    mul_div(numerator, U256::from(WAD), denominator)
}
