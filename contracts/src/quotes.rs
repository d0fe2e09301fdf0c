//! Vault quoting arithmetic.
//!
//! Pure functions behind the vault's economic operations. Amounts of
//! collateral enter and leave here as wads; the vault converts from and to
//! the collateral token's native decimals around these calls.
//!
//! Value is measured in stable units (1e18):
//! - collateral value = `wad(collateral) * collateral_price / 1e18`
//! - gov value = `(gov * gov_price / 1e18) * collateral_price / 1e18`

use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::interfaces::VaultResult;
use crate::pricing::mul_div;
use crate::types::{PriceSnapshot, RATIO_SCALE, WAD};

/// Payout of a redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemQuote {
    /// Collateral returned, in wad
    pub collateral_wad: U256,
    /// Gov minted to cover the uncollateralized share
    pub gov_amount: U256,
}

fn wad() -> U256 {
    U256::from(WAD)
}

fn ratio_scale() -> U256 {
    U256::from(RATIO_SCALE)
}

/// Value in stable units of a wad collateral amount
pub fn collateral_value(collateral_wad: U256, prices: &PriceSnapshot) -> VaultResult<U256> {
    mul_div(collateral_wad, prices.collateral_price, wad())
}

/// Value in stable units of a gov amount
pub fn gov_value(gov_amount: U256, prices: &PriceSnapshot) -> VaultResult<U256> {
    let in_collateral = mul_div(gov_amount, prices.gov_price, wad())?;
    mul_div(in_collateral, prices.collateral_price, wad())
}

/// Stable minted for a collateral and gov deposit at `collateral_ratio`
pub fn quote_mint(
    collateral_wad: U256,
    gov_amount: U256,
    prices: &PriceSnapshot,
    collateral_ratio: u32,
) -> VaultResult<U256> {
    let value = collateral_value(collateral_wad, prices)?
        .checked_add(gov_value(gov_amount, prices)?)
        .ok_or(VaultError::MathOverflow)?;
    let stable_amount = mul_div(value, ratio_scale(), U256::from(collateral_ratio))?;
    if stable_amount.is_zero() {
        return Err(VaultError::MintAmountTooSmall);
    }
    Ok(stable_amount)
}

/// Collateral and gov paid out for burning `stable_amount`.
///
/// `stable_supply` is the supply before the burn. The collateral share is
/// pro-rata to how much of the total backing the vault actually holds; the
/// rest is paid in gov at the current gov price.
pub fn quote_redeem(
    stable_amount: U256,
    stable_supply: U256,
    vault_collateral_wad: U256,
    prices: &PriceSnapshot,
    collateral_ratio: u32,
) -> VaultResult<RedeemQuote> {
    if stable_supply.is_zero() {
        return Err(VaultError::NoStableInCirculation);
    }
    if prices.collateral_price.is_zero() || prices.gov_price.is_zero() {
        return Err(VaultError::ZeroReserves);
    }

    let ratio = U256::from(collateral_ratio);
    let redeem_value = mul_div(stable_amount, ratio, ratio_scale())?;
    let backing = mul_div(stable_supply, ratio, ratio_scale())?;
    let held_value = collateral_value(vault_collateral_wad, prices)?;

    let collateral_part = if held_value >= backing {
        redeem_value
    } else {
        mul_div(redeem_value, held_value, backing)?
    };
    let gov_part = redeem_value - collateral_part;

    let collateral_wad = mul_div(collateral_part, wad(), prices.collateral_price)?;
    let gov_in_collateral = mul_div(gov_part, wad(), prices.collateral_price)?;
    let gov_amount = mul_div(gov_in_collateral, wad(), prices.gov_price)?;

    if collateral_wad.is_zero() && gov_amount.is_zero() {
        return Err(VaultError::RedeemAmountTooSmall);
    }
    Ok(RedeemQuote { collateral_wad, gov_amount })
}

/// Collateral (wad) paid for buying back `gov_amount`
pub fn quote_buyback(gov_amount: U256, prices: &PriceSnapshot) -> VaultResult<U256> {
    mul_div(gov_amount, prices.gov_price, wad())
}

/// Collateral (wad) needed to lift the vault's backing to `target_ratio`.
/// Zero when the vault already holds at least the target value.
///
/// Only the collateral price enters here, so an empty gov pool never blocks
/// re-collateralization.
pub fn collateral_shortfall(
    stable_supply: U256,
    vault_collateral_wad: U256,
    collateral_price: U256,
    target_ratio: u32,
) -> VaultResult<U256> {
    if collateral_price.is_zero() {
        return Err(VaultError::ZeroReserves);
    }
    let target_value = mul_div(stable_supply, U256::from(target_ratio), ratio_scale())?;
    let held_value = mul_div(vault_collateral_wad, collateral_price, wad())?;
    if held_value >= target_value {
        return Ok(U256::zero());
    }
    mul_div(target_value - held_value, wad(), collateral_price)
}

/// Gov minted for a re-collateralization deposit of `collateral_wad`.
///
/// Gov is issued 1:1 against the wad deposit, which must be non-zero after
/// normalization and may not exceed `shortfall`.
pub fn quote_re_collateralize(collateral_wad: U256, shortfall: U256) -> VaultResult<U256> {
    if shortfall.is_zero() {
        return Err(VaultError::ReCollateralizationNotRequired);
    }
    if collateral_wad.is_zero() {
        return Err(VaultError::InvalidCollateralAmount);
    }
    if collateral_wad > shortfall {
        return Err(VaultError::CollateralExceedsShortfall);
    }
    Ok(collateral_wad)
}
