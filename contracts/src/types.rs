//! Common types used across the SimVault protocol.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;

/// Fixed-point scale for prices and wad amounts (1e18)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Peg price of the stable token (1.0 scaled by 1e18)
pub const PEG_PRICE: u128 = WAD;

/// Collateral ratio scale (100% = 10000)
pub const RATIO_SCALE: u32 = 10_000;

/// Decimals used by SimStable and SimGov
pub const TOKEN_DECIMALS: u8 = 18;

/// Largest decimals accepted for collateral and pool tokens
pub const MAX_TOKEN_DECIMALS: u8 = TOKEN_DECIMALS;

/// Collateral ratio controller configuration
#[odra::odra_type]
pub struct RatioConfig {
    /// Collateral ratio the controller steers toward (e.g., 15000 = 150%)
    pub target_collateral_ratio: u32,
    /// Lower clamp for the collateral ratio
    pub min_collateral_ratio: u32,
    /// Upper clamp for the collateral ratio
    pub max_collateral_ratio: u32,
    /// Ratio units moved per 1.0 of peg deviation
    pub adjustment_coefficient: u32,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            target_collateral_ratio: 15_000,
            min_collateral_ratio: 11_000,
            max_collateral_ratio: 20_000,
            adjustment_coefficient: 100,
        }
    }
}

impl RatioConfig {
    /// Check `0 < min <= target <= max`
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.min_collateral_ratio == 0
            || self.min_collateral_ratio > self.max_collateral_ratio
            || self.target_collateral_ratio < self.min_collateral_ratio
            || self.target_collateral_ratio > self.max_collateral_ratio
        {
            return Err(VaultError::InvalidConfig);
        }
        Ok(())
    }

    pub fn contains(&self, ratio: u32) -> bool {
        ratio >= self.min_collateral_ratio && ratio <= self.max_collateral_ratio
    }

    pub fn clamp(&self, ratio: u32) -> u32 {
        ratio.clamp(self.min_collateral_ratio, self.max_collateral_ratio)
    }
}

/// Snapshot of a reserve pool as read by the price adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    pub decimals0: u8,
    pub decimals1: u8,
}

/// Prices the vault reads at the start of an operation (all scaled by 1e18)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSnapshot {
    /// Stable per collateral token
    pub collateral_price: U256,
    /// Collateral per gov token
    pub gov_price: U256,
}

/// Vault binding of a vault-gated token.
///
/// Starts `Unset` and moves to `Set` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultBinding {
    Unset,
    Set(Address),
}

impl VaultBinding {
    pub fn is_vault(&self, account: &Address) -> bool {
        matches!(self, VaultBinding::Set(vault) if vault == account)
    }
}

impl From<Option<Address>> for VaultBinding {
    fn from(stored: Option<Address>) -> Self {
        match stored {
            Some(vault) => VaultBinding::Set(vault),
            None => VaultBinding::Unset,
        }
    }
}
