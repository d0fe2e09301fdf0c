//! Collateral ratio controller.
//!
//! Moves the collateral ratio against the stable token's peg deviation:
//!
//! `delta = adjustment_coefficient * (1e18 - price) / 1e18`
//!
//! truncated toward zero with the sign preserved, then clamped to
//! `[min_collateral_ratio, max_collateral_ratio]`. A price below the peg
//! raises the ratio, a price above it lowers the ratio.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::types::{RatioConfig, PEG_PRICE};

/// Next collateral ratio for an observed stable price.
///
/// Saturates instead of failing: deviations too large to represent push the
/// ratio to the corresponding bound.
pub fn next_collateral_ratio(current: u32, price: U256, config: &RatioConfig) -> u32 {
    let peg = U256::from(PEG_PRICE);
    let coefficient = U256::from(config.adjustment_coefficient);
    let min = U256::from(config.min_collateral_ratio);
    let max = U256::from(config.max_collateral_ratio);
    let current = U256::from(current);

    let next = if price < peg {
        let delta = coefficient * (peg - price) / peg;
        current + delta
    } else {
        let delta = coefficient
            .checked_mul(price - peg)
            .map(|scaled| scaled / peg)
            .unwrap_or(U256::MAX);
        current.saturating_sub(delta)
    };

    next.max(min).min(max).as_u32()
}

/// Collateral ratio state, embedded in the vault as a submodule
#[odra::module]
pub struct RatioController {
    /// Current collateral ratio (1e4 scale)
    collateral_ratio: Var<u32>,
    /// Target, bounds and adjustment coefficient
    config: Var<RatioConfig>,
}

#[odra::module]
impl RatioController {
    /// Initialize at the target ratio
    pub fn init(&mut self, config: RatioConfig) {
        if let Err(error) = config.validate() {
            self.env().revert(error);
        }
        self.collateral_ratio.set(config.target_collateral_ratio);
        self.config.set(config);
    }

    pub fn collateral_ratio(&self) -> u32 {
        self.collateral_ratio
            .get()
            .unwrap_or_else(|| self.config().target_collateral_ratio)
    }

    pub fn config(&self) -> RatioConfig {
        self.config.get().unwrap_or_default()
    }

    /// Apply one adjustment step for `price`, returning `(previous, current)`
    pub fn apply_price(&mut self, price: U256) -> (u32, u32) {
        let previous = self.collateral_ratio();
        let current = next_collateral_ratio(previous, price, &self.config());
        if current != previous {
            self.collateral_ratio.set(current);
        }
        (previous, current)
    }

    /// Override the ratio; must lie within the configured bounds
    pub fn set_collateral_ratio(&mut self, ratio: u32) -> (u32, u32) {
        if !self.config().contains(ratio) {
            self.env().revert(VaultError::CollateralRatioOutOfBounds);
        }
        let previous = self.collateral_ratio();
        self.collateral_ratio.set(ratio);
        (previous, ratio)
    }

    /// Replace the configuration, re-clamping the current ratio into the new bounds
    pub fn set_config(&mut self, config: RatioConfig) -> (u32, u32) {
        if let Err(error) = config.validate() {
            self.env().revert(error);
        }
        let previous = self.collateral_ratio();
        let current = config.clamp(previous);
        self.collateral_ratio.set(current);
        self.config.set(config);
        (previous, current)
    }
}
