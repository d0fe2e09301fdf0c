//! Events emitted by the SimVault contracts.
//!
//! Field order of the vault events is part of the public interface.

use odra::prelude::*;
use odra::casper_types::U256;

// ========== Vault ==========

#[odra::event]
pub struct Minted {
    pub caller: Address,
    pub collateral_amount: U256,
    pub gov_amount: U256,
    pub stable_amount: U256,
}

#[odra::event]
pub struct Redeemed {
    pub caller: Address,
    pub stable_amount: U256,
    pub collateral_returned: U256,
    pub gov_minted: U256,
}

#[odra::event]
pub struct BuybackExecuted {
    pub caller: Address,
    pub gov_amount: U256,
    pub collateral_paid: U256,
}

#[odra::event]
pub struct ReCollateralized {
    pub caller: Address,
    pub collateral_amount: U256,
    pub gov_minted: U256,
}

#[odra::event]
pub struct PricesUpdated {
    pub stable_price: U256,
    pub gov_price: U256,
}

/// Emitted whenever the collateral ratio changes value
#[odra::event]
pub struct CollateralRatioUpdated {
    pub previous: u32,
    pub current: u32,
}

// ========== Vault-gated tokens ==========

#[odra::event]
pub struct TokensMinted {
    pub to: Address,
    pub amount: U256,
}

#[odra::event]
pub struct TokensBurned {
    pub from: Address,
    pub amount: U256,
}

#[odra::event]
pub struct VaultSet {
    pub vault: Address,
}

// ========== Reserve pool ==========

#[odra::event]
pub struct ReservesSynced {
    pub reserve0: U256,
    pub reserve1: U256,
}
