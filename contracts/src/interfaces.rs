//! Cross-contract interfaces used by the vault and the vault-gated tokens.
//!
//! Method and argument names mirror the entry points of the callee, since
//! Odra passes cross-contract arguments by name.

use odra::prelude::*;
use odra::casper_types::U256;

/// Result type for the pure pricing and quoting helpers
pub type VaultResult<T> = Result<T, crate::errors::VaultError>;

/// CEP-18 token interface (collateral ledger)
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn balance_of(&self, account: Address) -> U256;
    fn decimals(&self) -> u8;
}

/// Ledger whose mint/burn authority belongs to the vault (SimStable, SimGov)
#[odra::external_contract]
pub trait VaultToken {
    fn mint(&mut self, to: Address, amount: U256);
    fn burn(&mut self, from: Address, amount: U256);
    fn balance_of(&self, account: Address) -> U256;
    fn total_supply(&self) -> U256;
}

/// Two-asset reserve pool used as the price source
#[odra::external_contract]
pub trait ReserveSource {
    fn get_reserves(&self) -> (U256, U256, u64);
    fn token0(&self) -> Address;
    fn token1(&self) -> Address;
    fn token_decimals(&self) -> (u8, u8);
}

/// Collateral ratio hook the stable token calls after every transfer
#[odra::external_contract]
pub trait CollateralRatioHook {
    fn adjust_collateral_ratio(&mut self) -> u32;
}
