//! Collateral Token Contract
//!
//! Plain CEP-18 ledger with configurable decimals, used as the vault's
//! collateral on test networks. The owner mints (faucet).

use odra::prelude::*;
use odra::casper_types::U256;
use crate::access_control::Ownership;
use crate::errors::VaultError;
use crate::events::TokensMinted;
use crate::ledger::TokenLedger;
use crate::types::MAX_TOKEN_DECIMALS;

/// Collateral Token Contract
#[odra::module(events = [TokensMinted])]
pub struct CollateralToken {
    ledger: SubModule<TokenLedger>,
    ownership: SubModule<Ownership>,
}

#[odra::module]
impl CollateralToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        if decimals > MAX_TOKEN_DECIMALS {
            self.env().revert(VaultError::InvalidConfig);
        }
        let deployer = self.env().caller();
        self.ledger.init(name, symbol, decimals);
        self.ownership.init(deployer);
    }

    pub fn name(&self) -> String {
        self.ledger.name()
    }

    pub fn symbol(&self) -> String {
        self.ledger.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.ledger.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.ledger.transfer(sender, recipient, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.ledger.approve(owner, spender, amount);
        true
    }

    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        self.ledger.spend_allowance(owner, spender, amount);
        self.ledger.transfer(owner, recipient, amount);
        true
    }

    /// Faucet mint (owner only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.ownership.require_owner();
        self.ledger.mint(to, amount);
        self.env().emit_event(TokensMinted { to, amount });
    }

    pub fn owner(&self) -> Option<Address> {
        self.ownership.owner()
    }
}
