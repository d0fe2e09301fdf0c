//! SimGov Token Contract
//!
//! CEP-18 governance token. The deployer receives `initial_supply` at
//! construction; after that only the bound vault mints (redemptions,
//! re-collateralization) and burns (mint deposits, buybacks).

use odra::prelude::*;
use odra::casper_types::U256;
use crate::access_control::{Ownership, VaultAuthority};
use crate::errors::VaultError;
use crate::events::{TokensBurned, TokensMinted, VaultSet};
use crate::ledger::TokenLedger;
use crate::types::TOKEN_DECIMALS;

const NAME: &str = "SimGov";
const SYMBOL: &str = "SGOV";

/// SimGov Token Contract
#[odra::module(events = [TokensMinted, TokensBurned, VaultSet])]
pub struct SimGov {
    ledger: SubModule<TokenLedger>,
    ownership: SubModule<Ownership>,
    authority: SubModule<VaultAuthority>,
}

#[odra::module]
impl SimGov {
    /// Initialize the token and mint `initial_supply` to the deployer
    pub fn init(&mut self, initial_supply: U256) {
        let deployer = self.env().caller();
        self.ledger.init(String::from(NAME), String::from(SYMBOL), TOKEN_DECIMALS);
        self.ownership.init(deployer);
        if !initial_supply.is_zero() {
            self.ledger.mint(deployer, initial_supply);
            self.env().emit_event(TokensMinted { to: deployer, amount: initial_supply });
        }
    }

    // ========== CEP-18 Standard Functions ==========

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

    // ========== Vault Functions (Restricted) ==========

    pub fn mint(&mut self, to: Address, amount: U256) {
        self.authority.require_vault();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.ledger.mint(to, amount);
        self.env().emit_event(TokensMinted { to, amount });
    }

    pub fn burn(&mut self, from: Address, amount: U256) {
        self.authority.require_vault();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.ledger.burn(from, amount);
        self.env().emit_event(TokensBurned { from, amount });
    }

    // ========== Admin Functions ==========

    pub fn set_vault(&mut self, vault: Address) {
        self.ownership.require_owner();
        self.authority.bind(vault);
        self.env().emit_event(VaultSet { vault });
    }

    pub fn vault(&self) -> Option<Address> {
        self.authority.vault()
    }

    pub fn owner(&self) -> Option<Address> {
        self.ownership.owner()
    }
}
