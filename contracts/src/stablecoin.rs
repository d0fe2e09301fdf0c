//! SimStable Token Contract
//!
//! CEP-18 compatible stable token. Minting and burning belong to the single
//! vault bound through `set_vault`. Every transfer notifies the bound vault so
//! it can re-run its collateral ratio adjustment.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access_control::{Ownership, VaultAuthority};
use crate::errors::VaultError;
use crate::events::{TokensBurned, TokensMinted, VaultSet};
use crate::interfaces::CollateralRatioHookContractRef;
use crate::ledger::TokenLedger;
use crate::types::{VaultBinding, TOKEN_DECIMALS};

const NAME: &str = "SimStable";
const SYMBOL: &str = "SSTB";

/// SimStable Token Contract
#[odra::module(events = [TokensMinted, TokensBurned, VaultSet])]
pub struct SimStable {
    ledger: SubModule<TokenLedger>,
    ownership: SubModule<Ownership>,
    authority: SubModule<VaultAuthority>,
}

#[odra::module]
impl SimStable {
    /// Initialize the token; the deployer becomes the owner
    pub fn init(&mut self) {
        let deployer = self.env().caller();
        self.ledger.init(String::from(NAME), String::from(SYMBOL), TOKEN_DECIMALS);
        self.ownership.init(deployer);
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

    /// Transfer tokens to recipient, then run the vault's ratio hook
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.ledger.transfer(sender, recipient, amount);
        self.notify_vault();
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.ledger.approve(owner, spender, amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance), then run the hook
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        self.ledger.spend_allowance(owner, spender, amount);
        self.ledger.transfer(owner, recipient, amount);
        self.notify_vault();
        true
    }

    // ========== Vault Functions (Restricted) ==========

    /// Mint new tokens (vault only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.authority.require_vault();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.ledger.mint(to, amount);
        self.env().emit_event(TokensMinted { to, amount });
    }

    /// Burn tokens from an account (vault only)
    pub fn burn(&mut self, from: Address, amount: U256) {
        self.authority.require_vault();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        self.ledger.burn(from, amount);
        self.env().emit_event(TokensBurned { from, amount });
    }

    // ========== Admin Functions ==========

    /// Bind the vault (owner only, once)
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

    // ========== Internal Functions ==========

    fn notify_vault(&self) {
        if let VaultBinding::Set(vault) = self.authority.binding() {
            CollateralRatioHookContractRef::new(self.env(), vault).adjust_collateral_ratio();
        }
    }
}
