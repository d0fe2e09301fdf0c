//! CEP-18 balance ledger shared by the protocol tokens.
//!
//! Keeps balances, allowances and total supply in Odra storage and mirrors
//! them into the standard CEP-18 named keys and dictionaries so wallets and
//! explorers can read them. Authorization is left to the embedding token.

use odra::prelude::*;
use odra::casper_types::{U256, Key};
use odra::casper_types::bytesrepr::ToBytes;
use crate::errors::VaultError;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

const CEP18_NAME_KEY: &str = "name";
const CEP18_SYMBOL_KEY: &str = "symbol";
const CEP18_DECIMALS_KEY: &str = "decimals";
const CEP18_TOTAL_SUPPLY_KEY: &str = "total_supply";
const CEP18_BALANCES_DICT: &str = "balances";
const CEP18_ALLOWANCES_DICT: &str = "allowances";

/// Token ledger submodule
#[odra::module]
pub struct TokenLedger {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl TokenLedger {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name.clone());
        self.symbol.set(symbol.clone());
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.env().init_dictionary(CEP18_BALANCES_DICT);
        self.env().init_dictionary(CEP18_ALLOWANCES_DICT);
        self.env().set_named_value(CEP18_NAME_KEY, name);
        self.env().set_named_value(CEP18_SYMBOL_KEY, symbol);
        self.env().set_named_value(CEP18_DECIMALS_KEY, decimals);
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get().unwrap_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(18)
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }

        let new_from_balance = from_balance - amount;
        self.balances.set(&from, new_from_balance);
        self.set_balance_cep18(from, new_from_balance);

        let to_balance = self.balance_of(to);
        let new_to_balance = to_balance + amount;
        self.balances.set(&to, new_to_balance);
        self.set_balance_cep18(to, new_to_balance);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.set_allowance_cep18(owner, spender, amount);
    }

    /// Consume `amount` of the allowance `owner` granted to `spender`
    pub fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(VaultError::InsufficientAllowance);
        }
        self.approve(owner, spender, current_allowance - amount);
    }

    pub fn mint(&mut self, to: Address, amount: U256) {
        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.set_balance_cep18(to, current_balance + amount);

        let new_supply = self.total_supply() + amount;
        self.total_supply.set(new_supply);
        self.set_total_supply_cep18(new_supply);
    }

    pub fn burn(&mut self, from: Address, amount: U256) {
        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }

        let new_balance = current_balance - amount;
        self.balances.set(&from, new_balance);
        self.set_balance_cep18(from, new_balance);

        let new_supply = self.total_supply() - amount;
        self.total_supply.set(new_supply);
        self.set_total_supply_cep18(new_supply);
    }

    fn set_balance_cep18(&self, owner: Address, amount: U256) {
        let key = Self::cep18_balance_key(owner);
        self.env().set_dictionary_value(CEP18_BALANCES_DICT, key.as_bytes(), amount);
    }

    fn set_allowance_cep18(&self, owner: Address, spender: Address, amount: U256) {
        let key = self.cep18_allowance_key(owner, spender);
        self.env().set_dictionary_value(CEP18_ALLOWANCES_DICT, key.as_bytes(), amount);
    }

    fn set_total_supply_cep18(&self, amount: U256) {
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, amount);
    }

    fn cep18_balance_key(owner: Address) -> String {
        let key = Key::from(owner);
        let bytes = key.to_bytes().unwrap_or_default();
        BASE64_STANDARD.encode(bytes)
    }

    // Dictionary item keys are capped at 64 bytes, so the pair is hashed first
    fn cep18_allowance_key(&self, owner: Address, spender: Address) -> String {
        let owner_key = Key::from(owner);
        let spender_key = Key::from(spender);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&owner_key.to_bytes().unwrap_or_default());
        bytes.extend_from_slice(&spender_key.to_bytes().unwrap_or_default());
        BASE64_STANDARD.encode(self.env().hash(bytes))
    }
}
