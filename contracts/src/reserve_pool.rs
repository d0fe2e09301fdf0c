//! Reserve Pool Contract
//!
//! Two-asset reserve pair the vault reads prices from. Token addresses and
//! decimals are fixed at deployment; the owner (a keeper feed on test
//! networks) keeps the reserves in sync with the market.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::access_control::Ownership;
use crate::errors::VaultError;
use crate::events::ReservesSynced;
use crate::types::MAX_TOKEN_DECIMALS;

/// Reserve Pool Contract
#[odra::module(events = [ReservesSynced])]
pub struct ReservePool {
    token0: Var<Address>,
    token1: Var<Address>,
    decimals0: Var<u8>,
    decimals1: Var<u8>,
    reserve0: Var<U256>,
    reserve1: Var<U256>,
    /// Block time of the last reserve update
    block_timestamp_last: Var<u64>,
    ownership: SubModule<Ownership>,
}

#[odra::module]
impl ReservePool {
    pub fn init(&mut self, token0: Address, token1: Address, decimals0: u8, decimals1: u8) {
        if token0 == token1 || decimals0 > MAX_TOKEN_DECIMALS || decimals1 > MAX_TOKEN_DECIMALS {
            self.env().revert(VaultError::InvalidConfig);
        }
        self.token0.set(token0);
        self.token1.set(token1);
        self.decimals0.set(decimals0);
        self.decimals1.set(decimals1);
        self.reserve0.set(U256::zero());
        self.reserve1.set(U256::zero());
        self.block_timestamp_last.set(self.env().get_block_time());
        let deployer = self.env().caller();
        self.ownership.init(deployer);
    }

    /// `(reserve0, reserve1, block_timestamp_last)`
    pub fn get_reserves(&self) -> (U256, U256, u64) {
        (
            self.reserve0.get().unwrap_or_default(),
            self.reserve1.get().unwrap_or_default(),
            self.block_timestamp_last.get().unwrap_or_default(),
        )
    }

    pub fn token0(&self) -> Address {
        self.token0.get_or_revert_with(VaultError::InvalidPool)
    }

    pub fn token1(&self) -> Address {
        self.token1.get_or_revert_with(VaultError::InvalidPool)
    }

    /// `(decimals0, decimals1)`
    pub fn token_decimals(&self) -> (u8, u8) {
        (
            self.decimals0.get().unwrap_or(18),
            self.decimals1.get().unwrap_or(18),
        )
    }

    /// Sync reserves (owner only)
    pub fn set_reserves(&mut self, reserve0: U256, reserve1: U256) {
        self.ownership.require_owner();
        self.reserve0.set(reserve0);
        self.reserve1.set(reserve1);
        self.block_timestamp_last.set(self.env().get_block_time());
        self.env().emit_event(ReservesSynced { reserve0, reserve1 });
    }

    pub fn owner(&self) -> Option<Address> {
        self.ownership.owner()
    }
}
