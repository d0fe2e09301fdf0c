//! Central Vault Contract
//!
//! Mints SimStable against collateral plus SimGov, redeems it back, buys back
//! SimGov with excess collateral and accepts collateral into a deficit for
//! newly minted SimGov. Every decision is gated by the collateral ratio kept
//! by the embedded `RatioController`.
//!
//! Prices come from two reserve pools (1e18 scale):
//! - stable pool: stable price (collateral per stable) and collateral price
//!   (stable per collateral)
//! - gov pool: gov price (collateral per gov)
//!
//! All checks and price reads happen before the first mutating call into a
//! token ledger. Any failure reverts the whole call.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access_control::Ownership;
use crate::controller::RatioController;
use crate::errors::VaultError;
use crate::events::{
    BuybackExecuted, CollateralRatioUpdated, Minted, PricesUpdated, ReCollateralized, Redeemed,
};
use crate::interfaces::{
    Cep18TokenContractRef, ReserveSourceContractRef, VaultResult, VaultTokenContractRef,
};
use crate::pricing::{from_wad, to_wad, token_price};
use crate::quotes::{
    collateral_shortfall, quote_buyback, quote_mint, quote_re_collateralize, quote_redeem,
};
use crate::types::{PoolReserves, PriceSnapshot, RatioConfig, MAX_TOKEN_DECIMALS};

/// Central Vault Contract
#[odra::module(events = [
    Minted,
    Redeemed,
    BuybackExecuted,
    ReCollateralized,
    PricesUpdated,
    CollateralRatioUpdated
])]
pub struct CentralVault {
    ownership: SubModule<Ownership>,
    /// Collateral ratio state and configuration
    controller: SubModule<RatioController>,
    stable_token: Var<Address>,
    gov_token: Var<Address>,
    collateral_token: Var<Address>,
    /// Decimals of the collateral token, read once at deployment
    collateral_decimals: Var<u8>,
    /// Stable/collateral reserve pool
    stable_pool: Var<Address>,
    /// Gov/collateral reserve pool
    gov_pool: Var<Address>,
    last_stable_price: Var<U256>,
    last_gov_price: Var<U256>,
    last_price_update: Var<u64>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl CentralVault {
    /// Initialize the vault
    ///
    /// The stable pool must pair the stable token with the collateral token,
    /// and the gov pool the gov token with the collateral token.
    pub fn init(
        &mut self,
        stable_token: Address,
        gov_token: Address,
        collateral_token: Address,
        stable_pool: Address,
        gov_pool: Address,
        config: RatioConfig,
    ) {
        let deployer = self.env().caller();
        self.ownership.init(deployer);
        self.controller.init(config);

        if !self.pool_pairs(stable_pool, stable_token, collateral_token)
            || !self.pool_pairs(gov_pool, gov_token, collateral_token)
        {
            self.env().revert(VaultError::InvalidPool);
        }

        let collateral_decimals =
            Cep18TokenContractRef::new(self.env(), collateral_token).decimals();
        if collateral_decimals > MAX_TOKEN_DECIMALS {
            self.env().revert(VaultError::InvalidConfig);
        }

        self.stable_token.set(stable_token);
        self.gov_token.set(gov_token);
        self.collateral_token.set(collateral_token);
        self.collateral_decimals.set(collateral_decimals);
        self.stable_pool.set(stable_pool);
        self.gov_pool.set(gov_pool);
        self.locked.set(false);
    }

    // ========== Economic Operations ==========

    /// Deposit collateral and burn gov to mint stable
    ///
    /// Requires a collateral allowance for the vault. Returns the stable minted.
    pub fn mint_stable(&mut self, collateral_amount: U256, gov_amount: U256) -> U256 {
        self.lock();
        if collateral_amount.is_zero() {
            self.env().revert(VaultError::InvalidCollateralAmount);
        }
        if gov_amount.is_zero() {
            self.env().revert(VaultError::InvalidGovAmount);
        }

        let caller = self.env().caller();
        let prices = self.prices();
        let collateral_wad = self.ok_or_revert(to_wad(collateral_amount, self.collateral_decimals()));
        let stable_amount = self.ok_or_revert(quote_mint(
            collateral_wad,
            gov_amount,
            &prices,
            self.controller.collateral_ratio(),
        ));

        self.pull_collateral(caller, collateral_amount);
        self.gov().burn(caller, gov_amount);
        self.stable().mint(caller, stable_amount);

        self.env().emit_event(Minted {
            caller,
            collateral_amount,
            gov_amount,
            stable_amount,
        });
        self.unlock();
        stable_amount
    }

    /// Burn stable for collateral, topping up with newly minted gov when the
    /// vault holds less than the full backing
    ///
    /// Returns `(collateral_returned, gov_minted)`.
    pub fn redeem_stable(&mut self, stable_amount: U256) -> (U256, U256) {
        self.lock();
        if stable_amount.is_zero() {
            self.env().revert(VaultError::InvalidStableAmount);
        }

        let caller = self.env().caller();
        let supply = self.stable().total_supply();
        if supply.is_zero() {
            self.env().revert(VaultError::NoStableInCirculation);
        }

        let prices = self.prices();
        let decimals = self.collateral_decimals();
        let held_wad = self.ok_or_revert(to_wad(self.collateral_balance(), decimals));
        let quote = self.ok_or_revert(quote_redeem(
            stable_amount,
            supply,
            held_wad,
            &prices,
            self.controller.collateral_ratio(),
        ));
        let collateral_returned = self.ok_or_revert(from_wad(quote.collateral_wad, decimals));
        let gov_minted = quote.gov_amount;
        if collateral_returned.is_zero() && gov_minted.is_zero() {
            self.env().revert(VaultError::RedeemAmountTooSmall);
        }

        self.stable().burn(caller, stable_amount);
        if !collateral_returned.is_zero() {
            self.push_collateral(caller, collateral_returned);
        }
        if !gov_minted.is_zero() {
            self.gov().mint(caller, gov_minted);
        }

        self.env().emit_event(Redeemed {
            caller,
            stable_amount,
            collateral_returned,
            gov_minted,
        });
        self.unlock();
        (collateral_returned, gov_minted)
    }

    /// Burn gov for collateral at the gov price; only while over the target ratio
    pub fn buyback_sim_gov(&mut self, gov_amount: U256) -> U256 {
        self.lock();
        if self.controller.collateral_ratio() <= self.target_collateral_ratio() {
            self.env().revert(VaultError::BuybackNotAllowed);
        }
        if gov_amount.is_zero() {
            self.env().revert(VaultError::InvalidGovAmount);
        }

        let caller = self.env().caller();
        let prices = self.prices();
        let payout_wad = self.ok_or_revert(quote_buyback(gov_amount, &prices));
        let collateral_paid = self.ok_or_revert(from_wad(payout_wad, self.collateral_decimals()));
        if collateral_paid.is_zero() || collateral_paid > self.collateral_balance() {
            self.env().revert(VaultError::InvalidBuybackAmount);
        }

        self.gov().burn(caller, gov_amount);
        self.push_collateral(caller, collateral_paid);

        self.env().emit_event(BuybackExecuted {
            caller,
            gov_amount,
            collateral_paid,
        });
        self.unlock();
        collateral_paid
    }

    /// Deposit collateral into a deficit for gov minted 1:1 against the wad amount;
    /// only while under the target ratio
    pub fn re_collateralize(&mut self, collateral_amount: U256) -> U256 {
        self.lock();
        if self.controller.collateral_ratio() >= self.target_collateral_ratio() {
            self.env().revert(VaultError::ReCollateralizationNotRequired);
        }
        if collateral_amount.is_zero() {
            self.env().revert(VaultError::InvalidCollateralAmount);
        }

        let caller = self.env().caller();
        let shortfall = self.shortfall_wad();
        let collateral_wad = self.ok_or_revert(to_wad(collateral_amount, self.collateral_decimals()));
        let gov_minted = self.ok_or_revert(quote_re_collateralize(collateral_wad, shortfall));

        self.pull_collateral(caller, collateral_amount);
        self.gov().mint(caller, gov_minted);

        self.env().emit_event(ReCollateralized {
            caller,
            collateral_amount,
            gov_minted,
        });
        self.unlock();
        gov_minted
    }

    // ========== Collateral Ratio ==========

    /// Step the collateral ratio against the stable price
    ///
    /// Callable by the owner and by the stable token's transfer hook.
    pub fn adjust_collateral_ratio(&mut self) -> u32 {
        let caller = self.env().caller();
        if !self.ownership.is_owner(caller) && caller != self.stable_token() {
            self.env().revert(VaultError::Unauthorized);
        }
        self.lock();

        let pool = self.read_pool(self.stable_pool());
        let price = self.ok_or_revert(token_price(&pool, &self.stable_token()));
        let (previous, current) = self.controller.apply_price(price);
        self.emit_ratio_change(previous, current);

        self.unlock();
        current
    }

    /// Override the collateral ratio within the configured bounds (owner only)
    pub fn set_collateral_ratio(&mut self, ratio: u32) {
        self.ownership.require_owner();
        let (previous, current) = self.controller.set_collateral_ratio(ratio);
        self.emit_ratio_change(previous, current);
    }

    /// Replace the controller configuration (owner only)
    pub fn set_ratio_config(&mut self, config: RatioConfig) {
        self.ownership.require_owner();
        let (previous, current) = self.controller.set_config(config);
        self.emit_ratio_change(previous, current);
    }

    // ========== Prices ==========

    /// Price of `token` in the other asset of `pair` (1e18 scale)
    pub fn get_token_price(&self, pair: Address, token: Address) -> U256 {
        let pool = self.read_pool(pair);
        self.ok_or_revert(token_price(&pool, &token))
    }

    /// Read and record the stable and gov prices
    ///
    /// Returns `(stable_price, gov_price)`.
    pub fn update_prices(&mut self) -> (U256, U256) {
        let stable_price = self.get_token_price(self.stable_pool(), self.stable_token());
        let gov_price = self.get_token_price(self.gov_pool(), self.gov_token());

        self.last_stable_price.set(stable_price);
        self.last_gov_price.set(gov_price);
        self.last_price_update.set(self.env().get_block_time());

        self.env().emit_event(PricesUpdated {
            stable_price,
            gov_price,
        });
        (stable_price, gov_price)
    }

    /// `(stable_price, gov_price, timestamp)` recorded by the last `update_prices`
    pub fn last_prices(&self) -> (U256, U256, u64) {
        (
            self.last_stable_price.get().unwrap_or_default(),
            self.last_gov_price.get().unwrap_or_default(),
            self.last_price_update.get().unwrap_or_default(),
        )
    }

    // ========== View Functions ==========

    pub fn collateral_ratio(&self) -> u32 {
        self.controller.collateral_ratio()
    }

    pub fn target_collateral_ratio(&self) -> u32 {
        self.controller.config().target_collateral_ratio
    }

    pub fn min_collateral_ratio(&self) -> u32 {
        self.controller.config().min_collateral_ratio
    }

    pub fn max_collateral_ratio(&self) -> u32 {
        self.controller.config().max_collateral_ratio
    }

    pub fn adjustment_coefficient(&self) -> u32 {
        self.controller.config().adjustment_coefficient
    }

    pub fn ratio_config(&self) -> RatioConfig {
        self.controller.config()
    }

    pub fn stable_token(&self) -> Address {
        self.stable_token.get_or_revert_with(VaultError::InvalidConfig)
    }

    pub fn gov_token(&self) -> Address {
        self.gov_token.get_or_revert_with(VaultError::InvalidConfig)
    }

    pub fn collateral_token(&self) -> Address {
        self.collateral_token.get_or_revert_with(VaultError::InvalidConfig)
    }

    pub fn collateral_decimals(&self) -> u8 {
        self.collateral_decimals.get().unwrap_or(18)
    }

    pub fn stable_pool(&self) -> Address {
        self.stable_pool.get_or_revert_with(VaultError::InvalidConfig)
    }

    pub fn gov_pool(&self) -> Address {
        self.gov_pool.get_or_revert_with(VaultError::InvalidConfig)
    }

    pub fn owner(&self) -> Option<Address> {
        self.ownership.owner()
    }

    /// Collateral held by the vault (native units)
    pub fn collateral_balance(&self) -> U256 {
        Cep18TokenContractRef::new(self.env(), self.collateral_token())
            .balance_of(self.env().self_address())
    }

    /// Collateral (native units) that would lift the vault to the target ratio
    pub fn collateral_shortfall(&self) -> U256 {
        let shortfall = self.shortfall_wad();
        self.ok_or_revert(from_wad(shortfall, self.collateral_decimals()))
    }

    // ========== Internal Functions ==========

    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::ReentrantCall);
        }
        self.locked.set(true);
    }

    fn unlock(&mut self) {
        self.locked.set(false);
    }

    fn ok_or_revert<T>(&self, result: VaultResult<T>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }

    fn stable(&self) -> VaultTokenContractRef {
        VaultTokenContractRef::new(self.env(), self.stable_token())
    }

    fn gov(&self) -> VaultTokenContractRef {
        VaultTokenContractRef::new(self.env(), self.gov_token())
    }

    fn read_pool(&self, pool: Address) -> PoolReserves {
        let source = ReserveSourceContractRef::new(self.env(), pool);
        let (reserve0, reserve1, _) = source.get_reserves();
        let (decimals0, decimals1) = source.token_decimals();
        PoolReserves {
            token0: source.token0(),
            token1: source.token1(),
            reserve0,
            reserve1,
            decimals0,
            decimals1,
        }
    }

    /// Whether `pool` holds exactly `token` and `collateral`, in either order
    fn pool_pairs(&self, pool: Address, token: Address, collateral: Address) -> bool {
        let source = ReserveSourceContractRef::new(self.env(), pool);
        let (token0, token1) = (source.token0(), source.token1());
        (token0 == token && token1 == collateral) || (token0 == collateral && token1 == token)
    }

    /// Stable per collateral, read from the stable pool alone
    fn collateral_price(&self) -> U256 {
        let stable_pool = self.read_pool(self.stable_pool());
        self.ok_or_revert(token_price(&stable_pool, &self.collateral_token()))
    }

    fn prices(&self) -> PriceSnapshot {
        let gov_pool = self.read_pool(self.gov_pool());
        PriceSnapshot {
            collateral_price: self.collateral_price(),
            gov_price: self.ok_or_revert(token_price(&gov_pool, &self.gov_token())),
        }
    }

    fn shortfall_wad(&self) -> U256 {
        let supply = self.stable().total_supply();
        if supply.is_zero() {
            return U256::zero();
        }
        let held_wad = self.ok_or_revert(to_wad(self.collateral_balance(), self.collateral_decimals()));
        self.ok_or_revert(collateral_shortfall(
            supply,
            held_wad,
            self.collateral_price(),
            self.target_collateral_ratio(),
        ))
    }

    fn pull_collateral(&self, from: Address, amount: U256) {
        let vault = self.env().self_address();
        let mut collateral = Cep18TokenContractRef::new(self.env(), self.collateral_token());
        if !collateral.transfer_from(from, vault, amount) {
            self.env().revert(VaultError::CollateralTransferFailed);
        }
    }

    fn push_collateral(&self, to: Address, amount: U256) {
        let mut collateral = Cep18TokenContractRef::new(self.env(), self.collateral_token());
        if !collateral.transfer(to, amount) {
            self.env().revert(VaultError::CollateralTransferFailed);
        }
    }

    fn emit_ratio_change(&self, previous: u32, current: u32) {
        if previous != current {
            self.env().emit_event(CollateralRatioUpdated { previous, current });
        }
    }
}
