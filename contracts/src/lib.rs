//! SimVault Contracts
//!
//! Collateralized stablecoin vault for Casper.
//!
//! ## Architecture
//!
//! - **CentralVault**: Mint / redeem / buyback / re-collateralize state machine
//! - **RatioController**: Collateral ratio feedback against the stable peg
//! - **Pricing**: Spot prices from two-asset reserve pools
//! - **SimStable**: Vault-gated stable token; transfers trigger a ratio adjustment
//! - **SimGov**: Vault-gated governance token
//! - **CollateralToken**: CEP-18 collateral with configurable decimals
//! - **ReservePool**: Keeper-fed reserve pair used as the price source
//!
//! ## Collateral Ratio
//!
//! The ratio (1e4 scale, 15000 = 150%) moves against the stable price:
//! below the peg it rises, above the peg it falls, always clamped to the
//! configured bounds. Buybacks are open only above the target ratio and
//! re-collateralization only below it.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod pricing;
pub mod quotes;

// Shared submodules
pub mod access_control;
pub mod ledger;
pub mod controller;

// Contract modules
pub mod stablecoin;
pub mod governance_token;
pub mod collateral_token;
pub mod reserve_pool;
pub mod vault;
