//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!
//! Optional:
//!   SIM_COLLATERAL_DECIMALS=18
//!   SIM_GOV_INITIAL_SUPPLY=1000000   (whole tokens)

use odra::casper_types::U256;
use odra::host::{Deployer, HostRef, NoArgs};
use odra::prelude::*;

use sim_vault_contracts::collateral_token::{CollateralToken, CollateralTokenInitArgs};
use sim_vault_contracts::governance_token::{SimGov, SimGovInitArgs};
use sim_vault_contracts::reserve_pool::{ReservePool, ReservePoolInitArgs};
use sim_vault_contracts::stablecoin::SimStable;
use sim_vault_contracts::types::{RatioConfig, TOKEN_DECIMALS};
use sim_vault_contracts::vault::{CentralVault, CentralVaultInitArgs};

/// Whole tokens seeded into each side of both reserve pools
const SEED_RESERVE_TOKENS: u64 = 1_000_000;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== SimVault Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = env_or("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT", 200_000_000_000);
    env.set_gas(payment_amount);

    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // Deployment parameters
    let collateral_decimals: u8 = env_or("SIM_COLLATERAL_DECIMALS", TOKEN_DECIMALS);
    let gov_initial_supply: u64 = env_or("SIM_GOV_INITIAL_SUPPLY", 1_000_000);
    let gov_unit = U256::exp10(TOKEN_DECIMALS as usize);
    let collateral_unit = U256::exp10(collateral_decimals as usize);
    let config = RatioConfig::default();

    // ==================== Phase 1: Tokens ====================
    println!("=== Phase 1: Deploying Tokens ===");
    println!();

    println!("Deploying SimStable...");
    let mut stable = SimStable::deploy(&env, NoArgs);
    let stable_addr = stable.address().clone();
    println!("SimStable deployed at: {:?}", stable_addr);

    println!("Deploying SimGov (initial supply {} SGOV)...", gov_initial_supply);
    let mut gov = SimGov::deploy(
        &env,
        SimGovInitArgs {
            initial_supply: U256::from(gov_initial_supply) * gov_unit,
        },
    );
    let gov_addr = gov.address().clone();
    println!("SimGov deployed at: {:?}", gov_addr);

    println!("Deploying CollateralToken ({} decimals)...", collateral_decimals);
    let collateral = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Sim Collateral"),
            symbol: String::from("SCOL"),
            decimals: collateral_decimals,
        },
    );
    let collateral_addr = collateral.address().clone();
    println!("CollateralToken deployed at: {:?}", collateral_addr);

    println!();

    // ==================== Phase 2: Reserve Pools ====================
    println!("=== Phase 2: Deploying Reserve Pools ===");
    println!();

    println!("Deploying stable/collateral ReservePool...");
    let mut stable_pool = ReservePool::deploy(
        &env,
        ReservePoolInitArgs {
            token0: stable_addr,
            token1: collateral_addr,
            decimals0: TOKEN_DECIMALS,
            decimals1: collateral_decimals,
        },
    );
    let stable_pool_addr = stable_pool.address().clone();
    println!("Stable pool deployed at: {:?}", stable_pool_addr);

    println!("Deploying collateral/gov ReservePool...");
    let mut gov_pool = ReservePool::deploy(
        &env,
        ReservePoolInitArgs {
            token0: collateral_addr,
            token1: gov_addr,
            decimals0: collateral_decimals,
            decimals1: TOKEN_DECIMALS,
        },
    );
    let gov_pool_addr = gov_pool.address().clone();
    println!("Gov pool deployed at: {:?}", gov_pool_addr);

    // Seed both pools at 1:1 until the keeper publishes market reserves
    println!("Seeding pool reserves at 1:1...");
    let seed = U256::from(SEED_RESERVE_TOKENS);
    stable_pool.set_reserves(seed * gov_unit, seed * collateral_unit);
    gov_pool.set_reserves(seed * collateral_unit, seed * gov_unit);
    println!("Done.");

    println!();

    // ==================== Phase 3: Vault ====================
    println!("=== Phase 3: Deploying CentralVault ===");
    println!();

    println!("Deploying CentralVault...");
    let vault = CentralVault::deploy(
        &env,
        CentralVaultInitArgs {
            stable_token: stable_addr,
            gov_token: gov_addr,
            collateral_token: collateral_addr,
            stable_pool: stable_pool_addr,
            gov_pool: gov_pool_addr,
            config: config.clone(),
        },
    );
    let vault_addr = vault.address().clone();
    println!("CentralVault deployed at: {:?}", vault_addr);

    println!();

    // ==================== Phase 4: Vault Bindings ====================
    println!("=== Phase 4: Binding Vault ===");
    println!();

    println!("Setting vault on SimStable...");
    stable.set_vault(vault_addr);
    println!("Done.");

    println!("Setting vault on SimGov...");
    gov.set_vault(vault_addr);
    println!("Done.");

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  SimStable:        {:?}", stable_addr);
    println!("  SimGov:           {:?}", gov_addr);
    println!("  CollateralToken:  {:?}", collateral_addr);
    println!("  StablePool:       {:?}", stable_pool_addr);
    println!("  GovPool:          {:?}", gov_pool_addr);
    println!("  CentralVault:     {:?}", vault_addr);
    println!();
    println!(
        "Collateral ratio: {} (min {}, max {}, coefficient {})",
        config.target_collateral_ratio,
        config.min_collateral_ratio,
        config.max_collateral_ratio,
        config.adjustment_coefficient
    );
}
