//! SimVault Integration Tests
//!
//! End-to-end vault scenarios on the Odra test VM.

#[cfg(test)]
mod fixture {
    use odra::casper_types::U256;
    use odra::host::{Deployer, HostEnv, HostRef, NoArgs};
    use odra::prelude::*;
    use sim_vault_contracts::collateral_token::{
        CollateralToken, CollateralTokenHostRef, CollateralTokenInitArgs,
    };
    use sim_vault_contracts::governance_token::{SimGov, SimGovHostRef, SimGovInitArgs};
    use sim_vault_contracts::reserve_pool::{ReservePool, ReservePoolHostRef, ReservePoolInitArgs};
    use sim_vault_contracts::stablecoin::{SimStable, SimStableHostRef};
    use sim_vault_contracts::types::RatioConfig;
    use sim_vault_contracts::vault::{CentralVault, CentralVaultHostRef, CentralVaultInitArgs};

    /// Deployed protocol with a funded user
    pub struct Protocol {
        pub env: HostEnv,
        pub admin: Address,
        pub alice: Address,
        pub bob: Address,
        pub collateral_decimals: u8,
        pub stable: SimStableHostRef,
        pub gov: SimGovHostRef,
        pub collateral: CollateralTokenHostRef,
        pub stable_pool: ReservePoolHostRef,
        pub gov_pool: ReservePoolHostRef,
        pub vault: CentralVaultHostRef,
    }

    pub fn tokens(amount: u64) -> U256 {
        U256::from(amount) * U256::exp10(18)
    }

    pub fn units(amount: u64, decimals: u8) -> U256 {
        U256::from(amount) * U256::exp10(decimals as usize)
    }

    impl Protocol {
        /// Collateral amount in native units
        pub fn coll(&self, amount: u64) -> U256 {
            units(amount, self.collateral_decimals)
        }

        /// Set stable pool reserves in whole tokens (stable, collateral)
        pub fn set_stable_reserves(&mut self, stable: u64, collateral: u64) {
            let collateral = self.coll(collateral);
            self.env.set_caller(self.admin);
            self.stable_pool.set_reserves(tokens(stable), collateral);
        }

        /// Set gov pool reserves in whole tokens (collateral, gov)
        pub fn set_gov_reserves(&mut self, collateral: u64, gov: u64) {
            let collateral = self.coll(collateral);
            self.env.set_caller(self.admin);
            self.gov_pool.set_reserves(collateral, tokens(gov));
        }

        /// Approve and mint as `account`
        pub fn mint(&mut self, account: Address, collateral: U256, gov: U256) -> U256 {
            self.env.set_caller(account);
            self.collateral.approve(self.vault.address().clone(), collateral);
            self.vault.mint_stable(collateral, gov)
        }

        pub fn set_ratio(&mut self, ratio: u32) {
            self.env.set_caller(self.admin);
            self.vault.set_collateral_ratio(ratio);
        }
    }

    /// Tokens, pools at stable = collateral = 1 and gov = 2 collateral, vault
    /// bound on both tokens. Alice holds 10 000 collateral and 1 000 gov.
    pub fn setup(collateral_decimals: u8) -> Protocol {
        let env = odra_test::env();
        let admin = env.get_account(0);
        let alice = env.get_account(1);
        let bob = env.get_account(2);
        env.set_caller(admin);

        let mut stable = SimStable::deploy(&env, NoArgs);
        let mut gov = SimGov::deploy(
            &env,
            SimGovInitArgs {
                initial_supply: tokens(1_000_000),
            },
        );
        let mut collateral = CollateralToken::deploy(
            &env,
            CollateralTokenInitArgs {
                name: String::from("Collateral"),
                symbol: String::from("COLL"),
                decimals: collateral_decimals,
            },
        );

        let stable_pool = ReservePool::deploy(
            &env,
            ReservePoolInitArgs {
                token0: stable.address().clone(),
                token1: collateral.address().clone(),
                decimals0: 18,
                decimals1: collateral_decimals,
            },
        );
        let gov_pool = ReservePool::deploy(
            &env,
            ReservePoolInitArgs {
                token0: collateral.address().clone(),
                token1: gov.address().clone(),
                decimals0: collateral_decimals,
                decimals1: 18,
            },
        );

        let vault = CentralVault::deploy(
            &env,
            CentralVaultInitArgs {
                stable_token: stable.address().clone(),
                gov_token: gov.address().clone(),
                collateral_token: collateral.address().clone(),
                stable_pool: stable_pool.address().clone(),
                gov_pool: gov_pool.address().clone(),
                config: RatioConfig::default(),
            },
        );
        stable.set_vault(vault.address().clone());
        gov.set_vault(vault.address().clone());

        collateral.mint(alice, units(10_000, collateral_decimals));
        gov.transfer(alice, tokens(1_000));

        let mut protocol = Protocol {
            env,
            admin,
            alice,
            bob,
            collateral_decimals,
            stable,
            gov,
            collateral,
            stable_pool,
            gov_pool,
            vault,
        };
        protocol.set_stable_reserves(1_000_000, 1_000_000);
        protocol.set_gov_reserves(2_000_000, 1_000_000);
        protocol
    }
}

#[cfg(test)]
mod price_tests {
    use super::fixture::*;
    use odra::casper_types::U256;
    use odra::host::{Deployer, HostRef};
    use odra::prelude::Addressable;
    use pretty_assertions::assert_eq;
    use sim_vault_contracts::errors::VaultError;
    use sim_vault_contracts::events::PricesUpdated;
    use sim_vault_contracts::reserve_pool::{ReservePool, ReservePoolInitArgs};

    #[test]
    fn test_token_price_when_token0_matches() {
        let p = setup(18);
        let mut pair = ReservePool::deploy(
            &p.env,
            ReservePoolInitArgs {
                token0: p.stable.address().clone(),
                token1: p.collateral.address().clone(),
                decimals0: 18,
                decimals1: 18,
            },
        );
        pair.set_reserves(U256::from(1_000u64), U256::from(2_000u64));

        let price = p.vault.get_token_price(pair.address().clone(), p.stable.address().clone());
        assert_eq!(price, tokens(2));
    }

    #[test]
    fn test_token_price_when_token1_matches() {
        let p = setup(18);
        let mut pair = ReservePool::deploy(
            &p.env,
            ReservePoolInitArgs {
                token0: p.collateral.address().clone(),
                token1: p.gov.address().clone(),
                decimals0: 18,
                decimals1: 18,
            },
        );
        pair.set_reserves(U256::from(1_500u64), U256::from(750u64));

        let price = p.vault.get_token_price(pair.address().clone(), p.gov.address().clone());
        assert_eq!(price, tokens(2));
    }

    #[test]
    fn test_token_not_in_pair() {
        let p = setup(18);
        assert_eq!(
            p.vault.try_get_token_price(p.stable_pool.address().clone(), p.alice),
            Err(VaultError::InvalidToken.into())
        );
    }

    #[test]
    fn test_update_prices_emits_event() {
        let mut p = setup(18);
        p.set_stable_reserves(1_000, 2_000);
        p.set_gov_reserves(1_500, 750);

        let (stable_price, gov_price) = p.vault.update_prices();
        assert_eq!(stable_price, tokens(2));
        assert_eq!(gov_price, tokens(2));
        assert!(p.env.emitted_event(
            &p.vault,
            PricesUpdated {
                stable_price: tokens(2),
                gov_price: tokens(2),
            }
        ));

        let (last_stable, last_gov, timestamp) = p.vault.last_prices();
        assert_eq!((last_stable, last_gov), (tokens(2), tokens(2)));
        assert_eq!(timestamp, p.env.block_time());
    }

    #[test]
    fn test_six_decimal_collateral_prices_like_eighteen() {
        let p18 = setup(18);
        let p6 = setup(6);
        for p in [&p18, &p6] {
            assert_eq!(
                p.vault.get_token_price(p.stable_pool.address().clone(), p.stable.address().clone()),
                tokens(1)
            );
            assert_eq!(
                p.vault.get_token_price(p.gov_pool.address().clone(), p.gov.address().clone()),
                tokens(2)
            );
        }
        assert_eq!(p6.vault.collateral_decimals(), 6);
    }

    #[test]
    fn test_empty_pool_reverts() {
        let mut p = setup(18);
        p.set_stable_reserves(0, 0);
        assert_eq!(
            p.vault.try_get_token_price(p.stable_pool.address().clone(), p.stable.address().clone()),
            Err(VaultError::ZeroReserves.into())
        );
    }
}

#[cfg(test)]
mod vault_tests {
    use super::fixture::*;
    use odra::casper_types::U256;
    use odra::host::{Deployer, HostRef};
    use odra::prelude::Addressable;
    use pretty_assertions::assert_eq;
    use sim_vault_contracts::errors::VaultError;
    use sim_vault_contracts::events::{
        BuybackExecuted, CollateralRatioUpdated, Minted, ReCollateralized, Redeemed,
    };
    use sim_vault_contracts::types::RatioConfig;
    use sim_vault_contracts::vault::{CentralVault, CentralVaultInitArgs};

    #[test]
    fn test_initial_state() {
        let p = setup(18);
        assert_eq!(p.vault.collateral_ratio(), 15_000);
        assert_eq!(p.vault.target_collateral_ratio(), 15_000);
        assert_eq!(p.vault.min_collateral_ratio(), 11_000);
        assert_eq!(p.vault.max_collateral_ratio(), 20_000);
        assert_eq!(p.vault.adjustment_coefficient(), 100);
        assert_eq!(p.vault.ratio_config(), RatioConfig::default());
        assert_eq!(p.vault.owner(), Some(p.admin));
        assert_eq!(p.vault.stable_token(), p.stable.address().clone());
        assert_eq!(p.vault.gov_pool(), p.gov_pool.address().clone());
        assert_eq!(p.stable.vault(), Some(p.vault.address().clone()));
        assert_eq!(p.gov.vault(), Some(p.vault.address().clone()));
    }

    #[test]
    fn test_init_rejects_mismatched_pool() {
        let p = setup(18);
        // Gov pool passed as the stable pool
        let result = CentralVault::try_deploy(
            &p.env,
            CentralVaultInitArgs {
                stable_token: p.stable.address().clone(),
                gov_token: p.gov.address().clone(),
                collateral_token: p.collateral.address().clone(),
                stable_pool: p.gov_pool.address().clone(),
                gov_pool: p.gov_pool.address().clone(),
                config: RatioConfig::default(),
            },
        );
        assert!(result.is_err());
    }

    // ========== Mint ==========

    #[test]
    fn test_mint_rejects_zero_amounts() {
        let mut p = setup(18);
        p.env.set_caller(p.alice);
        assert_eq!(
            p.vault.try_mint_stable(U256::zero(), tokens(100)),
            Err(VaultError::InvalidCollateralAmount.into())
        );
        assert_eq!(
            p.vault.try_mint_stable(tokens(1_000), U256::zero()),
            Err(VaultError::InvalidGovAmount.into())
        );
    }

    #[test]
    fn test_mint_moves_balances() {
        let mut p = setup(18);
        let alice = p.alice;

        let minted = p.mint(alice, tokens(1_000), tokens(100));

        // (1000 + 100 * 2) / 1.5
        assert_eq!(minted, tokens(800));
        assert_eq!(p.stable.balance_of(alice), tokens(800));
        assert_eq!(p.stable.total_supply(), tokens(800));
        assert_eq!(p.gov.balance_of(alice), tokens(900));
        assert_eq!(p.collateral.balance_of(alice), tokens(9_000));
        assert_eq!(p.vault.collateral_balance(), tokens(1_000));
        assert!(p.env.emitted_event(
            &p.vault,
            Minted {
                caller: alice,
                collateral_amount: tokens(1_000),
                gov_amount: tokens(100),
                stable_amount: tokens(800),
            }
        ));
    }

    #[test]
    fn test_mint_requires_allowance() {
        let mut p = setup(18);
        p.env.set_caller(p.alice);
        assert_eq!(
            p.vault.try_mint_stable(tokens(1_000), tokens(100)),
            Err(VaultError::InsufficientAllowance.into())
        );
        assert_eq!(p.stable.total_supply(), U256::zero());
        assert_eq!(p.gov.balance_of(p.alice), tokens(1_000));
    }

    #[test]
    fn test_mint_requires_gov_balance() {
        let mut p = setup(18);
        let bob = p.bob;
        p.env.set_caller(p.admin);
        p.collateral.mint(bob, tokens(100));

        p.env.set_caller(bob);
        p.collateral.approve(p.vault.address().clone(), tokens(100));
        assert_eq!(
            p.vault.try_mint_stable(tokens(100), tokens(1)),
            Err(VaultError::InsufficientBalance.into())
        );
        assert_eq!(p.collateral.balance_of(bob), tokens(100));
    }

    // ========== Redeem ==========

    #[test]
    fn test_redeem_guards() {
        let mut p = setup(18);
        p.env.set_caller(p.alice);
        assert_eq!(
            p.vault.try_redeem_stable(U256::zero()),
            Err(VaultError::InvalidStableAmount.into())
        );
        assert_eq!(
            p.vault.try_redeem_stable(tokens(1)),
            Err(VaultError::NoStableInCirculation.into())
        );
    }

    #[test]
    fn test_mint_redeem_round_trip() {
        let mut p = setup(18);
        let alice = p.alice;
        let minted = p.mint(alice, tokens(1_000), tokens(100));

        p.env.set_caller(alice);
        let (collateral_returned, gov_minted) = p.vault.redeem_stable(minted);

        assert_eq!(collateral_returned, tokens(1_000));
        assert_eq!(gov_minted, tokens(100));
        assert_eq!(p.collateral.balance_of(alice), tokens(10_000));
        assert_eq!(p.gov.balance_of(alice), tokens(1_000));
        assert_eq!(p.stable.total_supply(), U256::zero());
        assert_eq!(p.vault.collateral_balance(), U256::zero());
        assert!(p.env.emitted_event(
            &p.vault,
            Redeemed {
                caller: alice,
                stable_amount: tokens(800),
                collateral_returned: tokens(1_000),
                gov_minted: tokens(100),
            }
        ));
    }

    #[test]
    fn test_redeem_pro_rata_when_under_backed() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));

        // Collateral drops to 0.5 stable: the vault holds 500 of 1200 backing
        p.set_stable_reserves(500_000, 1_000_000);

        p.env.set_caller(alice);
        let (collateral_returned, gov_minted) = p.vault.redeem_stable(tokens(400));

        // 600 value: 250 in collateral (500 tokens), 350 in gov (700 collateral / 2)
        assert_eq!(collateral_returned, tokens(500));
        assert_eq!(gov_minted, tokens(350));
        assert_eq!(p.stable.balance_of(alice), tokens(400));
    }

    #[test]
    fn test_redeem_more_than_balance() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));

        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_redeem_stable(tokens(801)),
            Err(VaultError::InsufficientBalance.into())
        );
    }

    // ========== Collateral Ratio ==========

    #[test]
    fn test_adjust_below_peg_raises_ratio() {
        let mut p = setup(18);
        p.set_stable_reserves(1_000_000, 800_000);

        assert_eq!(p.vault.adjust_collateral_ratio(), 15_020);
        assert_eq!(p.vault.collateral_ratio(), 15_020);
        assert!(p.env.emitted_event(
            &p.vault,
            CollateralRatioUpdated {
                previous: 15_000,
                current: 15_020,
            }
        ));
    }

    #[test]
    fn test_adjust_at_peg_is_noop() {
        let mut p = setup(18);
        let events_before = p.env.events_count(&p.vault);
        assert_eq!(p.vault.adjust_collateral_ratio(), 15_000);
        assert_eq!(p.env.events_count(&p.vault), events_before);
    }

    #[test]
    fn test_adjust_clamps_to_max() {
        let mut p = setup(18);
        p.set_ratio(19_999);
        p.set_stable_reserves(1_000_000, 500_000);

        assert_eq!(p.vault.adjust_collateral_ratio(), 20_000);
    }

    #[test]
    fn test_adjust_clamps_to_min() {
        let mut p = setup(18);
        p.set_ratio(11_050);
        p.set_stable_reserves(1_000_000, 2_000_000);

        assert_eq!(p.vault.adjust_collateral_ratio(), 11_000);
    }

    #[test]
    fn test_adjust_requires_owner_or_stable() {
        let mut p = setup(18);
        p.env.set_caller(p.alice);
        assert_eq!(
            p.vault.try_adjust_collateral_ratio(),
            Err(VaultError::Unauthorized.into())
        );
    }

    #[test]
    fn test_stable_transfer_adjusts_ratio() {
        let mut p = setup(18);
        let (alice, bob) = (p.alice, p.bob);
        p.mint(alice, tokens(1_000), tokens(100));
        p.set_stable_reserves(1_000_000, 800_000);

        p.env.set_caller(alice);
        p.stable.transfer(bob, tokens(100));

        assert_eq!(p.stable.balance_of(bob), tokens(100));
        assert_eq!(p.vault.collateral_ratio(), 15_020);

        p.stable.approve(bob, tokens(50));
        p.env.set_caller(bob);
        p.stable.transfer_from(alice, bob, tokens(50));
        assert_eq!(p.vault.collateral_ratio(), 15_040);
    }

    #[test]
    fn test_set_collateral_ratio_bounds() {
        let mut p = setup(18);
        p.env.set_caller(p.admin);
        assert_eq!(
            p.vault.try_set_collateral_ratio(20_001),
            Err(VaultError::CollateralRatioOutOfBounds.into())
        );
        assert_eq!(
            p.vault.try_set_collateral_ratio(10_999),
            Err(VaultError::CollateralRatioOutOfBounds.into())
        );

        p.env.set_caller(p.alice);
        assert_eq!(
            p.vault.try_set_collateral_ratio(16_000),
            Err(VaultError::Unauthorized.into())
        );

        p.set_ratio(16_000);
        assert_eq!(p.vault.collateral_ratio(), 16_000);
    }

    #[test]
    fn test_set_ratio_config_reclamps() {
        let mut p = setup(18);
        p.set_ratio(19_000);

        let config = RatioConfig {
            target_collateral_ratio: 14_000,
            min_collateral_ratio: 12_000,
            max_collateral_ratio: 18_000,
            adjustment_coefficient: 200,
        };
        p.vault.set_ratio_config(config.clone());
        assert_eq!(p.vault.ratio_config(), config);
        assert_eq!(p.vault.collateral_ratio(), 18_000);

        let invalid = RatioConfig {
            target_collateral_ratio: 19_000,
            ..config
        };
        assert_eq!(
            p.vault.try_set_ratio_config(invalid),
            Err(VaultError::InvalidConfig.into())
        );
    }

    // ========== Buyback ==========

    #[test]
    fn test_buyback_not_allowed_at_or_below_target() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));

        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_buyback_sim_gov(tokens(10)),
            Err(VaultError::BuybackNotAllowed.into())
        );

        p.set_ratio(12_000);
        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_buyback_sim_gov(tokens(10)),
            Err(VaultError::BuybackNotAllowed.into())
        );
    }

    #[test]
    fn test_buyback_pays_collateral() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));
        p.set_ratio(16_000);

        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_buyback_sim_gov(U256::zero()),
            Err(VaultError::InvalidGovAmount.into())
        );

        let paid = p.vault.buyback_sim_gov(tokens(10));
        assert_eq!(paid, tokens(20));
        assert_eq!(p.gov.balance_of(alice), tokens(890));
        assert_eq!(p.collateral.balance_of(alice), tokens(9_020));
        assert_eq!(p.vault.collateral_balance(), tokens(980));
        assert!(p.env.emitted_event(
            &p.vault,
            BuybackExecuted {
                caller: alice,
                gov_amount: tokens(10),
                collateral_paid: tokens(20),
            }
        ));
    }

    #[test]
    fn test_buyback_cannot_drain_past_balance() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));
        p.set_ratio(16_000);

        // 600 gov is worth 1200 collateral, the vault holds 1000
        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_buyback_sim_gov(tokens(600)),
            Err(VaultError::InvalidBuybackAmount.into())
        );
    }

    // ========== Re-collateralize ==========

    #[test]
    fn test_re_collateralize_not_required_at_target() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));

        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_re_collateralize(tokens(10)),
            Err(VaultError::ReCollateralizationNotRequired.into())
        );

        p.set_ratio(16_000);
        p.env.set_caller(alice);
        assert_eq!(
            p.vault.try_re_collateralize(tokens(10)),
            Err(VaultError::ReCollateralizationNotRequired.into())
        );
    }

    #[test]
    fn test_re_collateralize_without_shortfall() {
        let mut p = setup(18);
        p.set_ratio(12_000);

        // No stable in circulation, so nothing is owed
        p.env.set_caller(p.alice);
        assert_eq!(p.vault.collateral_shortfall(), U256::zero());
        assert_eq!(
            p.vault.try_re_collateralize(tokens(10)),
            Err(VaultError::ReCollateralizationNotRequired.into())
        );
    }

    #[test]
    fn test_re_collateralize_fills_shortfall() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));
        p.set_ratio(12_000);

        // 800 stable at 150% needs 1200, the vault holds 1000
        assert_eq!(p.vault.collateral_shortfall(), tokens(200));

        p.env.set_caller(alice);
        p.collateral.approve(p.vault.address().clone(), tokens(201));
        assert_eq!(
            p.vault.try_re_collateralize(U256::zero()),
            Err(VaultError::InvalidCollateralAmount.into())
        );
        assert_eq!(
            p.vault.try_re_collateralize(tokens(201)),
            Err(VaultError::CollateralExceedsShortfall.into())
        );

        let gov_minted = p.vault.re_collateralize(tokens(150));
        assert_eq!(gov_minted, tokens(150));
        assert_eq!(p.gov.balance_of(alice), tokens(1_050));
        assert_eq!(p.vault.collateral_balance(), tokens(1_150));
        assert_eq!(p.vault.collateral_shortfall(), tokens(50));
        assert!(p.env.emitted_event(
            &p.vault,
            ReCollateralized {
                caller: alice,
                collateral_amount: tokens(150),
                gov_minted: tokens(150),
            }
        ));
    }

    #[test]
    fn test_re_collateralize_ignores_empty_gov_pool() {
        let mut p = setup(18);
        let alice = p.alice;
        p.mint(alice, tokens(1_000), tokens(100));
        p.set_ratio(12_000);
        p.set_gov_reserves(0, 0);

        assert_eq!(p.vault.collateral_shortfall(), tokens(200));

        p.env.set_caller(alice);
        p.collateral.approve(p.vault.address().clone(), tokens(200));
        assert_eq!(p.vault.re_collateralize(tokens(200)), tokens(200));
        assert_eq!(p.vault.collateral_shortfall(), U256::zero());
    }

    // ========== Six-decimal collateral ==========

    #[test]
    fn test_six_decimal_round_trip() {
        let mut p = setup(6);
        let alice = p.alice;
        let deposit = p.coll(1_000);

        let minted = p.mint(alice, deposit, tokens(100));
        assert_eq!(minted, tokens(800));
        assert_eq!(p.vault.collateral_balance(), deposit);

        p.env.set_caller(alice);
        let (collateral_returned, gov_minted) = p.vault.redeem_stable(minted);
        assert_eq!(collateral_returned, deposit);
        assert_eq!(gov_minted, tokens(100));
        assert_eq!(p.collateral.balance_of(alice), p.coll(10_000));
    }

    #[test]
    fn test_six_decimal_re_collateralize_mints_wad_gov() {
        let mut p = setup(6);
        let alice = p.alice;
        let deposit = p.coll(1_000);
        p.mint(alice, deposit, tokens(100));
        p.set_ratio(12_000);

        assert_eq!(p.vault.collateral_shortfall(), p.coll(200));

        p.env.set_caller(alice);
        let top_up = p.coll(100);
        p.collateral.approve(p.vault.address().clone(), top_up);
        assert_eq!(p.vault.re_collateralize(top_up), tokens(100));
    }

    // ========== Vault-gated tokens ==========

    #[test]
    fn test_tokens_reject_direct_mint() {
        let mut p = setup(18);
        let alice = p.alice;
        p.env.set_caller(alice);
        assert_eq!(
            p.stable.try_mint(alice, tokens(1)),
            Err(VaultError::OnlyVault.into())
        );
        assert_eq!(
            p.gov.try_mint(alice, tokens(1)),
            Err(VaultError::OnlyVault.into())
        );

        p.env.set_caller(p.admin);
        assert_eq!(
            p.stable.try_set_vault(alice),
            Err(VaultError::VaultAlreadySet.into())
        );
    }
}

#[cfg(test)]
mod reentrancy_tests {
    use super::fixture::tokens;
    use odra::casper_types::U256;
    use odra::host::{Deployer, HostRef, NoArgs};
    use odra::prelude::*;
    use odra::ContractRef;
    use pretty_assertions::assert_eq;
    use sim_vault_contracts::errors::VaultError;
    use sim_vault_contracts::governance_token::{SimGov, SimGovInitArgs};
    use sim_vault_contracts::reserve_pool::{ReservePool, ReservePoolInitArgs};
    use sim_vault_contracts::stablecoin::SimStable;
    use sim_vault_contracts::types::RatioConfig;
    use sim_vault_contracts::vault::{CentralVault, CentralVaultContractRef, CentralVaultInitArgs};

    /// Collateral ledger that calls back into the vault from `transfer_from`
    #[odra::module]
    pub struct ReenteringCollateral {
        vault: Var<Address>,
        balances: Mapping<Address, U256>,
    }

    #[odra::module]
    impl ReenteringCollateral {
        pub fn set_vault(&mut self, vault: Address) {
            self.vault.set(vault);
        }

        pub fn mint(&mut self, account: Address, amount: U256) {
            let balance = self.balances.get_or_default(&account);
            self.balances.set(&account, balance + amount);
        }

        pub fn decimals(&self) -> u8 {
            18
        }

        pub fn balance_of(&self, account: Address) -> U256 {
            self.balances.get_or_default(&account)
        }

        pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
            let sender = self.env().caller();
            self.move_balance(sender, recipient, amount)
        }

        pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
            if let Some(vault) = self.vault.get() {
                CentralVaultContractRef::new(self.env(), vault).mint_stable(amount, amount);
            }
            self.move_balance(owner, recipient, amount)
        }
    }

    impl ReenteringCollateral {
        fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> bool {
            let from_balance = self.balances.get_or_default(&from);
            if from_balance < amount {
                self.env().revert(VaultError::InsufficientBalance);
            }
            self.balances.set(&from, from_balance - amount);
            let to_balance = self.balances.get_or_default(&to);
            self.balances.set(&to, to_balance + amount);
            true
        }
    }

    #[test]
    fn test_mint_reentry_from_collateral_fails() {
        let env = odra_test::env();
        let admin = env.get_account(0);
        let alice = env.get_account(1);
        env.set_caller(admin);

        let mut stable = SimStable::deploy(&env, NoArgs);
        let mut gov = SimGov::deploy(
            &env,
            SimGovInitArgs {
                initial_supply: tokens(1_000_000),
            },
        );
        let mut collateral = ReenteringCollateral::deploy(&env, NoArgs);

        let mut stable_pool = ReservePool::deploy(
            &env,
            ReservePoolInitArgs {
                token0: stable.address().clone(),
                token1: collateral.address().clone(),
                decimals0: 18,
                decimals1: 18,
            },
        );
        let mut gov_pool = ReservePool::deploy(
            &env,
            ReservePoolInitArgs {
                token0: collateral.address().clone(),
                token1: gov.address().clone(),
                decimals0: 18,
                decimals1: 18,
            },
        );
        stable_pool.set_reserves(tokens(1_000_000), tokens(1_000_000));
        gov_pool.set_reserves(tokens(2_000_000), tokens(1_000_000));

        let mut vault = CentralVault::deploy(
            &env,
            CentralVaultInitArgs {
                stable_token: stable.address().clone(),
                gov_token: gov.address().clone(),
                collateral_token: collateral.address().clone(),
                stable_pool: stable_pool.address().clone(),
                gov_pool: gov_pool.address().clone(),
                config: RatioConfig::default(),
            },
        );
        let vault_addr = vault.address().clone();
        stable.set_vault(vault_addr);
        gov.set_vault(vault_addr);
        collateral.set_vault(vault_addr);

        collateral.mint(alice, tokens(10_000));
        gov.transfer(alice, tokens(1_000));

        env.set_caller(alice);
        assert_eq!(
            vault.try_mint_stable(tokens(1_000), tokens(100)),
            Err(VaultError::ReentrantCall.into())
        );
        assert_eq!(stable.total_supply(), U256::zero());
        assert_eq!(stable.balance_of(alice), U256::zero());
        assert_eq!(gov.balance_of(alice), tokens(1_000));
        assert_eq!(collateral.balance_of(alice), tokens(10_000));
        assert_eq!(vault.collateral_balance(), U256::zero());

        // The reverted call leaves the lock released
        env.set_caller(admin);
        assert_eq!(vault.adjust_collateral_ratio(), 15_000);
    }
}
