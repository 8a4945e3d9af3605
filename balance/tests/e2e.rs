//! End-to-end tests for the VELA value primitive.
//!
//! These tests exercise the crate exactly the way a downstream coin layer
//! would: local asset tags with private-field witnesses, supplies
//! originated through the public API, and every minted unit either
//! redeemed or explicitly destroyed by the end of the test. No test
//! reaches for the test-support module -- if the public surface can't
//! express a scenario, that's a finding.

use proptest::prelude::*;

use vela_balance::balance::Balance;
use vela_balance::supply::Supply;
use vela_balance::system::EpochCap;
use vela_balance::Asset;

// ---------------------------------------------------------------------------
// Test Assets
// ---------------------------------------------------------------------------

/// Stand-in for the ledger's native coin. The private field keeps witness
/// minting local to this module, same as a production tag.
struct Vela(());

impl Asset for Vela {}

/// A second, unrelated asset. Its balances and supply are a different
/// type from [`Vela`]'s; the compiler keeps them apart.
struct Stable(());

impl Asset for Stable {}

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Folds a collection of balances into one.
fn join_all<T: Asset>(parts: Vec<Balance<T>>) -> Balance<T> {
    let mut total = Balance::zero();
    for part in parts {
        total.join(part).expect("join overflow in test fixture");
    }
    total
}

// ---------------------------------------------------------------------------
// 1. Full Issuance Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_issuance_lifecycle() {
    let mut supply = Supply::create(Vela(()));
    assert_eq!(supply.value(), 0);

    // Mint 1000 units.
    let mut pool = supply.increase(1000).unwrap();
    assert_eq!(supply.value(), 1000);
    assert_eq!(pool.value(), 1000);

    // Carve the pool into three holdings.
    let b1 = pool.split(333).unwrap();
    let b2 = pool.split(333).unwrap();
    let b3 = pool.split(334).unwrap();
    assert_eq!(pool.value(), 0);

    // The drained pool can now be discarded.
    pool.destroy_zero().unwrap();

    // Supply is unchanged by splitting: value moved, none was created.
    assert_eq!(supply.value(), 1000);

    // Merge the holdings back and redeem everything.
    let merged = join_all(vec![b1, b2, b3]);
    assert_eq!(merged.value(), 1000);

    let redeemed = supply.decrease(merged).unwrap();
    assert_eq!(redeemed, 1000);
    assert_eq!(supply.value(), 0);
}

// ---------------------------------------------------------------------------
// 2. Conservation Under Interleaved Operations
// ---------------------------------------------------------------------------

#[test]
fn conservation_across_interleaved_mint_and_redeem() {
    let mut supply = Supply::create(Vela(()));
    let mut holdings: Vec<Balance<Vela>> = Vec::new();

    for round in 1..=20u64 {
        // Mint a little.
        holdings.push(supply.increase(round * 7).unwrap());

        // Occasionally shuffle value between holdings.
        if round % 3 == 0 {
            let mut donor = holdings.pop().unwrap();
            let slice = donor.split(donor.value() / 2).unwrap();
            holdings.push(donor);
            holdings.push(slice);
        }

        // Occasionally redeem one holding.
        if round % 4 == 0 {
            let holding = holdings.swap_remove(0);
            supply.decrease(holding).unwrap();
        }

        let outstanding: u64 = holdings.iter().map(Balance::value).sum();
        assert_eq!(
            outstanding,
            supply.value(),
            "conservation violated at round {round}"
        );
    }

    let rest = join_all(holdings);
    supply.decrease(rest).unwrap();
    assert_eq!(supply.value(), 0);
}

// ---------------------------------------------------------------------------
// 3. Independent Assets
// ---------------------------------------------------------------------------

#[test]
fn supplies_of_different_assets_are_independent() {
    let mut vela = Supply::create(Vela(()));
    let mut stable = Supply::create(Stable(()));

    let v = vela.increase(500).unwrap();
    let s = stable.increase(9000).unwrap();

    assert_eq!(vela.value(), 500);
    assert_eq!(stable.value(), 9000);

    vela.decrease(v).unwrap();
    assert_eq!(vela.value(), 0);
    assert_eq!(stable.value(), 9000);

    stable.decrease(s).unwrap();
}

// ---------------------------------------------------------------------------
// 4. Failure Paths Lose Nothing
// ---------------------------------------------------------------------------

#[test]
fn rejected_redemption_keeps_books_intact() {
    let mut supply = Supply::create(Vela(()));
    let cap = EpochCap::acquire(Vela(()));

    // Ordinary issuance alone can never produce a holding larger than
    // its supply -- that's the conservation invariant. Staking rewards
    // can, because they mint outside the counter.
    let mut pool = supply.increase(100).unwrap();
    let rewards = cap.create_staking_rewards(50);
    pool.join(rewards).unwrap();
    assert_eq!(pool.value(), 150);
    assert_eq!(supply.value(), 100);

    // Redeeming the whole pool must bounce: 150 > 100.
    let rejected = supply.decrease(pool).unwrap_err();
    let (reason, mut refund) = rejected.into_parts();
    assert_eq!(reason.abort_code(), 1);
    assert_eq!(refund.value(), 150);
    assert_eq!(supply.value(), 100);

    // Send the reward portion out the rebate path, redeem the rest.
    let reward_part = refund.split(50).unwrap();
    cap.destroy_storage_rebates(reward_part);
    supply.decrease(refund).unwrap();
    assert_eq!(supply.value(), 0);
}

// ---------------------------------------------------------------------------
// 5. Epoch-Transition Paths
// ---------------------------------------------------------------------------

#[test]
fn epoch_paths_bypass_supply_by_design() {
    let mut supply = Supply::create(Vela(()));
    let cap = EpochCap::acquire(Vela(()));

    let mut circulating = supply.increase(10_000).unwrap();
    assert_eq!(supply.value(), 10_000);

    // Epoch boundary: rewards come in from outside the supply...
    let rewards = cap.create_staking_rewards(500);
    circulating.join(rewards).unwrap();
    assert_eq!(circulating.value(), 10_500);
    assert_eq!(supply.value(), 10_000);

    // ...and rebates go out the same way.
    let rebates = circulating.split(500).unwrap();
    cap.destroy_storage_rebates(rebates);
    assert_eq!(circulating.value(), 10_000);
    assert_eq!(supply.value(), 10_000);

    // With the bypass flows netted out, normal redemption still balances.
    supply.decrease(circulating).unwrap();
    assert_eq!(supply.value(), 0);
}

// ---------------------------------------------------------------------------
// 6. Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Splitting any amount out and joining it back is a no-op.
    #[test]
    fn split_join_inverse(value in 0u64..=1_000_000, cut in 0u64..=1_000_000) {
        prop_assume!(cut <= value);

        let mut supply = Supply::create(Vela(()));
        let mut balance = supply.increase(value).unwrap();

        let part = balance.split(cut).unwrap();
        prop_assert_eq!(part.value(), cut);
        balance.join(part).unwrap();
        prop_assert_eq!(balance.value(), value);

        supply.decrease(balance).unwrap();
    }

    /// Outstanding value equals the supply counter after any sequence of
    /// mint / redeem / split / join operations.
    #[test]
    fn conservation_holds_for_random_op_sequences(
        ops in proptest::collection::vec((0u8..4, 1u64..1000), 1..64)
    ) {
        let mut supply = Supply::create(Vela(()));
        let mut holdings: Vec<Balance<Vela>> = Vec::new();

        for (op, amount) in ops {
            match op {
                0 => holdings.push(supply.increase(amount).unwrap()),
                1 => {
                    if let Some(holding) = holdings.pop() {
                        supply.decrease(holding).unwrap();
                    }
                }
                2 => {
                    if let Some(mut holding) = holdings.pop() {
                        let cut = amount.min(holding.value());
                        let part = holding.split(cut).unwrap();
                        holdings.push(holding);
                        holdings.push(part);
                    }
                }
                _ => {
                    if holdings.len() >= 2 {
                        let a = holdings.pop().unwrap();
                        let mut b = holdings.pop().unwrap();
                        b.join(a).unwrap();
                        holdings.push(b);
                    }
                }
            }

            let outstanding: u64 = holdings.iter().map(Balance::value).sum();
            prop_assert_eq!(outstanding, supply.value());
        }

        let rest = join_all(holdings);
        supply.decrease(rest).unwrap();
        prop_assert_eq!(supply.value(), 0);
    }
}
