//! # Epoch-Transition Escape Hatch
//!
//! Once per epoch, the system module mints staking rewards and burns
//! storage rebates for the ledger's native coin. Neither movement goes
//! through the coin's [`Supply`](crate::supply::Supply): rewards are
//! accounted for in the epoch ledger's own macro-economic books, and
//! rebates were already counted when the storage deposits were taken.
//! These two operations therefore break supply conservation *locally*,
//! on purpose, and must be unreachable from general code.
//!
//! ## Security Model
//!
//! - **No runtime authority.** There is no signature to verify and no
//!   caller identity to inspect here; the gate is the type system.
//! - **Capability, not convention.** Both operations hang off an
//!   [`EpochCap`], which can only be acquired by consuming a witness
//!   value of the asset. Only the module defining the native coin's tag
//!   can produce that witness, and that module *is* the system module.
//!   A balance holder cannot reach these paths no matter what it does.
//! - **Audited.** Both paths emit `info!` events; they fire once per
//!   epoch and belong in the log.

use std::fmt;
use std::marker::PhantomData;

use tracing::info;

use crate::asset::{self, Asset};
use crate::balance::Balance;

// ---------------------------------------------------------------------------
// EpochCap
// ---------------------------------------------------------------------------

/// Unforgeable capability over the privileged issuance paths of asset `T`.
///
/// Acquired by consuming a witness value of `T`, so possession proves the
/// holder is (or was handed the cap by) the module that defines the
/// asset. Not `Clone`: the epoch-advance procedure holds the one cap for
/// the native coin for the lifetime of the ledger.
///
/// ```compile_fail
/// use std::marker::PhantomData;
/// use vela_balance::{asset::Asset, system::EpochCap};
///
/// struct Demo(());
/// impl Asset for Demo {}
///
/// // The field is private: a cap cannot be assembled by hand.
/// let cap: EpochCap<Demo> = EpochCap { _asset: PhantomData };
/// ```
pub struct EpochCap<T: Asset> {
    _asset: PhantomData<T>,
}

impl<T: Asset> EpochCap<T> {
    /// Acquires the capability by consuming the asset's witness.
    pub fn acquire(_witness: T) -> Self {
        info!(asset = asset::short_name::<T>(), "epoch capability acquired");
        Self {
            _asset: PhantomData,
        }
    }

    /// Manufactures a balance of `amount` staking rewards **without**
    /// touching the asset's supply. Never fails.
    ///
    /// The issuance is tracked by the epoch ledger's macro-economic
    /// accounting, which is what restores global conservation.
    pub fn create_staking_rewards(&self, amount: u64) -> Balance<T> {
        info!(
            asset = asset::short_name::<T>(),
            amount, "minted staking rewards outside supply"
        );
        Balance::from_raw(amount)
    }

    /// Burns a balance of storage rebates **without** touching the
    /// asset's supply. Never fails.
    pub fn destroy_storage_rebates(&self, balance: Balance<T>) {
        let amount = balance.into_raw();
        info!(
            asset = asset::short_name::<T>(),
            amount, "burned storage rebates outside supply"
        );
    }
}

impl<T: Asset> fmt::Debug for EpochCap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EpochCap<{}>", asset::short_name::<T>())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
