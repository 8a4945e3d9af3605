//! # Issuance Counter
//!
//! A [`Supply`] is the single source of truth for how many units of an
//! asset exist. Minting goes through [`Supply::increase`], which hands
//! out a fresh [`Balance`] and bumps the counter in the same breath;
//! redemption goes through [`Supply::decrease`], which consumes a balance
//! and lowers the counter by exactly what it held. There is no third
//! path, so outside the epoch-transition escape hatch the counter and
//! the sum of outstanding balances cannot disagree.
//!
//! A supply is originated once per asset by consuming that asset's
//! witness (see [`crate::asset`]) and is then typically owned for the
//! asset's entire lifetime by the coin layer's capability object. Like a
//! balance, it cannot be cloned, and dropping it with outstanding
//! issuance panics.

use std::fmt;
use std::marker::PhantomData;
use std::thread;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::asset::{self, Asset};
use crate::balance::{Balance, BalanceError, Rejected};

// ---------------------------------------------------------------------------
// Supply
// ---------------------------------------------------------------------------

/// Total units of asset `T` ever issued and not yet redeemed.
///
/// The counter starts at zero and moves only through [`increase`] and
/// [`decrease`]. It can never go negative (redemption is bounded by the
/// counter) and never exceeds `u64::MAX` (issuance keeps strict headroom
/// below the limit).
///
/// [`increase`]: Supply::increase
/// [`decrease`]: Supply::decrease
pub struct Supply<T: Asset> {
    value: u64,
    _asset: PhantomData<T>,
}

impl<T: Asset> Supply<T> {
    pub(crate) fn from_raw(value: u64) -> Self {
        Self {
            value,
            _asset: PhantomData,
        }
    }

    pub(crate) fn into_raw(mut self) -> u64 {
        std::mem::replace(&mut self.value, 0)
    }

    /// Originates the supply for asset `T`, consuming the asset's
    /// witness value.
    ///
    /// Only the module that defines `T` can construct the witness, so
    /// only it can call this -- once, if it honors the single-use
    /// contract on its own witness. The returned supply starts at zero.
    pub fn create(_witness: T) -> Self {
        debug!(asset = asset::short_name::<T>(), "supply originated");
        Self::from_raw(0)
    }

    /// The current total issuance.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Mints `amount` new units, returning them as a fresh [`Balance`].
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] unless `amount` is strictly
    /// below the remaining headroom (`u64::MAX - value`). The check is
    /// deliberately conservative by one unit; the ceiling is part of the
    /// protocol surface. The supply is unchanged on error.
    pub fn increase(&mut self, amount: u64) -> Result<Balance<T>, BalanceError> {
        if amount >= u64::MAX - self.value {
            return Err(BalanceError::Overflow {
                current: self.value,
                requested: amount,
            });
        }
        self.value += amount;
        debug!(
            asset = asset::short_name::<T>(),
            amount,
            total = self.value,
            "supply increased"
        );
        Ok(Balance::from_raw(amount))
    }

    /// Redeems `balance` against this supply, consuming it, and returns
    /// the redeemed amount.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] (inside a [`Rejected`]) if the
    /// balance holds more than the current supply -- semantically an
    /// underflow, but it keeps the overflow code because downstream
    /// collaborators match on the numeric value. The balance rides back
    /// in the error and the supply is unchanged.
    pub fn decrease(&mut self, balance: Balance<T>) -> Result<u64, Rejected<T>> {
        let amount = balance.value();
        if self.value < amount {
            return Err(Rejected::new(
                BalanceError::Overflow {
                    current: self.value,
                    requested: amount,
                },
                balance,
            ));
        }
        balance.into_raw();
        self.value -= amount;
        debug!(
            asset = asset::short_name::<T>(),
            amount,
            total = self.value,
            "supply decreased"
        );
        Ok(amount)
    }
}

impl<T: Asset> fmt::Debug for Supply<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supply<{}>({})", asset::short_name::<T>(), self.value)
    }
}

/// Serializes as the bare counter value, mirroring [`Balance`]'s
/// serialized form. No `Deserialize` -- rehydration is origination and
/// belongs to the witness path or the test-support module.
impl<T: Asset> Serialize for Supply<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.value)
    }
}

impl<T: Asset> Drop for Supply<T> {
    fn drop(&mut self) {
        if self.value != 0 && !thread::panicking() {
            panic!(
                "dropped the supply of {} with {} units still outstanding; \
                 redeem all balances first or dissolve it via the \
                 test-support module",
                asset::short_name::<T>(),
                self.value,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
