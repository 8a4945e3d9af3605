//! # Linear Value
//!
//! A [`Balance`] is a quantity of one asset, and nothing else: no owner,
//! no identity, no timestamps. What makes it interesting is what it
//! *cannot* do. It cannot be copied, it cannot be cloned, and it cannot
//! be quietly dropped -- a live balance that goes out of scope panics.
//! Value enters a balance through [`Supply::increase`] (or a split off an
//! existing balance) and leaves through [`Supply::decrease`], a join into
//! another balance, or [`Balance::destroy_zero`]. Between those points the
//! `u64` inside is untouchable.
//!
//! Operations that merely mutate (`split`, `join` on the receiving side)
//! fail with a plain [`BalanceError`] and leave the balance unchanged.
//! Operations that *consume* a balance cannot un-move their argument on
//! failure, so they return a [`Rejected`] instead: the original balance
//! rides back to the caller inside the error with its value intact.
//!
//! [`Supply::increase`]: crate::supply::Supply::increase
//! [`Supply::decrease`]: crate::supply::Supply::decrease

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::thread;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::asset::Asset;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during balance and supply operations.
///
/// Every variant maps to a stable numeric abort code (see
/// [`abort_code`](BalanceError::abort_code)). The codes are matched on by
/// downstream collaborators and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Attempted to discard a balance that still holds value. The only
    /// way to get rid of value without redeeming it is
    /// [`Balance::destroy_zero`], and it only accepts exactly zero.
    #[error("cannot discard a balance holding {value} units")]
    NonZero {
        /// The value the rejected balance still holds.
        value: u64,
    },

    /// Arithmetic left the representable range. Raised when a supply
    /// increase would exceed `u64::MAX`, when a join would overflow the
    /// receiving balance, and -- for historical wire-compatibility --
    /// when a redemption exceeds the current supply.
    #[error("value out of range: current {current}, requested {requested}")]
    Overflow {
        /// The counter value before the failed operation.
        current: u64,
        /// The amount that could not be applied.
        requested: u64,
    },

    /// Attempted to split more value out of a balance than it holds.
    #[error("insufficient balance: available {available}, requested {requested}")]
    NotEnough {
        /// The value the balance holds.
        available: u64,
        /// The amount the caller asked for.
        requested: u64,
    },
}

impl BalanceError {
    /// The stable numeric abort code for this error.
    ///
    /// These values are part of the protocol surface. Enclosing execution
    /// engines and test harnesses match on them, so they are frozen:
    /// `NonZero = 0`, `Overflow = 1`, `NotEnough = 2`.
    pub const fn abort_code(&self) -> u64 {
        match self {
            BalanceError::NonZero { .. } => 0,
            BalanceError::Overflow { .. } => 1,
            BalanceError::NotEnough { .. } => 2,
        }
    }
}

/// A consuming operation refused its balance and handed it back.
///
/// `decrease`, `destroy_zero`, and the overflow arm of `join` take their
/// balance by value. When a precondition fails there is no transaction
/// engine here to roll the move back, so the balance travels back to the
/// caller inside the error. Nothing is lost on a failure path: extract it
/// with [`into_balance`](Rejected::into_balance) and carry on.
///
/// Dropping a `Rejected` without extracting a non-zero balance trips the
/// same panic as dropping the balance itself would.
#[derive(Error)]
#[error("{reason}")]
pub struct Rejected<T: Asset> {
    #[source]
    reason: BalanceError,
    balance: Balance<T>,
}

impl<T: Asset> Rejected<T> {
    pub(crate) fn new(reason: BalanceError, balance: Balance<T>) -> Self {
        Self { reason, balance }
    }

    /// Why the operation refused the balance.
    pub fn reason(&self) -> BalanceError {
        self.reason
    }

    /// The refused balance, value intact.
    pub fn balance(&self) -> &Balance<T> {
        &self.balance
    }

    /// Recovers the refused balance.
    pub fn into_balance(self) -> Balance<T> {
        self.balance
    }

    /// Splits the error into its reason and the refused balance.
    pub fn into_parts(self) -> (BalanceError, Balance<T>) {
        (self.reason, self.balance)
    }
}

impl<T: Asset> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("reason", &self.reason)
            .field("balance", &self.balance)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

/// A quantity of asset `T` currently held.
///
/// `Balance` is pure value with move-only semantics: no `Clone`, no
/// `Copy`, and a destructor that panics if a non-zero balance is dropped
/// without being consumed through a legitimate path. The sum of all
/// outstanding balances of an asset always equals that asset's
/// [`Supply`](crate::supply::Supply) counter, privileged epoch paths
/// aside.
///
/// ```compile_fail
/// use vela_balance::{asset::Asset, balance::Balance};
///
/// struct Demo(());
/// impl Asset for Demo {}
///
/// let a: Balance<Demo> = Balance::zero();
/// let b = a;         // value moves...
/// let v = a.value(); // ...so the old handle is dead: compile error
/// ```
pub struct Balance<T: Asset> {
    value: u64,
    _asset: PhantomData<T>,
}

impl<T: Asset> Balance<T> {
    /// Internal constructor. All public value creation goes through
    /// `Supply`, `split`, `zero`, or the privileged/test entry points.
    pub(crate) fn from_raw(value: u64) -> Self {
        Self {
            value,
            _asset: PhantomData,
        }
    }

    /// Consumes the balance and defuses its drop guard, yielding the raw
    /// value. Callers are accounting for the value some other way.
    pub(crate) fn into_raw(mut self) -> u64 {
        mem::replace(&mut self.value, 0)
    }

    /// A balance of zero. Useful as an accumulator seed.
    pub fn zero() -> Self {
        Self::from_raw(0)
    }

    /// The value this balance holds.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns `true` if this balance holds nothing.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Splits `amount` out of this balance into a fresh one.
    ///
    /// Splitting `0` is legal and yields a zero balance.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::NotEnough`] if `amount` exceeds the held
    /// value. The balance is unchanged on error.
    pub fn split(&mut self, amount: u64) -> Result<Balance<T>, BalanceError> {
        if self.value < amount {
            return Err(BalanceError::NotEnough {
                available: self.value,
                requested: amount,
            });
        }
        self.value -= amount;
        Ok(Balance::from_raw(amount))
    }

    /// Drains the entire value into a fresh balance, leaving zero behind.
    ///
    /// Equivalent to `split(self.value())` but never fails.
    pub fn withdraw_all(&mut self) -> Balance<T> {
        Balance::from_raw(mem::replace(&mut self.value, 0))
    }

    /// Merges `other` into this balance and returns the new total.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] (inside a [`Rejected`]) if the
    /// sum would exceed `u64::MAX`. `other` rides back in the error,
    /// untouched, and this balance is unchanged.
    pub fn join(&mut self, other: Balance<T>) -> Result<u64, Rejected<T>> {
        match self.value.checked_add(other.value) {
            Some(total) => {
                other.into_raw();
                self.value = total;
                Ok(total)
            }
            None => Err(Rejected::new(
                BalanceError::Overflow {
                    current: self.value,
                    requested: other.value,
                },
                other,
            )),
        }
    }

    /// Destroys a balance that holds exactly zero.
    ///
    /// This is the *only* way to discard a balance without merging or
    /// redeeming it.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::NonZero`] (inside a [`Rejected`]) if the
    /// balance holds value; the balance rides back in the error.
    pub fn destroy_zero(self) -> Result<(), Rejected<T>> {
        if self.value != 0 {
            let value = self.value;
            return Err(Rejected::new(BalanceError::NonZero { value }, self));
        }
        Ok(())
    }
}

impl<T: Asset> Default for Balance<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Asset> fmt::Debug for Balance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance<{}>({})", crate::asset::short_name::<T>(), self.value)
    }
}

/// Serializes as the bare held value. A balance is pure value; snapshot
/// and audit formats embed it as a number, nothing more.
///
/// There is intentionally no `Deserialize`: rehydrating a balance from
/// bytes is a mint, and mints go through `Supply` or the test-support
/// module.
impl<T: Asset> Serialize for Balance<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.value)
    }
}

impl<T: Asset> Drop for Balance<T> {
    fn drop(&mut self) {
        // Unwinding already has a panic in flight; a second one would
        // abort the process and eat the original message.
        if self.value != 0 && !thread::panicking() {
            panic!(
                "dropped a live balance of {} units of {}; balances must be \
                 joined, redeemed, or destroyed explicitly",
                self.value,
                crate::asset::short_name::<T>(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
