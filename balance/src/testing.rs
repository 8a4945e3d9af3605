//! # Test-Support Entry Points
//!
//! Unrestricted constructors and destructors for fabricating fixtures.
//! Everything here bypasses the issuance invariants on purpose: a test
//! that wants a balance of 100 should not have to originate a supply,
//! mint, and redeem just to get one.
//!
//! This module is compiled only for this crate's own tests and for
//! downstream crates that opt in with the `test-utils` feature. It is
//! never part of a production interface.

use crate::asset::Asset;
use crate::balance::Balance;
use crate::supply::Supply;

/// Asset tag reserved for test fixtures.
///
/// Unlike a production tag, its witness is mintable by anyone holding
/// this module -- which is the point.
pub struct Spark(());

impl Asset for Spark {}

impl Spark {
    /// Produces a fresh witness value.
    pub fn witness() -> Spark {
        Spark(())
    }
}

/// Fabricates a balance of `value` out of thin air.
pub fn balance<T: Asset>(value: u64) -> Balance<T> {
    Balance::from_raw(value)
}

/// Dissolves a balance regardless of its value, returning what it held.
pub fn destroy_balance<T: Asset>(balance: Balance<T>) -> u64 {
    balance.into_raw()
}

/// Fabricates a supply with `value` already issued, sans balances.
pub fn supply<T: Asset>(value: u64) -> Supply<T> {
    Supply::from_raw(value)
}

/// Dissolves a supply regardless of outstanding issuance, returning the
/// counter value.
pub fn destroy_supply<T: Asset>(supply: Supply<T>) -> u64 {
    supply.into_raw()
}
