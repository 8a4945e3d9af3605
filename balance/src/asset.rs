//! # Asset Tags & Witnesses
//!
//! Every [`Balance`](crate::balance::Balance) and
//! [`Supply`](crate::supply::Supply) is generic over an asset tag: a
//! zero-sized type that exists only at compile time. Two balances of
//! different tags are different types, so crossing assets -- joining a
//! stablecoin balance into the native coin, redeeming one asset against
//! another's supply -- is rejected by the compiler, not by a runtime check.
//!
//! ## The Witness Discipline
//!
//! Originating a supply is the one moment where an asset comes into
//! existence, and it must be reserved to the module that defines the
//! asset. [`Supply::create`](crate::supply::Supply::create) therefore
//! consumes a *value* of the tag type, not just the type. Declare the tag
//! with a private field and the compiler does the gating for you:
//!
//! ```
//! use vela_balance::asset::Asset;
//! use vela_balance::supply::Supply;
//!
//! /// The native VELA coin. The `(())` field is private, so witness
//! /// values can only be produced inside this module.
//! pub struct Vela(());
//!
//! impl Asset for Vela {}
//!
//! // Inside the defining module: mint the one witness, originate supply.
//! let supply = Supply::create(Vela(()));
//! assert_eq!(supply.value(), 0);
//! ```
//!
//! Code outside the defining module can name the type `Vela` but can
//! never construct `Vela(())`, so it can never call `Supply::create` for
//! it. Handing out the witness more than once is the defining module's
//! bug to not write -- the same contract the rest of the ledger holds it
//! to for its coin metadata.

/// Marker trait for asset type tags.
///
/// Implement this on a zero-sized tag type to make it usable with
/// [`Balance`](crate::balance::Balance) and
/// [`Supply`](crate::supply::Supply). The `'static` bound keeps tags
/// nameable in logs and error contexts; tags carry no data, so it costs
/// nothing.
pub trait Asset: 'static {}

/// The tag's bare type name, without its module path. Used in `Debug`
/// output, log events, and drop-guard panic messages.
pub(crate) fn short_name<T: 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
