//! Permission policy: tier derivation, feature gates, and the update guard.
//!
//! The tier is derived exactly once, when onboarding completes. Afterwards
//! the displayed track and the tier vary independently: switching the view
//! never recomputes the tier, and no update may assign it.

pub mod access;
pub mod guard;
pub mod tier;

pub use access::{AccessPolicy, evaluate, evaluate_for};
pub use guard::{PreferencesUpdate, check_update};
pub use tier::{CredentialTier, FULL_PRACTICE_ROLES, derive_tier};
