//! Care Onboarding: account-setup wizard and workspace access policy.

pub mod catalog;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod policy;
pub mod preferences;

pub use catalog::SpecialtyCatalog;
pub use config::OnboardingConfig;
pub use error::{ConfigurationError, Error, PolicyError, Result};
pub use onboarding::{OnboardingFlow, OnboardingManager, Track};
pub use policy::{AccessPolicy, CredentialTier, PreferencesUpdate};
pub use preferences::Preferences;
