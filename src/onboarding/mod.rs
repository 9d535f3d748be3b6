//! Onboarding system: the first-launch account-setup wizard.
//!
//! The user picks a workspace track, enters a profile, and then walks a
//! track-specific branch. On the final step the draft is converted into
//! [`Preferences`](crate::preferences::Preferences), with the credential tier
//! derived exactly once.

pub mod flow;
pub mod manager;
pub mod model;
pub mod state;

pub use flow::{
    Completion, OnboardingAction, OnboardingFlow, OnboardingStatus, Outcome, Rejection,
    Requirement,
};
pub use manager::OnboardingManager;
pub use model::{AdminCategory, Depth, OnboardingDraft, Tone, Track};
pub use state::{AdminStep, ClinicalStep, FocusSubstate, PatientStep, Step};
