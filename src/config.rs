//! Configuration types.

use crate::onboarding::model::{Depth, Tone};

/// Defaults applied to every new onboarding draft.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Country preselected before the user picks one.
    pub default_country: String,
    /// Interface language; onboarding never asks, settings may change it.
    pub default_language: String,
    /// Answer tone until the user changes it in settings.
    pub default_tone: Tone,
    /// Depth recorded for tracks that never ask for one.
    pub default_depth: Depth,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            default_country: "United States".to_string(),
            default_language: "English".to_string(),
            default_tone: Tone::Professional,
            default_depth: Depth::Fast,
        }
    }
}
