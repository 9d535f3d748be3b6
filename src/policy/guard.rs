//! Update guard for finalized preferences.
//!
//! Every settings mutation goes through [`check_update`] before anything is
//! written. A refused update leaves the record untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::access::evaluate;
use super::tier::CredentialTier;
use crate::error::{DenialReason, PolicyError};
use crate::onboarding::model::{Depth, Tone, Track};
use crate::preferences::Preferences;

/// A partial settings update. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesUpdate {
    /// Switch the displayed workspace track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    /// Always refused; present so attempts are visible to the guard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_tier: Option<CredentialTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_areas: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<Depth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}

impl PreferencesUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: switch the displayed track.
    pub fn with_track(mut self, track: Track) -> Self {
        self.track = Some(track);
        self
    }

    /// Builder: attempt a direct tier assignment.
    pub fn with_credential_tier(mut self, tier: CredentialTier) -> Self {
        self.credential_tier = Some(tier);
        self
    }

    /// Builder: replace the focus areas.
    pub fn with_focus_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus_areas = Some(areas.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_license_number(mut self, license: impl Into<String>) -> Self {
        self.license_number = Some(license.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Decide whether `update` may be applied to `preferences`.
///
/// Refuses, in order: any direct tier assignment; a track change while the
/// tier locks switching; a focus-area change the tier or target view does
/// not permit; an empty focus-area set; a focus area the role is not
/// offered.
pub fn check_update(preferences: &Preferences, update: &PreferencesUpdate) -> Result<(), PolicyError> {
    if update.credential_tier.is_some() {
        return Err(deny(DenialReason::TierAssignment));
    }

    let policy = evaluate(preferences);

    let target_track = update.track.unwrap_or(preferences.track());
    if target_track != preferences.track() && policy.track_switching_locked {
        return Err(deny(DenialReason::TrackSwitchLocked));
    }

    let changed_areas = update
        .focus_areas
        .as_ref()
        .filter(|areas| *areas != preferences.focus_areas());
    if let Some(areas) = changed_areas {
        if !policy.can_edit_specialty_in(target_track) {
            return Err(deny(DenialReason::SpecialtyEditingDisabled));
        }
        if areas.is_empty() {
            return Err(deny(DenialReason::FocusAreasEmpty));
        }
        let catalog = preferences.catalog();
        let offered = |name: &String| {
            preferences
                .credential()
                .is_some_and(|role| catalog.offers(role, name))
        };
        if !areas.iter().all(offered) {
            return Err(deny(DenialReason::FocusAreaNotOffered));
        }
    }

    Ok(())
}

fn deny(reason: DenialReason) -> PolicyError {
    PolicyError::PermissionDenied { reason }
}
