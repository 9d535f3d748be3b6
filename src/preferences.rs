//! Finalized preferences: the record external collaborators consume.
//!
//! Fields are read through accessors; the only way to change a record is
//! [`Preferences::apply_update`], which runs the update guard first.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::SpecialtyCatalog;
use crate::config::OnboardingConfig;
use crate::error::PolicyError;
use crate::onboarding::model::{Depth, OnboardingDraft, Tone, Track};
use crate::policy::{AccessPolicy, CredentialTier, PreferencesUpdate, check_update, evaluate};

/// Serialize-only: a record can be produced by completing onboarding and
/// by nothing else, so the tier is never read back from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    track: Track,
    credential_tier: CredentialTier,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license_number: Option<String>,
    focus_areas: BTreeSet<String>,
    depth: Depth,
    country: String,
    language: String,
    tone: Tone,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<String>,
    completed_at: DateTime<Utc>,
    /// Catalog the focus areas were chosen from; settings edits are
    /// validated against it.
    #[serde(skip)]
    catalog: SpecialtyCatalog,
}

impl Preferences {
    /// Convert a finished draft. The tier comes from `derive_tier` and is
    /// never assigned anywhere else.
    pub(crate) fn from_draft(
        draft: OnboardingDraft,
        track: Track,
        tier: CredentialTier,
        config: &OnboardingConfig,
        catalog: SpecialtyCatalog,
    ) -> Self {
        let institution = Some(draft.institution.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            track,
            credential_tier: tier,
            name: draft.name.trim().to_string(),
            institution,
            credential: draft.credential,
            license_number: None,
            focus_areas: draft.focus_areas,
            depth: draft.depth.unwrap_or(config.default_depth),
            country: draft.country,
            language: config.default_language.clone(),
            tone: draft.tone,
            tasks: draft.tasks,
            intent: draft.intent,
            completed_at: Utc::now(),
            catalog,
        }
    }

    /// Currently displayed workspace track.
    pub fn track(&self) -> Track {
        self.track
    }

    pub fn credential_tier(&self) -> CredentialTier {
        self.credential_tier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn license_number(&self) -> Option<&str> {
        self.license_number.as_deref()
    }

    /// A license number was supplied. Nothing checks it beyond presence.
    pub fn is_verified(&self) -> bool {
        self.license_number
            .as_deref()
            .is_some_and(|l| !l.trim().is_empty())
    }

    pub fn focus_areas(&self) -> &BTreeSet<String> {
        &self.focus_areas
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub(crate) fn catalog(&self) -> &SpecialtyCatalog {
        &self.catalog
    }

    /// Current feature gates for this record.
    pub fn access_policy(&self) -> AccessPolicy {
        evaluate(self)
    }

    /// Apply a settings update if the guard allows it.
    ///
    /// All-or-nothing: on `PermissionDenied` no field has changed.
    pub fn apply_update(&mut self, update: PreferencesUpdate) -> Result<(), PolicyError> {
        if let Err(e) = check_update(self, &update) {
            tracing::warn!(
                tier = %self.credential_tier,
                track = %self.track,
                error = %e,
                "Preferences update denied"
            );
            return Err(e);
        }

        let PreferencesUpdate {
            track,
            credential_tier: _,
            focus_areas,
            name,
            institution,
            country,
            language,
            tone,
            depth,
            license_number,
        } = update;

        if let Some(track) = track {
            if track != self.track {
                tracing::debug!(from = %self.track, to = %track, "Switching workspace view");
            }
            self.track = track;
        }
        if let Some(areas) = focus_areas {
            self.focus_areas = areas;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(institution) = institution {
            self.institution = Some(institution).filter(|s| !s.trim().is_empty());
        }
        if let Some(country) = country {
            self.country = country;
        }
        if let Some(language) = language {
            self.language = language;
        }
        if let Some(tone) = tone {
            self.tone = tone;
        }
        if let Some(depth) = depth {
            self.depth = depth;
        }
        if let Some(license) = license_number {
            self.license_number = Some(license).filter(|s| !s.trim().is_empty());
        }
        Ok(())
    }

    /// Render the record as a markdown section for chat system prompts.
    pub fn to_system_prompt_section(&self) -> String {
        let mut parts = vec!["# User Profile".to_string()];

        parts.push(format!("- **Name:** {}", self.name));
        parts.push(format!("- **Workspace:** {}", self.track));
        parts.push(format!("- **Access tier:** {}", self.credential_tier.label()));

        if let Some(ref credential) = self.credential {
            parts.push(format!("- **Role:** {}", credential));
        }
        if let Some(ref institution) = self.institution {
            parts.push(format!("- **Institution:** {}", institution));
        }
        if !self.focus_areas.is_empty() {
            let areas: Vec<&str> = self.focus_areas.iter().map(String::as_str).collect();
            parts.push(format!("- **Focus areas:** {}", areas.join(", ")));
        }
        if !self.tasks.is_empty() {
            parts.push(format!("- **Tasks:** {}", self.tasks.join(", ")));
        }
        if let Some(ref intent) = self.intent {
            parts.push(format!("- **Reason for visit:** {}", intent));
        }

        parts.push(format!("- **Answer depth:** {}", self.depth));
        parts.push(format!("- **Tone:** {}", self.tone));
        parts.push(format!("- **Country:** {}", self.country));
        parts.push(format!("- **Language:** {}", self.language));

        parts.join("\n")
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::preferences;
    use super::*;
    use crate::error::DenialReason;

    #[test]
    fn full_provider_switches_view_without_changing_tier() {
        let mut prefs = preferences(Track::Clinical, Some("MD / DO"));
        assert_eq!(prefs.credential_tier(), CredentialTier::FullProvider);

        prefs
            .apply_update(PreferencesUpdate::new().with_track(Track::Patient))
            .unwrap();
        assert_eq!(prefs.track(), Track::Patient);
        assert_eq!(prefs.credential_tier(), CredentialTier::FullProvider);
        assert!(prefs.access_policy().advisory_message.contains("view change"));

        prefs
            .apply_update(PreferencesUpdate::new().with_track(Track::Clinical))
            .unwrap();
        assert_eq!(prefs.track(), Track::Clinical);
    }

    #[test]
    fn locked_tiers_cannot_switch_track() {
        for (track, credential) in [
            (Track::Clinical, Some("DC")),
            (Track::Administrative, Some("Administrative")),
            (Track::Patient, Some("Patient")),
        ] {
            let mut prefs = preferences(track, credential);
            let before = prefs.clone();
            let target = if track == Track::Clinical {
                Track::Patient
            } else {
                Track::Clinical
            };
            let err = prefs
                .apply_update(PreferencesUpdate::new().with_track(target).with_country("Canada"))
                .unwrap_err();
            assert_eq!(err.reason(), DenialReason::TrackSwitchLocked);
            assert_eq!(prefs, before, "denied update must not change anything");
        }
    }

    #[test]
    fn setting_the_same_track_is_not_a_switch() {
        let mut prefs = preferences(Track::Patient, Some("Patient"));
        prefs
            .apply_update(
                PreferencesUpdate::new()
                    .with_track(Track::Patient)
                    .with_language("Spanish"),
            )
            .unwrap();
        assert_eq!(prefs.language(), "Spanish");
    }

    #[test]
    fn tier_can_never_be_assigned() {
        for (track, credential) in [
            (Track::Clinical, Some("MD / DO")),
            (Track::Clinical, Some("RN")),
            (Track::Administrative, None),
            (Track::Patient, None),
        ] {
            let mut prefs = preferences(track, credential);
            let tier = prefs.credential_tier();
            let err = prefs
                .apply_update(PreferencesUpdate::new().with_credential_tier(CredentialTier::FullProvider))
                .unwrap_err();
            assert_eq!(err.reason(), DenialReason::TierAssignment);
            assert_eq!(prefs.credential_tier(), tier);
        }
    }

    #[test]
    fn specialty_edit_follows_policy() {
        let mut clinician = preferences(Track::Clinical, Some("RN"));
        clinician
            .apply_update(PreferencesUpdate::new().with_focus_areas(["Critical Care / ICU"]))
            .unwrap();
        assert!(clinician.focus_areas().contains("Critical Care / ICU"));
        assert_eq!(clinician.focus_areas().len(), 1);

        let mut admin = preferences(Track::Administrative, Some("Administrative"));
        let err = admin
            .apply_update(PreferencesUpdate::new().with_focus_areas(["Cardiology"]))
            .unwrap_err();
        assert_eq!(err.reason(), DenialReason::SpecialtyEditingDisabled);

        // Resubmitting the unchanged set is not an edit
        let unchanged = admin.focus_areas().clone();
        admin
            .apply_update(PreferencesUpdate {
                focus_areas: Some(unchanged),
                ..Default::default()
            })
            .unwrap();
    }

    #[test]
    fn full_provider_cannot_edit_specialty_from_patient_view() {
        let mut prefs = preferences(Track::Clinical, Some("PA"));
        prefs
            .apply_update(PreferencesUpdate::new().with_track(Track::Patient))
            .unwrap();
        let err = prefs
            .apply_update(PreferencesUpdate::new().with_focus_areas(["Dermatology"]))
            .unwrap_err();
        assert_eq!(err.reason(), DenialReason::SpecialtyEditingDisabled);

        // Switching back to clinical in the same update is allowed
        prefs
            .apply_update(
                PreferencesUpdate::new()
                    .with_track(Track::Clinical)
                    .with_focus_areas(["Dermatology"]),
            )
            .unwrap();
        assert!(prefs.focus_areas().contains("Dermatology"));
    }

    #[test]
    fn license_number_marks_verified() {
        let mut prefs = preferences(Track::Clinical, Some("NP"));
        assert!(!prefs.is_verified());
        prefs
            .apply_update(PreferencesUpdate::new().with_license_number("1234567890"))
            .unwrap();
        assert!(prefs.is_verified());
        assert_eq!(prefs.license_number(), Some("1234567890"));
        // Accepting a license never changes the tier
        assert_eq!(prefs.credential_tier(), CredentialTier::FullProvider);

        prefs
            .apply_update(PreferencesUpdate::new().with_license_number("  "))
            .unwrap();
        assert!(!prefs.is_verified());
    }

    #[test]
    fn serializes_tier_and_skips_catalog() {
        let prefs = preferences(Track::Clinical, Some("DDS"));
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["credential_tier"], "full_provider");
        assert_eq!(json["track"], "clinical");
        assert!(json.get("catalog").is_none());
        assert!(json.get("license_number").is_none());
    }

    #[test]
    fn specialty_edit_stays_within_role() {
        let mut prefs = preferences(Track::Clinical, Some("DC"));
        let before = prefs.clone();

        let err = prefs
            .apply_update(
                PreferencesUpdate::new().with_focus_areas(["Sports Chiropractic", "Neurosurgery"]),
            )
            .unwrap_err();
        assert_eq!(err.reason(), DenialReason::FocusAreaNotOffered);

        let err = prefs
            .apply_update(PreferencesUpdate::new().with_focus_areas(["Not A Specialty"]))
            .unwrap_err();
        assert_eq!(err.reason(), DenialReason::FocusAreaNotOffered);
        assert_eq!(prefs, before);

        prefs
            .apply_update(
                PreferencesUpdate::new()
                    .with_focus_areas(["Sports Chiropractic", "Chiropractic Neurology"]),
            )
            .unwrap();
        assert_eq!(prefs.focus_areas().len(), 2);
    }

    #[test]
    fn specialty_edit_cannot_clear_every_area() {
        let mut prefs = preferences(Track::Clinical, Some("MD / DO"));
        let err = prefs
            .apply_update(PreferencesUpdate::new().with_focus_areas(Vec::<String>::new()))
            .unwrap_err();
        assert_eq!(err.reason(), DenialReason::FocusAreasEmpty);
        assert!(prefs.focus_areas().contains("Family Medicine"));
    }

    #[test]
    fn system_prompt_section_includes_key_fields() {
        let prefs = preferences(Track::Clinical, Some("MD / DO"));
        let section = prefs.to_system_prompt_section();
        assert!(section.contains("Jordan Smith"));
        assert!(section.contains("clinical"));
        assert!(section.contains("Provider"));
        assert!(section.contains("MD / DO"));
        assert!(section.contains("Family Medicine"));
        assert!(section.contains("United States"));
        assert!(section.contains("English"));
        // No tasks or intent on the clinical track
        assert!(!section.contains("Tasks"));
        assert!(!section.contains("Reason for visit"));
    }

    #[test]
    fn missing_depth_uses_config_default() {
        let prefs = preferences(Track::Administrative, Some("Administrative"));
        assert_eq!(prefs.depth(), Depth::Fast);
        assert!(prefs.institution().is_none());
    }
}
