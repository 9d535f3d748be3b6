//! Access policy: feature gates derived from tier and displayed track.

use serde::{Deserialize, Serialize};

use super::tier::CredentialTier;
use crate::onboarding::model::Track;
use crate::preferences::Preferences;

pub const CTA_CONTACT_SUPPORT: &str = "contact support";
pub const CTA_REQUEST_ROLE_CHANGE: &str = "request role change";

/// Feature gates for one (tier, track) pair. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub track_switching_locked: bool,
    pub specialty_editing_enabled: bool,
    pub status_badge_label: String,
    pub advisory_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
}

impl AccessPolicy {
    /// Whether a specialty edit is allowed while `track` is displayed.
    ///
    /// Specialties only exist in the clinical view.
    pub fn can_edit_specialty_in(&self, track: Track) -> bool {
        self.specialty_editing_enabled && track == Track::Clinical
    }
}

/// Evaluate the policy for finalized preferences.
pub fn evaluate(preferences: &Preferences) -> AccessPolicy {
    evaluate_for(preferences.credential_tier(), preferences.track())
}

/// Evaluate the policy for a tier and the track currently displayed.
pub fn evaluate_for(tier: CredentialTier, track: Track) -> AccessPolicy {
    let badge = format!("Verified Access: {}", tier.label());
    match tier {
        CredentialTier::FullProvider => AccessPolicy {
            track_switching_locked: false,
            specialty_editing_enabled: true,
            status_badge_label: badge,
            advisory_message: if track == Track::Patient {
                "You are viewing the app as a Patient. This is a view change only; \
                 your provider access remains unchanged."
                    .to_string()
            } else {
                "You have full provider access. Role switching enabled.".to_string()
            },
            call_to_action: None,
        },
        CredentialTier::RestrictedClinician => AccessPolicy {
            track_switching_locked: true,
            specialty_editing_enabled: true,
            status_badge_label: badge,
            advisory_message: "Your role is restricted based on your credential type. \
                               Specialty changes are allowed within your role."
                .to_string(),
            call_to_action: None,
        },
        CredentialTier::Admin => AccessPolicy {
            track_switching_locked: true,
            specialty_editing_enabled: false,
            status_badge_label: badge,
            advisory_message: "Administrator accounts cannot switch into Clinical roles."
                .to_string(),
            call_to_action: Some(CTA_CONTACT_SUPPORT.to_string()),
        },
        CredentialTier::Patient => AccessPolicy {
            track_switching_locked: true,
            specialty_editing_enabled: false,
            status_badge_label: badge,
            advisory_message: "You are registered as a Patient account. \
                               Role switching is disabled for security purposes."
                .to_string(),
            call_to_action: Some(CTA_REQUEST_ROLE_CHANGE.to_string()),
        },
    }
}
