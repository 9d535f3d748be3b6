//! Credential tier derivation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::onboarding::model::Track;

/// Clinical roles that carry full practice authority.
pub const FULL_PRACTICE_ROLES: &[&str] = &["MD / DO", "DDS", "NP", "PA"];

/// Permanent permission level, derived once when onboarding completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialTier {
    Patient,
    Admin,
    RestrictedClinician,
    FullProvider,
}

impl CredentialTier {
    /// Short label for profile display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Admin => "Administrator",
            Self::RestrictedClinician => "Clinician",
            Self::FullProvider => "Provider",
        }
    }
}

impl std::fmt::Display for CredentialTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Admin => write!(f, "admin"),
            Self::RestrictedClinician => write!(f, "restricted_clinician"),
            Self::FullProvider => write!(f, "full_provider"),
        }
    }
}

/// Whether a clinical credential carries full practice authority.
pub fn is_full_practice(credential: &str) -> bool {
    FULL_PRACTICE_ROLES.iter().any(|r| *r == credential)
}

/// Derive the tier for a track and credential.
///
/// A clinical user only reaches `FullProvider` with a full-practice
/// credential; anything else, including no credential, is restricted.
pub fn derive_tier(
    track: Option<Track>,
    credential: Option<&str>,
) -> Result<CredentialTier, ConfigurationError> {
    let track = track.ok_or(ConfigurationError::TrackUnset)?;
    let tier = match track {
        Track::Patient => CredentialTier::Patient,
        Track::Administrative => CredentialTier::Admin,
        Track::Clinical => match credential {
            Some(c) if is_full_practice(c) => CredentialTier::FullProvider,
            _ => CredentialTier::RestrictedClinician,
        },
    };
    Ok(tier)
}
