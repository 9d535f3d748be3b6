//! Error types for the onboarding core.
//!
//! Ordinary stepping never errors: a forward transition without its required
//! input comes back as `Outcome::Rejected`. Only the cases below are errors.

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Onboarding reached a point where the draft cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Cannot derive a credential tier: no track has been selected")]
    TrackUnset,
}

/// Why an update to finalized preferences was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The tier does not permit switching the displayed track.
    TrackSwitchLocked,
    /// The credential tier is derived once and can never be assigned.
    TierAssignment,
    /// The tier (or the current view) does not permit specialty edits.
    SpecialtyEditingDisabled,
    /// A requested focus area is not offered for the user's role.
    FocusAreaNotOffered,
    /// At least one focus area must remain selected.
    FocusAreasEmpty,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrackSwitchLocked => write!(f, "track switching is locked for this tier"),
            Self::TierAssignment => write!(f, "credential tier cannot be assigned directly"),
            Self::SpecialtyEditingDisabled => {
                write!(f, "specialty editing is disabled for this tier or view")
            }
            Self::FocusAreaNotOffered => write!(f, "focus area is not offered for this role"),
            Self::FocusAreasEmpty => write!(f, "at least one focus area is required"),
        }
    }
}

/// Access-policy errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: DenialReason },
}

impl PolicyError {
    /// The reason carried by a denial.
    pub fn reason(&self) -> DenialReason {
        match self {
            Self::PermissionDenied { reason } => *reason,
        }
    }
}

/// Session registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Onboarding session {id} not found")]
    NotFound { id: Uuid },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_message_names_reason() {
        let err = PolicyError::PermissionDenied {
            reason: DenialReason::TrackSwitchLocked,
        };
        assert_eq!(
            err.to_string(),
            "Permission denied: track switching is locked for this tier"
        );
        assert_eq!(err.reason(), DenialReason::TrackSwitchLocked);
    }

    #[test]
    fn top_level_wraps_sub_errors() {
        let err: Error = ConfigurationError::TrackUnset.into();
        assert!(matches!(err, Error::Config(ConfigurationError::TrackUnset)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
