//! Onboarding state machine: which screen of which branch the user is on.
//!
//! Every track has its own step enum, so a position in one branch can never
//! be mistaken for a position in another.

use serde::{Deserialize, Serialize};

use super::model::Track;

/// Sub-state of the clinical focus-area step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusSubstate {
    /// Specialties can be toggled on and off.
    Selecting,
    /// Selection is locked in; country can be chosen.
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalStep {
    Role,
    Depth,
    FocusAreas(FocusSubstate),
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStep {
    Category,
    Domain,
    Tasks,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStep {
    Intent,
    Review,
}

/// Position in the onboarding wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Track selection.
    #[default]
    Fork,
    /// Name (and institution) entry.
    Profile,
    Clinical(ClinicalStep),
    Administrative(AdminStep),
    Patient(PatientStep),
}

impl Step {
    /// First branch-specific step for a track.
    pub fn branch_start(track: Track) -> Step {
        match track {
            Track::Clinical => Step::Clinical(ClinicalStep::Role),
            Track::Administrative => Step::Administrative(AdminStep::Category),
            Track::Patient => Step::Patient(PatientStep::Intent),
        }
    }

    /// The branch this step belongs to, if any.
    pub fn track(&self) -> Option<Track> {
        match self {
            Self::Fork | Self::Profile => None,
            Self::Clinical(_) => Some(Track::Clinical),
            Self::Administrative(_) => Some(Track::Administrative),
            Self::Patient(_) => Some(Track::Patient),
        }
    }

    /// Whether this step exposes `complete`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Clinical(ClinicalStep::Review)
                | Self::Administrative(AdminStep::Review)
                | Self::Patient(PatientStep::Review)
        )
    }

    /// Zero-based position, for progress display.
    pub fn index(&self) -> u8 {
        match self {
            Self::Fork => 0,
            Self::Profile => 1,
            Self::Clinical(ClinicalStep::Role)
            | Self::Administrative(AdminStep::Category)
            | Self::Patient(PatientStep::Intent) => 2,
            Self::Clinical(ClinicalStep::Depth)
            | Self::Administrative(AdminStep::Domain)
            | Self::Patient(PatientStep::Review) => 3,
            Self::Clinical(ClinicalStep::FocusAreas(_)) | Self::Administrative(AdminStep::Tasks) => 4,
            Self::Clinical(ClinicalStep::Review) | Self::Administrative(AdminStep::Review) => 5,
        }
    }

    /// Structural successor, ignoring input requirements.
    ///
    /// `track` is only consulted when leaving `Profile`.
    pub fn next(&self, track: Option<Track>) -> Option<Step> {
        use AdminStep as A;
        use ClinicalStep as C;
        use PatientStep as P;
        match self {
            Self::Fork => track.map(|_| Self::Profile),
            Self::Profile => track.map(Self::branch_start),
            Self::Clinical(C::Role) => Some(Self::Clinical(C::Depth)),
            Self::Clinical(C::Depth) => Some(Self::Clinical(C::FocusAreas(FocusSubstate::Selecting))),
            Self::Clinical(C::FocusAreas(_)) => Some(Self::Clinical(C::Review)),
            Self::Administrative(A::Category) => Some(Self::Administrative(A::Domain)),
            Self::Administrative(A::Domain) => Some(Self::Administrative(A::Tasks)),
            Self::Administrative(A::Tasks) => Some(Self::Administrative(A::Review)),
            Self::Patient(P::Intent) => Some(Self::Patient(P::Review)),
            Self::Clinical(C::Review) | Self::Administrative(A::Review) | Self::Patient(P::Review) => None,
        }
    }

    /// Structural predecessor. The review step returns to a confirmed
    /// focus-area selection.
    pub fn previous(&self) -> Option<Step> {
        use AdminStep as A;
        use ClinicalStep as C;
        use PatientStep as P;
        match self {
            Self::Fork => None,
            Self::Profile => Some(Self::Fork),
            Self::Clinical(C::Role) | Self::Administrative(A::Category) | Self::Patient(P::Intent) => {
                Some(Self::Profile)
            }
            Self::Clinical(C::Depth) => Some(Self::Clinical(C::Role)),
            Self::Clinical(C::FocusAreas(_)) => Some(Self::Clinical(C::Depth)),
            Self::Clinical(C::Review) => Some(Self::Clinical(C::FocusAreas(FocusSubstate::Confirmed))),
            Self::Administrative(A::Domain) => Some(Self::Administrative(A::Category)),
            Self::Administrative(A::Tasks) => Some(Self::Administrative(A::Domain)),
            Self::Administrative(A::Review) => Some(Self::Administrative(A::Tasks)),
            Self::Patient(P::Review) => Some(Self::Patient(P::Intent)),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fork => "fork",
            Self::Profile => "profile",
            Self::Clinical(ClinicalStep::Role) => "clinical.role",
            Self::Clinical(ClinicalStep::Depth) => "clinical.depth",
            Self::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting)) => {
                "clinical.focus_areas.selecting"
            }
            Self::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Confirmed)) => {
                "clinical.focus_areas.confirmed"
            }
            Self::Clinical(ClinicalStep::Review) => "clinical.review",
            Self::Administrative(AdminStep::Category) => "administrative.category",
            Self::Administrative(AdminStep::Domain) => "administrative.domain",
            Self::Administrative(AdminStep::Tasks) => "administrative.tasks",
            Self::Administrative(AdminStep::Review) => "administrative.review",
            Self::Patient(PatientStep::Intent) => "patient.intent",
            Self::Patient(PatientStep::Review) => "patient.review",
        };
        write!(f, "{s}")
    }
}
