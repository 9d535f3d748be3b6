//! Onboarding data models: tracks, fixed option lists, and the draft record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::OnboardingConfig;

/// The workspace view a user is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Clinical,
    Administrative,
    Patient,
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clinical => write!(f, "clinical"),
            Self::Administrative => write!(f, "administrative"),
            Self::Patient => write!(f, "patient"),
        }
    }
}

impl std::str::FromStr for Track {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clinical" => Ok(Self::Clinical),
            "administrative" => Ok(Self::Administrative),
            "patient" => Ok(Self::Patient),
            _ => Err(format!("Unknown track: {}", s)),
        }
    }
}

/// How much detail answers should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// Short, actionable, 1 to 3 citations.
    Fast,
    /// Clinical context and key branches, 3 to 6 citations.
    Detailed,
    /// Structured mini-review, 6 to 12 citations.
    Research,
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Detailed => write!(f, "detailed"),
            Self::Research => write!(f, "research"),
        }
    }
}

/// Answer register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Professional,
    Academic,
    PatientFriendly,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Professional => write!(f, "professional"),
            Self::Academic => write!(f, "academic"),
            Self::PatientFriendly => write!(f, "patient-friendly"),
        }
    }
}

/// Administrative browsing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminCategory {
    Operations,
    InsuranceBenefits,
    QualityCompliance,
    RcmDocumentation,
    PublicHealthResearch,
}

impl AdminCategory {
    pub const ALL: [AdminCategory; 5] = [
        Self::Operations,
        Self::InsuranceBenefits,
        Self::QualityCompliance,
        Self::RcmDocumentation,
        Self::PublicHealthResearch,
    ];

    /// The category label used by the specialty catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Operations => "Operations",
            Self::InsuranceBenefits => "Insurance & Benefits",
            Self::QualityCompliance => "Quality & Compliance",
            Self::RcmDocumentation => "RCM & Documentation",
            Self::PublicHealthResearch => "Public Health & Research",
        }
    }
}

impl std::fmt::Display for AdminCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A labelled group of clinical roles.
#[derive(Debug, Clone, Copy)]
pub struct RoleGroup {
    pub label: &'static str,
    pub roles: &'static [&'static str],
}

/// Clinical roles offered on the role step, grouped for display.
pub const CLINICAL_ROLE_GROUPS: &[RoleGroup] = &[
    RoleGroup {
        label: "Providers",
        roles: &["MD / DO", "NP", "PA"],
    },
    RoleGroup {
        label: "Nursing & Pharmacy",
        roles: &["RN", "PharmD"],
    },
    RoleGroup {
        label: "Rehabilitation",
        roles: &[
            "DPT",
            "Occupational Therapy",
            "Speech-Language Pathology",
            "Respiratory Therapy",
        ],
    },
    RoleGroup {
        label: "Specialized & Allied",
        roles: &[
            "DDS",
            "OD",
            "DPM",
            "DC",
            "Clinical Psychology",
            "Genetic Counseling",
        ],
    },
];

/// Whether `role` is one of the offered clinical roles.
pub fn is_clinical_role(role: &str) -> bool {
    CLINICAL_ROLE_GROUPS
        .iter()
        .any(|g| g.roles.iter().any(|r| *r == role))
}

/// Credential recorded for every administrative user.
pub const ADMINISTRATIVE_CREDENTIAL: &str = "Administrative";

/// Credential recorded for every patient user.
pub const PATIENT_CREDENTIAL: &str = "Patient";

/// Tasks an administrative user can ask help with.
pub const ADMIN_TASKS: &[&str] = &[
    "Coverage / benefits explanations",
    "Prior auth + denial support",
    "Coding & documentation support",
    "Care navigation resources",
    "Patient communication templates",
];

/// Upper bound on selected administrative tasks.
pub const MAX_TASKS: usize = 2;

/// Reasons a patient can give for coming.
pub const PATIENT_INTENTS: &[&str] = &[
    "Understand results",
    "Symptoms and next steps",
    "Medications",
    "Insurance and costs",
    "Prepare for appointment",
];

/// Countries offered once clinical focus areas are confirmed.
pub const COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "European Union",
];

/// Mutable accumulator for one onboarding session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub track: Option<Track>,
    pub name: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<Depth>,
    /// Clinical specialties, or the single administrative domain.
    pub focus_areas: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_category: Option<AdminCategory>,
    pub country: String,
    pub tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub tone: Tone,
}

impl OnboardingDraft {
    /// Empty draft seeded with configured defaults.
    pub fn new(config: &OnboardingConfig, track: Option<Track>) -> Self {
        Self {
            track,
            name: String::new(),
            institution: String::new(),
            credential: None,
            depth: None,
            focus_areas: BTreeSet::new(),
            admin_category: None,
            country: config.default_country.clone(),
            tasks: Vec::new(),
            intent: None,
            tone: config.default_tone,
        }
    }

    /// Whether the profile step's required input is present.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
