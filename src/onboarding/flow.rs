//! Onboarding flow controller: branching stepper over an [`OnboardingDraft`].
//!
//! Every action returns an [`Outcome`]. Actions without their required input,
//! or attempted on the wrong step, come back `Rejected` and leave the draft
//! exactly as it was. Only [`OnboardingFlow::complete`] can fail, and only
//! when no track was ever chosen.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::model::{
    ADMIN_TASKS, ADMINISTRATIVE_CREDENTIAL, AdminCategory, COUNTRIES, Depth, MAX_TASKS,
    OnboardingDraft, PATIENT_CREDENTIAL, PATIENT_INTENTS, Track, is_clinical_role,
};
use super::state::{AdminStep, ClinicalStep, FocusSubstate, PatientStep, Step};
use crate::catalog::{SearchFilter, Specialty, SpecialtyCatalog};
use crate::config::OnboardingConfig;
use crate::error::ConfigurationError;
use crate::policy::derive_tier;
use crate::preferences::Preferences;

/// The input a step needs before the wizard can move past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Track,
    Name,
    Role,
    Depth,
    FocusAreas,
    FocusConfirmed,
    Category,
    Domain,
    Tasks,
    Intent,
}

/// Why an action was refused. Refusals are expected during normal use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The action does not belong to the current step.
    WrongStep { action: String, step: Step },
    /// The current step's required input is missing.
    MissingInput { requirement: Requirement },
    /// The value is not one of the offered choices.
    InvalidChoice { field: String, value: String },
    /// Two tasks are already selected.
    TaskLimitReached,
    /// Already on the first step.
    AtStart,
    /// `complete` is only available on a review step.
    NotTerminal { step: Step },
    /// The session has already produced its preferences.
    Finished,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongStep { action, step } => write!(f, "{action} is not available on {step}"),
            Self::MissingInput { requirement } => write!(f, "missing required input: {requirement:?}"),
            Self::InvalidChoice { field, value } => write!(f, "invalid {field}: {value}"),
            Self::TaskLimitReached => write!(f, "at most {MAX_TASKS} tasks can be selected"),
            Self::AtStart => write!(f, "already at the first step"),
            Self::NotTerminal { step } => write!(f, "cannot complete from {step}"),
            Self::Finished => write!(f, "onboarding already completed"),
        }
    }
}

/// Result of a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The action was applied; carries the step the wizard is now on.
    Applied { step: Step },
    /// The action was refused; nothing changed.
    Rejected { rejection: Rejection },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied { .. } => None,
            Self::Rejected { rejection } => Some(rejection),
        }
    }

    fn rejected(rejection: Rejection) -> Self {
        Self::Rejected { rejection }
    }
}

/// Result of a `complete` call that did not hit a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The draft was converted; the flow is finished.
    Completed(Preferences),
    /// Not on a review step (or already finished); nothing changed.
    Rejected(Rejection),
}

/// A user action, in a form external callers can carry as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OnboardingAction {
    ChooseTrack { track: Track },
    SetName { name: String },
    SetInstitution { institution: String },
    SelectRole { role: String },
    SelectDepth { depth: Depth },
    ToggleFocusArea { name: String },
    ConfirmFocusAreas,
    EditFocusAreas,
    SelectCountry { country: String },
    SelectCategory { category: AdminCategory },
    SelectDomain { name: String },
    ToggleTask { task: String },
    SelectIntent { intent: String },
    Advance,
    Back,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub step: Step,
    pub step_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    pub can_complete: bool,
    pub finished: bool,
    pub draft: OnboardingDraft,
}

/// Drives one onboarding session from track selection to finalized preferences.
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    config: OnboardingConfig,
    catalog: SpecialtyCatalog,
    step: Step,
    draft: OnboardingDraft,
    /// Track the branch fields were collected under.
    branch_track: Option<Track>,
    finished: bool,
}

impl OnboardingFlow {
    /// Start a session. A preset track skips the fork.
    pub fn new(config: OnboardingConfig, catalog: SpecialtyCatalog, initial_track: Option<Track>) -> Self {
        let draft = OnboardingDraft::new(&config, initial_track);
        let step = if initial_track.is_some() {
            Step::Profile
        } else {
            Step::Fork
        };
        Self {
            config,
            catalog,
            step,
            draft,
            branch_track: initial_track,
            finished: false,
        }
    }

    /// Start a session with the default config and built-in catalog.
    pub fn with_defaults(initial_track: Option<Track>) -> Self {
        Self::new(OnboardingConfig::default(), SpecialtyCatalog::builtin(), initial_track)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn track(&self) -> Option<Track> {
        self.draft.track
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> OnboardingStatus {
        OnboardingStatus {
            step: self.step,
            step_index: self.step.index(),
            track: self.draft.track,
            can_complete: !self.finished && self.step.is_terminal(),
            finished: self.finished,
            draft: self.draft.clone(),
        }
    }

    /// Dispatch a serialized action.
    pub fn apply(&mut self, action: OnboardingAction) -> Outcome {
        match action {
            OnboardingAction::ChooseTrack { track } => self.choose_track(track),
            OnboardingAction::SetName { name } => self.set_name(name),
            OnboardingAction::SetInstitution { institution } => self.set_institution(institution),
            OnboardingAction::SelectRole { role } => self.select_role(&role),
            OnboardingAction::SelectDepth { depth } => self.select_depth(depth),
            OnboardingAction::ToggleFocusArea { name } => self.toggle_focus_area(&name),
            OnboardingAction::ConfirmFocusAreas => self.confirm_focus_areas(),
            OnboardingAction::EditFocusAreas => self.edit_focus_areas(),
            OnboardingAction::SelectCountry { country } => self.select_country(&country),
            OnboardingAction::SelectCategory { category } => self.select_category(category),
            OnboardingAction::SelectDomain { name } => self.select_domain(&name),
            OnboardingAction::ToggleTask { task } => self.toggle_task(&task),
            OnboardingAction::SelectIntent { intent } => self.select_intent(&intent),
            OnboardingAction::Advance => self.advance(),
            OnboardingAction::Back => self.back(),
        }
    }

    // ── Fork and profile ────────────────────────────────────────────────

    /// Pick a track on the fork and move to the profile step.
    ///
    /// Branch answers collected under a different track are discarded.
    pub fn choose_track(&mut self, track: Track) -> Outcome {
        if let Some(r) = self.expect_step("choose_track", |s| s == Step::Fork) {
            return r;
        }
        if self.branch_track != Some(track) {
            self.clear_branch_fields();
            self.branch_track = Some(track);
        }
        self.draft.track = Some(track);
        self.move_to(Step::Profile, "choose_track")
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Outcome {
        if let Some(r) = self.expect_step("set_name", |s| s == Step::Profile) {
            return r;
        }
        self.draft.name = name.into();
        self.applied("set_name")
    }

    /// Institution is asked of clinical and administrative users only.
    pub fn set_institution(&mut self, institution: impl Into<String>) -> Outcome {
        if let Some(r) = self.expect_step("set_institution", |s| s == Step::Profile) {
            return r;
        }
        let institution = institution.into();
        if self.draft.track == Some(Track::Patient) {
            return self.reject(
                "set_institution",
                Rejection::InvalidChoice {
                    field: "institution".to_string(),
                    value: institution,
                },
            );
        }
        self.draft.institution = institution;
        self.applied("set_institution")
    }

    // ── Clinical branch ─────────────────────────────────────────────────

    pub fn select_role(&mut self, role: &str) -> Outcome {
        if let Some(r) = self.expect_step("select_role", |s| s == Step::Clinical(ClinicalStep::Role)) {
            return r;
        }
        if !is_clinical_role(role) {
            return self.invalid("select_role", "role", role);
        }
        self.draft.credential = Some(role.to_string());
        self.applied("select_role")
    }

    pub fn select_depth(&mut self, depth: Depth) -> Outcome {
        if let Some(r) = self.expect_step("select_depth", |s| s == Step::Clinical(ClinicalStep::Depth)) {
            return r;
        }
        self.draft.depth = Some(depth);
        self.applied("select_depth")
    }

    /// Catalog search scoped to the current branch: by role on the clinical
    /// track, by chosen category on the administrative track.
    pub fn search_specialties(&self, query: &str) -> Vec<&'static Specialty> {
        let filter = match self.draft.track {
            Some(Track::Clinical) => self.draft.credential.as_deref().map(SearchFilter::Role),
            Some(Track::Administrative) => self
                .draft
                .admin_category
                .map(|c| SearchFilter::Category(c.label())),
            _ => None,
        };
        self.catalog.search(query, filter)
    }

    /// Curated focus-area chips for the chosen role.
    pub fn top_chips(&self) -> Vec<&'static str> {
        self.catalog.top_chips(self.draft.credential.as_deref())
    }

    /// Add or remove a specialty while the focus-area step is selecting.
    pub fn toggle_focus_area(&mut self, name: &str) -> Outcome {
        let selecting = Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting));
        if let Some(r) = self.expect_step("toggle_focus_area", |s| s == selecting) {
            return r;
        }
        if self.draft.focus_areas.remove(name) {
            return self.applied("toggle_focus_area");
        }
        let offered = self
            .draft
            .credential
            .as_deref()
            .is_some_and(|role| self.catalog.offers(role, name));
        if !offered {
            return self.invalid("toggle_focus_area", "focus_area", name);
        }
        self.draft.focus_areas.insert(name.to_string());
        self.applied("toggle_focus_area")
    }

    /// Lock in the selection; requires at least one focus area.
    pub fn confirm_focus_areas(&mut self) -> Outcome {
        let selecting = Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting));
        if let Some(r) = self.expect_step("confirm_focus_areas", |s| s == selecting) {
            return r;
        }
        if self.draft.focus_areas.is_empty() {
            return self.missing("confirm_focus_areas", Requirement::FocusAreas);
        }
        self.move_to(
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Confirmed)),
            "confirm_focus_areas",
        )
    }

    /// Return to selecting without clearing what was chosen.
    pub fn edit_focus_areas(&mut self) -> Outcome {
        let confirmed = Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Confirmed));
        if let Some(r) = self.expect_step("edit_focus_areas", |s| s == confirmed) {
            return r;
        }
        self.move_to(
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting)),
            "edit_focus_areas",
        )
    }

    pub fn select_country(&mut self, country: &str) -> Outcome {
        let confirmed = Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Confirmed));
        if let Some(r) = self.expect_step("select_country", |s| s == confirmed) {
            return r;
        }
        if !COUNTRIES.iter().any(|c| *c == country) {
            return self.invalid("select_country", "country", country);
        }
        self.draft.country = country.to_string();
        self.applied("select_country")
    }

    // ── Administrative branch ───────────────────────────────────────────

    pub fn select_category(&mut self, category: AdminCategory) -> Outcome {
        let step = Step::Administrative(AdminStep::Category);
        if let Some(r) = self.expect_step("select_category", |s| s == step) {
            return r;
        }
        self.draft.admin_category = Some(category);
        self.applied("select_category")
    }

    /// Domains offered for the chosen category.
    pub fn domain_options(&self) -> Vec<&'static Specialty> {
        self.draft
            .admin_category
            .map(|c| self.catalog.by_category(c.label()))
            .unwrap_or_default()
    }

    /// Pick the single administrative domain. Replaces any earlier pick.
    pub fn select_domain(&mut self, name: &str) -> Outcome {
        let step = Step::Administrative(AdminStep::Domain);
        if let Some(r) = self.expect_step("select_domain", |s| s == step) {
            return r;
        }
        if !self.domain_options().iter().any(|s| s.name == name) {
            return self.invalid("select_domain", "domain", name);
        }
        self.draft.focus_areas.clear();
        self.draft.focus_areas.insert(name.to_string());
        self.draft.credential = Some(ADMINISTRATIVE_CREDENTIAL.to_string());
        self.applied("select_domain")
    }

    /// Add or remove a task. Adding a third is refused.
    pub fn toggle_task(&mut self, task: &str) -> Outcome {
        let step = Step::Administrative(AdminStep::Tasks);
        if let Some(r) = self.expect_step("toggle_task", |s| s == step) {
            return r;
        }
        if !ADMIN_TASKS.iter().any(|t| *t == task) {
            return self.invalid("toggle_task", "task", task);
        }
        if let Some(pos) = self.draft.tasks.iter().position(|t| t == task) {
            self.draft.tasks.remove(pos);
            return self.applied("toggle_task");
        }
        if self.draft.tasks.len() >= MAX_TASKS {
            return self.reject("toggle_task", Rejection::TaskLimitReached);
        }
        self.draft.tasks.push(task.to_string());
        self.applied("toggle_task")
    }

    // ── Patient branch ──────────────────────────────────────────────────

    pub fn select_intent(&mut self, intent: &str) -> Outcome {
        let step = Step::Patient(PatientStep::Intent);
        if let Some(r) = self.expect_step("select_intent", |s| s == step) {
            return r;
        }
        if !PATIENT_INTENTS.iter().any(|i| *i == intent) {
            return self.invalid("select_intent", "intent", intent);
        }
        self.draft.intent = Some(intent.to_string());
        self.draft.credential = Some(PATIENT_CREDENTIAL.to_string());
        self.draft.depth = Some(Depth::Fast);
        self.applied("select_intent")
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Move forward if the current step's required input is present.
    pub fn advance(&mut self) -> Outcome {
        if self.finished {
            return self.reject("advance", Rejection::Finished);
        }
        if let Some(requirement) = self.unmet_requirement() {
            return self.missing("advance", requirement);
        }
        match self.step.next(self.draft.track) {
            Some(next) => self.move_to(next, "advance"),
            None => self.reject(
                "advance",
                Rejection::WrongStep {
                    action: "advance".to_string(),
                    step: self.step,
                },
            ),
        }
    }

    /// Move back one step. Leaving the profile step clears the track;
    /// everything else keeps what was entered.
    pub fn back(&mut self) -> Outcome {
        if self.finished {
            return self.reject("back", Rejection::Finished);
        }
        let Some(previous) = self.step.previous() else {
            return self.reject("back", Rejection::AtStart);
        };
        if previous == Step::Fork {
            self.draft.track = None;
        }
        self.move_to(previous, "back")
    }

    /// Finish onboarding on a review step.
    ///
    /// Derives the credential tier, converts the draft, and ends the session.
    /// Fails with [`ConfigurationError::TrackUnset`] if no track is set; the
    /// draft is then left as it was.
    pub fn complete(&mut self) -> Result<Completion, ConfigurationError> {
        if self.finished {
            debug!("complete rejected: already finished");
            return Ok(Completion::Rejected(Rejection::Finished));
        }
        let Some(track) = self.draft.track else {
            warn!(step = %self.step, "complete called without a track");
            return Err(ConfigurationError::TrackUnset);
        };
        if !self.step.is_terminal() {
            debug!(step = %self.step, "complete rejected: not on a review step");
            return Ok(Completion::Rejected(Rejection::NotTerminal { step: self.step }));
        }

        let tier = derive_tier(Some(track), self.draft.credential.as_deref())?;
        let mut draft = std::mem::replace(&mut self.draft, OnboardingDraft::new(&self.config, None));
        if track == Track::Patient {
            draft.institution.clear();
        }
        self.finished = true;

        info!(%track, %tier, "Onboarding complete");
        Ok(Completion::Completed(Preferences::from_draft(
            draft,
            track,
            tier,
            &self.config,
            self.catalog,
        )))
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// What the current step still needs before `advance` can move on.
    fn unmet_requirement(&self) -> Option<Requirement> {
        let d = &self.draft;
        match self.step {
            Step::Fork => d.track.is_none().then_some(Requirement::Track),
            Step::Profile => (!d.has_name()).then_some(Requirement::Name),
            Step::Clinical(ClinicalStep::Role) => {
                (!d.credential.as_deref().is_some_and(is_clinical_role)).then_some(Requirement::Role)
            }
            Step::Clinical(ClinicalStep::Depth) => d.depth.is_none().then_some(Requirement::Depth),
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting)) => {
                Some(Requirement::FocusConfirmed)
            }
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Confirmed)) => {
                d.focus_areas.is_empty().then_some(Requirement::FocusAreas)
            }
            Step::Administrative(AdminStep::Category) => {
                d.admin_category.is_none().then_some(Requirement::Category)
            }
            Step::Administrative(AdminStep::Domain) => {
                (!self.has_domain_in_category()).then_some(Requirement::Domain)
            }
            Step::Administrative(AdminStep::Tasks) => {
                (d.tasks.is_empty() || d.tasks.len() > MAX_TASKS).then_some(Requirement::Tasks)
            }
            Step::Patient(PatientStep::Intent) => d.intent.is_none().then_some(Requirement::Intent),
            Step::Clinical(ClinicalStep::Review)
            | Step::Administrative(AdminStep::Review)
            | Step::Patient(PatientStep::Review) => None,
        }
    }

    /// The domain picked earlier still belongs to the current category.
    fn has_domain_in_category(&self) -> bool {
        let Some(category) = self.draft.admin_category else {
            return false;
        };
        let mut areas = self.draft.focus_areas.iter();
        match (areas.next(), areas.next()) {
            (Some(name), None) => self
                .catalog
                .find_by_name(name)
                .is_some_and(|s| s.category == Some(category.label())),
            _ => false,
        }
    }

    fn clear_branch_fields(&mut self) {
        let d = &mut self.draft;
        d.credential = None;
        d.depth = None;
        d.focus_areas.clear();
        d.admin_category = None;
        d.tasks.clear();
        d.intent = None;
        d.country = self.config.default_country.clone();
    }

    /// `Some(rejection)` unless the flow is live and on an accepted step.
    fn expect_step(&self, action: &str, accepts: impl Fn(Step) -> bool) -> Option<Outcome> {
        if self.finished {
            return Some(self.reject(action, Rejection::Finished));
        }
        if accepts(self.step) {
            return None;
        }
        Some(self.reject(
            action,
            Rejection::WrongStep {
                action: action.to_string(),
                step: self.step,
            },
        ))
    }

    fn move_to(&mut self, step: Step, action: &str) -> Outcome {
        debug!(action, from = %self.step, to = %step, "Onboarding transition");
        self.step = step;
        Outcome::Applied { step }
    }

    fn applied(&self, action: &str) -> Outcome {
        debug!(action, step = %self.step, "Onboarding input recorded");
        Outcome::Applied { step: self.step }
    }

    fn missing(&self, action: &str, requirement: Requirement) -> Outcome {
        self.reject(action, Rejection::MissingInput { requirement })
    }

    fn invalid(&self, action: &str, field: &str, value: &str) -> Outcome {
        self.reject(
            action,
            Rejection::InvalidChoice {
                field: field.to_string(),
                value: value.to_string(),
            },
        )
    }

    fn reject(&self, action: &str, rejection: Rejection) -> Outcome {
        debug!(action, step = %self.step, %rejection, "Onboarding action rejected");
        Outcome::rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CredentialTier;

    fn clinical_at_focus(role: &str) -> OnboardingFlow {
        let mut flow = OnboardingFlow::with_defaults(None);
        assert!(flow.choose_track(Track::Clinical).is_applied());
        flow.set_name("Dr. Jordan Smith");
        assert!(flow.advance().is_applied());
        flow.select_role(role);
        assert!(flow.advance().is_applied());
        flow.select_depth(Depth::Detailed);
        assert!(flow.advance().is_applied());
        assert_eq!(
            flow.step(),
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting))
        );
        flow
    }

    fn admin_at_tasks() -> OnboardingFlow {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Administrative));
        flow.set_name("Sam");
        assert!(flow.advance().is_applied());
        flow.select_category(AdminCategory::Operations);
        assert!(flow.advance().is_applied());
        assert!(flow.select_domain("Claims Review").is_applied());
        assert!(flow.advance().is_applied());
        assert_eq!(flow.step(), Step::Administrative(AdminStep::Tasks));
        flow
    }

    fn completed(flow: &mut OnboardingFlow) -> Preferences {
        match flow.complete().unwrap() {
            Completion::Completed(prefs) => prefs,
            Completion::Rejected(r) => panic!("expected completion, got {r}"),
        }
    }

    #[test]
    fn preset_track_starts_on_profile() {
        let flow = OnboardingFlow::with_defaults(Some(Track::Patient));
        assert_eq!(flow.step(), Step::Profile);
        assert_eq!(flow.track(), Some(Track::Patient));

        let flow = OnboardingFlow::with_defaults(None);
        assert_eq!(flow.step(), Step::Fork);
        assert_eq!(flow.track(), None);
    }

    #[test]
    fn advance_without_name_is_rejected() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Clinical));
        let before = flow.draft().clone();
        let outcome = flow.advance();
        assert_eq!(
            outcome.rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::Name
            })
        );
        assert_eq!(flow.step(), Step::Profile);
        assert_eq!(flow.draft(), &before);

        flow.set_name("   ");
        assert!(!flow.advance().is_applied());
    }

    #[test]
    fn clinical_full_walk() {
        let mut flow = clinical_at_focus("MD / DO");
        assert!(flow.toggle_focus_area("Cardiology").is_applied());
        assert!(flow.toggle_focus_area("OB/GYN").is_applied());
        assert!(flow.confirm_focus_areas().is_applied());
        assert!(flow.select_country("Canada").is_applied());
        assert!(flow.advance().is_applied());
        assert_eq!(flow.step(), Step::Clinical(ClinicalStep::Review));

        let prefs = completed(&mut flow);
        assert_eq!(prefs.credential_tier(), CredentialTier::FullProvider);
        assert_eq!(prefs.track(), Track::Clinical);
        assert_eq!(prefs.country(), "Canada");
        assert_eq!(prefs.depth(), Depth::Detailed);
        assert_eq!(prefs.focus_areas().len(), 2);
        assert!(flow.is_finished());
    }

    #[test]
    fn role_and_depth_steps_need_a_choice() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Clinical));
        flow.set_name("Alex");
        flow.advance();
        assert_eq!(
            flow.advance().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::Role
            })
        );
        assert!(!flow.select_role("Astronaut").is_applied());
        assert!(flow.draft().credential.is_none());
        flow.select_role("DC");
        flow.advance();
        assert_eq!(
            flow.advance().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::Depth
            })
        );
    }

    #[test]
    fn focus_confirmation_needs_a_selection() {
        let mut flow = clinical_at_focus("NP");
        assert_eq!(
            flow.confirm_focus_areas().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::FocusAreas
            })
        );
        // Cannot skip confirmation with advance
        flow.toggle_focus_area("Oncology");
        assert_eq!(
            flow.advance().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::FocusConfirmed
            })
        );
    }

    #[test]
    fn focus_toggle_removes_and_validates() {
        let mut flow = clinical_at_focus("RN");
        assert!(flow.toggle_focus_area("Critical Care / ICU").is_applied());
        assert!(flow.draft().focus_areas.contains("Critical Care / ICU"));
        assert!(flow.toggle_focus_area("Critical Care / ICU").is_applied());
        assert!(flow.draft().focus_areas.is_empty());
        // Physician-only specialty is not offered to RNs
        assert!(!flow.toggle_focus_area("Neurosurgery").is_applied());
        assert!(flow.draft().focus_areas.is_empty());
    }

    #[test]
    fn edit_returns_to_selecting_keeping_selection() {
        let mut flow = clinical_at_focus("PA");
        flow.toggle_focus_area("Dermatology");
        flow.confirm_focus_areas();
        // Toggling is locked while confirmed
        assert!(!flow.toggle_focus_area("Urgent Care").is_applied());
        assert!(flow.edit_focus_areas().is_applied());
        assert_eq!(
            flow.step(),
            Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting))
        );
        assert!(flow.draft().focus_areas.contains("Dermatology"));
        // Country is only chosen once confirmed
        assert!(!flow.select_country("Australia").is_applied());
    }

    #[test]
    fn unknown_country_is_rejected() {
        let mut flow = clinical_at_focus("MD / DO");
        flow.toggle_focus_area("Psychiatry");
        flow.confirm_focus_areas();
        assert!(!flow.select_country("Atlantis").is_applied());
        assert_eq!(flow.draft().country, "United States");
    }

    #[test]
    fn search_is_scoped_to_role() {
        let flow = clinical_at_focus("NP");
        let names: Vec<&str> = flow.search_specialties("cardio").iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Cardiology", "Pediatric Cardiology"]);
        assert_eq!(flow.top_chips()[7], "Oncology");

        let fork = OnboardingFlow::with_defaults(None);
        assert!(fork.search_specialties("cardio").is_empty());
    }

    #[test]
    fn admin_domain_is_always_a_singleton() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Administrative));
        flow.set_name("Sam");
        flow.advance();
        flow.select_category(AdminCategory::Operations);
        flow.advance();
        assert!(flow.select_domain("Claims Review").is_applied());
        assert!(flow.select_domain("Credentialing").is_applied());
        assert_eq!(flow.draft().focus_areas.len(), 1);
        assert!(flow.draft().focus_areas.contains("Credentialing"));
        assert_eq!(flow.draft().credential.as_deref(), Some(ADMINISTRATIVE_CREDENTIAL));

        // Domain outside the category is refused
        assert!(!flow.select_domain("Epidemiology").is_applied());
        assert!(flow.draft().focus_areas.contains("Credentialing"));
    }

    #[test]
    fn admin_category_change_invalidates_stale_domain() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Administrative));
        flow.set_name("Sam");
        flow.advance();
        flow.select_category(AdminCategory::Operations);
        flow.advance();
        flow.select_domain("Claims Review");
        flow.back();
        flow.select_category(AdminCategory::PublicHealthResearch);
        flow.advance();
        assert_eq!(
            flow.advance().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::Domain
            })
        );
        let names: Vec<&str> = flow.search_specialties("research").iter().map(|s| s.name).collect();
        assert_eq!(names[0], "Clinical Research");
    }

    #[test]
    fn tasks_are_capped_at_two() {
        let mut flow = admin_at_tasks();
        assert_eq!(
            flow.advance().rejection(),
            Some(&Rejection::MissingInput {
                requirement: Requirement::Tasks
            })
        );
        assert!(flow.toggle_task(ADMIN_TASKS[0]).is_applied());
        assert!(flow.toggle_task(ADMIN_TASKS[1]).is_applied());
        assert_eq!(
            flow.toggle_task(ADMIN_TASKS[2]).rejection(),
            Some(&Rejection::TaskLimitReached)
        );
        assert_eq!(flow.draft().tasks.len(), 2);

        // Deselect then the third fits
        assert!(flow.toggle_task(ADMIN_TASKS[0]).is_applied());
        assert!(flow.toggle_task(ADMIN_TASKS[2]).is_applied());
        assert_eq!(flow.draft().tasks, vec![ADMIN_TASKS[1], ADMIN_TASKS[2]]);

        assert!(!flow.toggle_task("Make coffee").is_applied());
        assert!(flow.advance().is_applied());
        let prefs = completed(&mut flow);
        assert_eq!(prefs.credential_tier(), CredentialTier::Admin);
        assert_eq!(prefs.credential(), Some(ADMINISTRATIVE_CREDENTIAL));
    }

    #[test]
    fn patient_intent_sets_credential_and_depth() {
        let mut flow = OnboardingFlow::with_defaults(None);
        flow.choose_track(Track::Patient);
        flow.set_name("Riley");
        assert!(!flow.set_institution("Mayo Clinic").is_applied());
        flow.advance();
        assert!(!flow.select_intent("Sightseeing").is_applied());
        assert!(flow.select_intent("Medications").is_applied());
        assert_eq!(flow.draft().credential.as_deref(), Some(PATIENT_CREDENTIAL));
        assert_eq!(flow.draft().depth, Some(Depth::Fast));
        assert!(flow.advance().is_applied());
        assert!(flow.step().is_terminal());

        let prefs = completed(&mut flow);
        assert_eq!(prefs.credential_tier(), CredentialTier::Patient);
        assert_eq!(prefs.intent(), Some("Medications"));
        assert!(prefs.institution().is_none());
    }

    #[test]
    fn back_from_profile_clears_track() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Clinical));
        flow.set_name("Alex");
        assert!(flow.back().is_applied());
        assert_eq!(flow.step(), Step::Fork);
        assert_eq!(flow.track(), None);
        assert_eq!(flow.draft().name, "Alex");
        assert_eq!(flow.back().rejection(), Some(&Rejection::AtStart));
    }

    #[test]
    fn back_within_branch_preserves_answers() {
        let mut flow = clinical_at_focus("MD / DO");
        flow.toggle_focus_area("Radiology");
        assert!(flow.back().is_applied());
        assert_eq!(flow.step(), Step::Clinical(ClinicalStep::Depth));
        assert!(flow.back().is_applied());
        assert_eq!(flow.step(), Step::Clinical(ClinicalStep::Role));
        assert_eq!(flow.draft().credential.as_deref(), Some("MD / DO"));
        assert_eq!(flow.draft().depth, Some(Depth::Detailed));
        assert!(flow.draft().focus_areas.contains("Radiology"));

        // Walk forward again without re-entering anything
        assert!(flow.advance().is_applied());
        assert!(flow.advance().is_applied());
        assert!(flow.confirm_focus_areas().is_applied());
    }

    #[test]
    fn switching_track_drops_other_branch_answers() {
        let mut flow = clinical_at_focus("MD / DO");
        flow.toggle_focus_area("Radiology");
        for _ in 0..4 {
            flow.back();
        }
        assert_eq!(flow.step(), Step::Fork);
        flow.choose_track(Track::Administrative);
        assert!(flow.draft().focus_areas.is_empty());
        assert!(flow.draft().credential.is_none());
        assert_eq!(flow.draft().name, "Dr. Jordan Smith");
    }

    #[test]
    fn rechoosing_same_track_keeps_answers() {
        let mut flow = OnboardingFlow::with_defaults(None);
        flow.choose_track(Track::Clinical);
        flow.set_name("Alex");
        flow.advance();
        flow.select_role("RN");
        flow.back();
        flow.back();
        flow.choose_track(Track::Clinical);
        assert_eq!(flow.draft().credential.as_deref(), Some("RN"));
    }

    #[test]
    fn complete_off_review_step_is_rejected() {
        let mut flow = clinical_at_focus("DC");
        let before = flow.draft().clone();
        assert_eq!(
            flow.complete().unwrap(),
            Completion::Rejected(Rejection::NotTerminal {
                step: Step::Clinical(ClinicalStep::FocusAreas(FocusSubstate::Selecting))
            })
        );
        assert_eq!(flow.draft(), &before);
        assert!(!flow.is_finished());
    }

    #[test]
    fn complete_without_track_is_a_configuration_error() {
        let mut flow = OnboardingFlow::with_defaults(None);
        assert_eq!(flow.complete(), Err(ConfigurationError::TrackUnset));
        assert!(!flow.is_finished());
        assert_eq!(flow.step(), Step::Fork);
    }

    #[test]
    fn finished_flow_rejects_everything() {
        let mut flow = OnboardingFlow::with_defaults(Some(Track::Patient));
        flow.set_name("Riley");
        flow.advance();
        flow.select_intent("Understand results");
        flow.advance();
        completed(&mut flow);

        assert_eq!(flow.complete().unwrap(), Completion::Rejected(Rejection::Finished));
        assert_eq!(flow.back().rejection(), Some(&Rejection::Finished));
        assert_eq!(flow.advance().rejection(), Some(&Rejection::Finished));
        assert_eq!(
            flow.select_intent("Medications").rejection(),
            Some(&Rejection::Finished)
        );
    }

    #[test]
    fn wrong_step_actions_are_rejected() {
        let mut flow = OnboardingFlow::with_defaults(None);
        assert!(matches!(
            flow.set_name("Alex").rejection(),
            Some(Rejection::WrongStep { .. })
        ));
        assert!(matches!(
            flow.toggle_task(ADMIN_TASKS[0]).rejection(),
            Some(Rejection::WrongStep { .. })
        ));
        assert!(flow.draft().name.is_empty());
    }

    #[test]
    fn actions_dispatch_from_json() {
        let mut flow = OnboardingFlow::with_defaults(None);
        let actions = [
            r#"{"action": "choose_track", "track": "patient"}"#,
            r#"{"action": "set_name", "name": "Riley"}"#,
            r#"{"action": "advance"}"#,
            r#"{"action": "select_intent", "intent": "Insurance and costs"}"#,
            r#"{"action": "advance"}"#,
        ];
        for raw in actions {
            let action: OnboardingAction = serde_json::from_str(raw).unwrap();
            assert!(flow.apply(action).is_applied(), "{raw}");
        }
        assert_eq!(flow.step(), Step::Patient(PatientStep::Review));
        let status = flow.status();
        assert!(status.can_complete);
        assert_eq!(status.step_index, 3);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = Outcome::Rejected {
            rejection: Rejection::TaskLimitReached,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["rejection"]["kind"], "task_limit_reached");
    }
}
