//! OnboardingManager: owns live onboarding sessions and serializes access
//! to each one.
//!
//! Every session's flow sits behind its own mutex, so at most one mutation is
//! in flight per session. Sessions never share state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::flow::{Completion, OnboardingAction, OnboardingFlow, OnboardingStatus, Outcome};
use super::model::Track;
use crate::catalog::{Specialty, SpecialtyCatalog};
use crate::config::OnboardingConfig;
use crate::error::{Result, SessionError};

/// Registry of in-progress onboarding sessions.
pub struct OnboardingManager {
    config: OnboardingConfig,
    catalog: SpecialtyCatalog,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<OnboardingFlow>>>>,
}

impl OnboardingManager {
    pub fn new(config: OnboardingConfig, catalog: SpecialtyCatalog) -> Self {
        Self {
            config,
            catalog,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Begin a new session, optionally with the track preset.
    pub async fn start(&self, initial_track: Option<Track>) -> Uuid {
        let id = Uuid::new_v4();
        let flow = OnboardingFlow::new(self.config.clone(), self.catalog, initial_track);
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(flow)));
        tracing::debug!(session = %id, ?initial_track, "Onboarding session started");
        id
    }

    /// Apply one user action to a session.
    pub async fn apply(&self, id: Uuid, action: OnboardingAction) -> Result<Outcome> {
        let session = self.session(id).await?;
        let mut flow = session.lock().await;
        Ok(flow.apply(action))
    }

    /// Catalog search in the context of a session's branch.
    pub async fn search(&self, id: Uuid, query: &str) -> Result<Vec<&'static Specialty>> {
        let session = self.session(id).await?;
        let flow = session.lock().await;
        Ok(flow.search_specialties(query))
    }

    /// Finish a session. A completed session is removed from the registry;
    /// a rejected or failed completion leaves it in place.
    pub async fn complete(&self, id: Uuid) -> Result<Completion> {
        let session = self.session(id).await?;
        let completion = {
            let mut flow = session.lock().await;
            flow.complete()?
        };
        if matches!(completion, Completion::Completed(_)) {
            self.sessions.write().await.remove(&id);
            tracing::debug!(session = %id, "Onboarding session closed");
        }
        Ok(completion)
    }

    pub async fn status(&self, id: Uuid) -> Result<OnboardingStatus> {
        let session = self.session(id).await?;
        let flow = session.lock().await;
        Ok(flow.status())
    }

    /// Drop a session without completing it. Returns whether it existed.
    pub async fn discard(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session = %id, "Onboarding session discarded");
        }
        removed
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn session(&self, id: Uuid) -> Result<Arc<Mutex<OnboardingFlow>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound { id }.into())
    }
}

impl Default for OnboardingManager {
    fn default() -> Self {
        Self::new(OnboardingConfig::default(), SpecialtyCatalog::builtin())
    }
}
