use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{ScoringThresholds, ThresholdProfile};
use crate::shared::{ClientId, CoachId, DomainError};

/// A coached client. The same logical client may be referenced either by
/// this document id or by the auth-provider id; callers resolve both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    auth_id: Option<String>,
    coach_id: CoachId,
    name: String,
    threshold_profile: ThresholdProfile,
    threshold_override: Option<ScoringThresholds>,
    created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: String, coach_id: CoachId) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Client name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: ClientId::new(),
            auth_id: None,
            coach_id,
            name: name.trim().to_string(),
            threshold_profile: ThresholdProfile::Moderate,
            threshold_override: None,
            created_at: Utc::now(),
        })
    }

    /// Reconstruct from persistence
    pub fn restore(
        id: ClientId,
        auth_id: Option<String>,
        coach_id: CoachId,
        name: String,
        threshold_profile: ThresholdProfile,
        threshold_override: Option<ScoringThresholds>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            auth_id,
            coach_id,
            name,
            threshold_profile,
            threshold_override,
            created_at,
        }
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn auth_id(&self) -> Option<&str> {
        self.auth_id.as_deref()
    }

    pub fn coach_id(&self) -> &CoachId {
        &self.coach_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold_profile(&self) -> ThresholdProfile {
        self.threshold_profile
    }

    pub fn threshold_override(&self) -> Option<ScoringThresholds> {
        self.threshold_override
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn link_auth_id(&mut self, auth_id: String) -> Result<(), DomainError> {
        if auth_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Auth id cannot be empty".to_string(),
            ));
        }
        self.auth_id = Some(auth_id.trim().to_string());
        Ok(())
    }

    pub fn set_profile(&mut self, profile: ThresholdProfile) {
        self.threshold_profile = profile;
    }

    /// Explicit thresholds win over the profile; validation happened when
    /// the [`ScoringThresholds`] value was constructed.
    pub fn set_threshold_override(&mut self, thresholds: Option<ScoringThresholds>) {
        self.threshold_override = thresholds;
    }

    /// Thresholds this client's scores classify against: the explicit
    /// override, else the profile default, else Moderate.
    pub fn resolved_thresholds(&self) -> ScoringThresholds {
        self.threshold_override
            .or_else(|| self.threshold_profile.default_thresholds())
            .or_else(|| ThresholdProfile::Moderate.default_thresholds())
            .expect("Moderate profile always carries defaults")
    }
}
