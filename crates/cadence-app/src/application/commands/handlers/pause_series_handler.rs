use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::{AssignmentRepository, CheckInAssignment, PauseEngine};
use cadence_domain::events::{EventBus, SeriesPaused, SeriesResumed};
use cadence_domain::shared::{CoachId, DomainError, FormId};

fn authorize_coach(
    series: &[CheckInAssignment],
    acting_coach_id: &str,
) -> Result<(), DomainError> {
    let coach = CoachId::from_string(acting_coach_id);
    if series.iter().any(|a| a.coach_id() != &coach) {
        return Err(DomainError::PermissionDenied(
            "Only the assigned coach may pause or resume this series".to_string(),
        ));
    }
    Ok(())
}

/// Pauses a whole series: the engine shifts due dates in memory, the
/// repository persists every touched row in one transaction.
pub struct PauseSeriesCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
}

impl PauseSeriesCommandHandler {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepository>,
        resolver: Arc<IdentityResolver>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            assignment_repo,
            resolver,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<PauseSeriesCommand> for PauseSeriesCommandHandler {
    type Result = PauseSeriesResult;

    async fn handle(&self, cmd: PauseSeriesCommand) -> Result<Self::Result, DomainError> {
        let aliases = self.resolver.resolve(&cmd.client_ref).await?;
        let form_id = FormId::from_string(&cmd.form_id);

        let series = self
            .assignment_repo
            .find_by_series(aliases.ids(), &form_id)
            .await?;
        authorize_coach(&series, &cmd.acting_coach_id)?;

        let now = Utc::now();
        let outcome = PauseEngine::pause(series, cmd.pause_weeks, now)?;
        self.assignment_repo.save_all(&outcome.touched).await?;

        info!(
            "Paused series {} for {} week(s), {} assignment(s) shifted",
            cmd.form_id, cmd.pause_weeks, outcome.updated_count
        );

        let event = SeriesPaused {
            client_id: aliases.client.id().clone(),
            form_id,
            pause_weeks: cmd.pause_weeks,
            pause_end: outcome.pause_end,
            updated_count: outcome.updated_count,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(PauseSeriesResult {
            updated_count: outcome.updated_count,
            pause_end: outcome.pause_end,
        })
    }
}

/// Reverses the most recent pause on a series.
pub struct UnpauseSeriesCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
}

impl UnpauseSeriesCommandHandler {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepository>,
        resolver: Arc<IdentityResolver>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            assignment_repo,
            resolver,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<UnpauseSeriesCommand> for UnpauseSeriesCommandHandler {
    type Result = UnpauseSeriesResult;

    async fn handle(&self, cmd: UnpauseSeriesCommand) -> Result<Self::Result, DomainError> {
        let aliases = self.resolver.resolve(&cmd.client_ref).await?;
        let form_id = FormId::from_string(&cmd.form_id);

        let series = self
            .assignment_repo
            .find_by_series(aliases.ids(), &form_id)
            .await?;
        authorize_coach(&series, &cmd.acting_coach_id)?;

        let now = Utc::now();
        let outcome = PauseEngine::unpause(series, now)?;
        self.assignment_repo.save_all(&outcome.touched).await?;

        info!(
            "Resumed series {}, {} assignment(s) shifted back",
            cmd.form_id, outcome.updated_count
        );

        let event = SeriesResumed {
            client_id: aliases.client.id().clone(),
            form_id,
            updated_count: outcome.updated_count,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(UnpauseSeriesResult {
            updated_count: outcome.updated_count,
        })
    }
}
