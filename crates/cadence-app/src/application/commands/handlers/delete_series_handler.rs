use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::events::{EventBus, SeriesDeleted};
use cadence_domain::shared::{CoachId, DomainError, FormId};

/// Deletes a series' open occurrences. Completed check-ins stay behind so
/// submitted responses keep their assignment context.
pub struct DeleteSeriesCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
}

impl DeleteSeriesCommandHandler {
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
impl CommandHandler<DeleteSeriesCommand> for DeleteSeriesCommandHandler {
    type Result = DeleteSeriesResult;

    async fn handle(&self, cmd: DeleteSeriesCommand) -> Result<Self::Result, DomainError> {
        let aliases = self.resolver.resolve(&cmd.client_ref).await?;
        let form_id = FormId::from_string(&cmd.form_id);
        let coach_id = CoachId::from_string(&cmd.coach_id);

        let series = self
            .assignment_repo
            .find_by_series(aliases.ids(), &form_id)
            .await?;
        if series.is_empty() {
            return Err(DomainError::NotFound(format!(
                "No assignments found for series {}",
                cmd.form_id
            )));
        }

        if series.iter().any(|a| a.coach_id() != &coach_id) {
            return Err(DomainError::PermissionDenied(
                "Only the assigned coach may delete this series".to_string(),
            ));
        }

        let (completed, open): (Vec<_>, Vec<_>) =
            series.into_iter().partition(|a| a.is_completed());

        let open_ids: Vec<_> = open.iter().map(|a| a.id().clone()).collect();
        if !open_ids.is_empty() {
            self.assignment_repo.delete_all(&open_ids).await?;
        }

        info!(
            "Deleted series {}: {} removed, {} completed preserved",
            cmd.form_id,
            open_ids.len(),
            completed.len()
        );

        let event = SeriesDeleted {
            client_id: aliases.client.id().clone(),
            form_id,
            deleted_count: open_ids.len(),
            preserved_count: completed.len(),
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(DeleteSeriesResult {
            deleted_count: open_ids.len(),
            preserved_count: completed.len(),
        })
    }
}
