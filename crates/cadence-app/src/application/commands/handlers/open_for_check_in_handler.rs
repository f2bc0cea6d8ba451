use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::events::{EventBus, ExtensionGranted};
use cadence_domain::shared::{AssignmentId, CoachId, DomainError};

/// Coach override that reopens a missed or overdue check-in by granting
/// an extension on the single occurrence.
pub struct OpenForCheckInCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl OpenForCheckInCommandHandler {
    pub fn new(assignment_repo: Arc<dyn AssignmentRepository>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            assignment_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<OpenForCheckInCommand> for OpenForCheckInCommandHandler {
    type Result = OpenForCheckInResult;

    async fn handle(&self, cmd: OpenForCheckInCommand) -> Result<Self::Result, DomainError> {
        let assignment_id = AssignmentId::from_string(&cmd.assignment_id);
        let mut assignment = self
            .assignment_repo
            .find_by_id(&assignment_id)
            .await?
            .ok_or_else(|| {
                DomainError::AssignmentNotFound(format!(
                    "Assignment {} not found",
                    cmd.assignment_id
                ))
            })?;

        if !cmd.is_admin && assignment.coach_id() != &CoachId::from_string(&cmd.acting_user_id) {
            return Err(DomainError::PermissionDenied(
                "Only the assigned coach may open this check-in".to_string(),
            ));
        }

        let now = Utc::now();
        assignment.grant_extension(cmd.reason.clone(), now)?;
        self.assignment_repo.save(&assignment).await?;

        info!(
            "{} opened assignment {} for check-in",
            cmd.acting_user_id, cmd.assignment_id
        );

        let event = ExtensionGranted {
            assignment_id: assignment.id().clone(),
            client_id: assignment.client_id().clone(),
            granted_by: cmd.acting_user_id,
            reason: cmd.reason,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(OpenForCheckInResult {
            assignment_id: cmd.assignment_id,
        })
    }
}
