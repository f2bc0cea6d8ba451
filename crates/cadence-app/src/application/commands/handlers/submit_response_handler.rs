use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::events::{EventBus, ResponseSubmitted};
use cadence_domain::shared::{AssignmentId, DomainError, ResponseId};

pub struct SubmitResponseCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
}

impl SubmitResponseCommandHandler {
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
impl CommandHandler<SubmitResponseCommand> for SubmitResponseCommandHandler {
    type Result = SubmitResponseResult;

    async fn handle(&self, cmd: SubmitResponseCommand) -> Result<Self::Result, DomainError> {
        let aliases = self.resolver.resolve(&cmd.client_ref).await?;

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

        // The stored client id may be either alias of the caller
        if aliases.matching(assignment.client_id()).is_none() {
            return Err(DomainError::PermissionDenied(
                "Only the assigned client may submit this check-in".to_string(),
            ));
        }

        let now = Utc::now();
        assignment.submit(ResponseId::from_string(&cmd.response_id), now)?;
        self.assignment_repo.save(&assignment).await?;

        info!(
            "Response {} submitted for assignment {}",
            cmd.response_id, cmd.assignment_id
        );

        let event = ResponseSubmitted {
            assignment_id: assignment.id().clone(),
            client_id: assignment.client_id().clone(),
            response_id: ResponseId::from_string(&cmd.response_id),
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(SubmitResponseResult {
            assignment_id: cmd.assignment_id,
            completed_at: now,
        })
    }
}
