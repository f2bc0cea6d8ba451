use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::events::{AssignmentMissed, EventBus};
use cadence_domain::shared::{AssignmentId, ClientId, DomainError};

pub struct MarkMissedCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
}

impl MarkMissedCommandHandler {
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
impl CommandHandler<MarkMissedCommand> for MarkMissedCommandHandler {
    type Result = MarkMissedResult;

    async fn handle(&self, cmd: MarkMissedCommand) -> Result<Self::Result, DomainError> {
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

        // Act under whichever alias the assignment is stored against so
        // the aggregate's ownership check sees the right id
        let actor: ClientId = aliases
            .matching(assignment.client_id())
            .cloned()
            .unwrap_or_else(|| aliases.client.id().clone());

        let now = Utc::now();
        assignment.mark_missed(&actor, cmd.reason, cmd.comment, now)?;
        self.assignment_repo.save(&assignment).await?;

        info!(
            "Assignment {} marked missed ({})",
            cmd.assignment_id,
            cmd.reason.as_str()
        );

        let event = AssignmentMissed {
            assignment_id: assignment.id().clone(),
            client_id: assignment.client_id().clone(),
            reason: cmd.reason,
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(MarkMissedResult {
            assignment_id: cmd.assignment_id,
        })
    }
}
