use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::events::{EventBus, ReopenRequested};
use cadence_domain::messaging::{CoachMessage, MessageSender};
use cadence_domain::shared::{AssignmentId, ClientId, DomainError};

/// Records a client's reopen request and notifies their coach.
pub struct RequestReopenCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    message_sender: Arc<dyn MessageSender>,
    event_bus: Arc<dyn EventBus>,
}

impl RequestReopenCommandHandler {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepository>,
        resolver: Arc<IdentityResolver>,
        message_sender: Arc<dyn MessageSender>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            assignment_repo,
            resolver,
            message_sender,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<RequestReopenCommand> for RequestReopenCommandHandler {
    type Result = RequestReopenResult;

    async fn handle(&self, cmd: RequestReopenCommand) -> Result<Self::Result, DomainError> {
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

        let actor: ClientId = aliases
            .matching(assignment.client_id())
            .cloned()
            .unwrap_or_else(|| aliases.client.id().clone());

        let now = Utc::now();
        assignment.request_reopen(&actor, now)?;
        self.assignment_repo.save(&assignment).await?;

        let message = CoachMessage::reopen_request(
            assignment.coach_id().clone(),
            assignment.client_id().clone(),
            aliases.client.name(),
            assignment.id().clone(),
            assignment.form_title(),
            now,
        );
        self.message_sender.send(&message).await?;

        info!(
            "Reopen requested for assignment {}, coach {} notified",
            cmd.assignment_id,
            assignment.coach_id().as_str()
        );

        let event = ReopenRequested {
            assignment_id: assignment.id().clone(),
            client_id: assignment.client_id().clone(),
            coach_id: assignment.coach_id().clone(),
            occurred_at: now,
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(RequestReopenResult {
            assignment_id: cmd.assignment_id,
            message_id: message.id().as_str().to_string(),
        })
    }
}
