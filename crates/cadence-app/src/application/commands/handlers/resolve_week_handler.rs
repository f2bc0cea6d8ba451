use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::assignment_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::{AssignmentRepository, RecurrenceKey, RecurrencePlanner};
use cadence_domain::events::{AssignmentCreated, EventBus};
use cadence_domain::shared::{DomainError, FormId};

/// Resolve-or-create handler for one week of a recurring series.
///
/// The search step always runs first; creation is reserved for week-start
/// keyed requests, which are the only ones materialized lazily.
pub struct ResolveWeekCommandHandler {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    event_bus: Arc<dyn EventBus>,
    due_hour: u32,
}

impl ResolveWeekCommandHandler {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepository>,
        resolver: Arc<IdentityResolver>,
        event_bus: Arc<dyn EventBus>,
        due_hour: u32,
    ) -> Self {
        Self {
            assignment_repo,
            resolver,
            event_bus,
            due_hour,
        }
    }
}

#[async_trait]
impl CommandHandler<ResolveWeekCommand> for ResolveWeekCommandHandler {
    type Result = ResolveWeekResult;

    async fn handle(&self, cmd: ResolveWeekCommand) -> Result<Self::Result, DomainError> {
        cmd.key.validate()?;

        let aliases = self.resolver.resolve(&cmd.client_ref).await?;
        let form_id = FormId::from_string(&cmd.form_id);

        let series = self
            .assignment_repo
            .find_by_series(aliases.ids(), &form_id)
            .await?;

        if let Some(found) = RecurrencePlanner::find_for_week(&series, &cmd.key) {
            return Ok(ResolveWeekResult {
                assignment_id: found.id().as_str().to_string(),
                created: false,
            });
        }

        let RecurrenceKey::WeekStartKeyed { week_start } = cmd.key else {
            // Due-date keyed occurrences are created up front with the
            // series, never synthesized on demand
            return Err(DomainError::AssignmentNotFound(format!(
                "No occurrence for {:?} in form {}",
                cmd.key, cmd.form_id
            )));
        };

        let template = RecurrencePlanner::template(&series).ok_or_else(|| {
            DomainError::NotFound(format!(
                "Series {} has no assignments to use as a template",
                cmd.form_id
            ))
        })?;

        let assignment = RecurrencePlanner::synthesize(template, week_start, self.due_hour)?;

        match self.assignment_repo.save(&assignment).await {
            Ok(()) => {}
            Err(DomainError::Conflict(_)) => {
                // A concurrent resolve won the race; return its row
                let series = self
                    .assignment_repo
                    .find_by_series(aliases.ids(), &form_id)
                    .await?;
                let found =
                    RecurrencePlanner::find_for_week(&series, &cmd.key).ok_or_else(|| {
                        DomainError::Conflict(format!(
                            "Occurrence for week {} exists but could not be reloaded",
                            week_start
                        ))
                    })?;
                return Ok(ResolveWeekResult {
                    assignment_id: found.id().as_str().to_string(),
                    created: false,
                });
            }
            Err(e) => return Err(e),
        }

        info!(
            "Created occurrence {} for week {} of form {}",
            assignment.id().as_str(),
            week_start,
            cmd.form_id
        );

        let event = AssignmentCreated {
            assignment_id: assignment.id().clone(),
            client_id: assignment.client_id().clone(),
            form_id,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(ResolveWeekResult {
            assignment_id: assignment.id().as_str().to_string(),
            created: true,
        })
    }
}
