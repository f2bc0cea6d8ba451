use chrono::Utc;
use std::sync::Arc;

use crate::application::dtos::{AssignmentDto, AssignmentDtoMapper};
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::{AssignmentRepository, RecurrencePlanner};
use cadence_domain::shared::{DomainError, FormId};
use cadence_domain::window::WindowEvaluator;

/// Read side for check-in listings. Every row carries the derived display
/// status and window state at query time; nothing here mutates.
pub struct AssignmentQueryService {
    assignment_repo: Arc<dyn AssignmentRepository>,
    resolver: Arc<IdentityResolver>,
    evaluator: WindowEvaluator,
}

impl AssignmentQueryService {
    pub fn new(
        assignment_repo: Arc<dyn AssignmentRepository>,
        resolver: Arc<IdentityResolver>,
        evaluator: WindowEvaluator,
    ) -> Self {
        Self {
            assignment_repo,
            resolver,
            evaluator,
        }
    }

    /// "My check-ins" listing, ordered by due date
    pub async fn list_assignments(
        &self,
        client_ref: &str,
    ) -> Result<Vec<AssignmentDto>, DomainError> {
        let aliases = self.resolver.resolve(client_ref).await?;
        let mut assignments = self.assignment_repo.find_by_client(aliases.ids()).await?;
        assignments.sort_by_key(|a| a.due_date());

        let now = Utc::now();
        Ok(assignments
            .iter()
            .map(|a| {
                AssignmentDtoMapper::new(a, &self.evaluator)
                    .with_time(now)
                    .to_dto()
            })
            .collect())
    }

    /// The pending occurrence with the nearest future due date, if any
    pub async fn next_pending(
        &self,
        client_ref: &str,
        form_id: &str,
    ) -> Result<Option<AssignmentDto>, DomainError> {
        let aliases = self.resolver.resolve(client_ref).await?;
        let series = self
            .assignment_repo
            .find_by_series(aliases.ids(), &FormId::from_string(form_id))
            .await?;

        let now = Utc::now();
        Ok(RecurrencePlanner::next_pending(&series, now).map(|a| {
            AssignmentDtoMapper::new(a, &self.evaluator)
                .with_time(now)
                .to_dto()
        }))
    }
}
