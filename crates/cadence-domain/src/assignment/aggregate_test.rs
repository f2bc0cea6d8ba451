#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::super::aggregate::CheckInAssignment;
    use super::super::value_objects::{AssignmentStatus, DisplayStatus, MissedReason};
    use crate::shared::{ClientId, CoachId, DomainError, FormId, ResponseId};
    use crate::window::{CheckInWindow, WindowEvaluator};

    fn at(s: &str) -> DateTime<Utc> {
        format!("{}:00Z", s).parse().unwrap()
    }

    /// Due Monday 2026-01-05 09:00, week 1 of a 6-week series
    fn pending_assignment() -> CheckInAssignment {
        CheckInAssignment::new(
            ClientId::from_string("client-1"),
            CoachId::from_string("coach-1"),
            FormId::from_string("form-1"),
            "Weekly Reflection".to_string(),
            at("2026-01-05T09:00"),
            1,
            6,
            true,
        )
        .unwrap()
    }

    fn client() -> ClientId {
        ClientId::from_string("client-1")
    }

    #[test]
    fn test_new_validates_inputs() {
        let make = |title: &str, week: u32, total: u32| {
            CheckInAssignment::new(
                client(),
                CoachId::from_string("coach-1"),
                FormId::from_string("form-1"),
                title.to_string(),
                at("2026-01-05T09:00"),
                week,
                total,
                true,
            )
        };
        assert!(make("Weekly Reflection", 1, 6).is_ok());
        assert!(make("  ", 1, 6).is_err());
        assert!(make("Weekly Reflection", 0, 6).is_err());
        assert!(make("Weekly Reflection", 7, 6).is_err());
    }

    #[test]
    fn test_submit_completes_assignment() {
        let mut assignment = pending_assignment();
        let response = ResponseId::new();

        assignment.submit(response.clone(), at("2026-01-05T08:00")).unwrap();

        assert_eq!(assignment.status(), AssignmentStatus::Completed);
        assert_eq!(assignment.response_id(), Some(&response));
        assert_eq!(assignment.completed_at(), Some(at("2026-01-05T08:00")));
    }

    #[test]
    fn test_resubmission_is_rejected() {
        let mut assignment = pending_assignment();
        assignment.submit(ResponseId::new(), at("2026-01-05T08:00")).unwrap();

        let result = assignment.submit(ResponseId::new(), at("2026-01-05T09:00"));
        assert!(matches!(result, Err(DomainError::AlreadyCompleted(_))));
    }

    #[test]
    fn test_submit_allowed_from_missed() {
        let mut assignment = pending_assignment();
        assignment
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-01-09T09:00"))
            .unwrap();

        assignment.submit(ResponseId::new(), at("2026-01-10T09:00")).unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::Completed);
    }

    #[test]
    fn test_completion_is_terminal() {
        let mut assignment = pending_assignment();
        assignment.submit(ResponseId::new(), at("2026-01-05T08:00")).unwrap();

        assert!(assignment
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-02-01T00:00"))
            .is_err());
        assert!(assignment.request_reopen(&client(), at("2026-02-01T00:00")).is_err());
        assert!(assignment.grant_extension(None, at("2026-02-01T00:00")).is_err());
        assert!(assignment.shift_due_date(7).is_err());
    }

    #[test]
    fn test_mark_missed_requires_owning_client() {
        let mut assignment = pending_assignment();
        let stranger = ClientId::from_string("client-2");

        let result =
            assignment.mark_missed(&stranger, MissedReason::Sick, None, at("2026-01-09T09:00"));
        assert!(matches!(result, Err(DomainError::PermissionDenied(_))));
    }

    #[test]
    fn test_mark_missed_three_day_boundary() {
        // Due 2026-01-05 09:00; 2 days 23 hours later is too early
        let mut assignment = pending_assignment();
        let result = assignment.mark_missed(
            &client(),
            MissedReason::Sick,
            None,
            at("2026-01-08T08:00"),
        );
        assert!(matches!(result, Err(DomainError::InvalidState(_))));

        // Exactly 3 days after the due date is accepted
        let mut assignment = pending_assignment();
        assignment
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-01-08T09:00"))
            .unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::Missed);
        assert_eq!(assignment.missed_reason(), Some(MissedReason::Sick));
        assert_eq!(assignment.missed_at(), Some(at("2026-01-08T09:00")));
    }

    #[test]
    fn test_mark_missed_other_requires_comment() {
        let mut assignment = pending_assignment();
        let result = assignment.mark_missed(
            &client(),
            MissedReason::Other,
            None,
            at("2026-01-09T09:00"),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = assignment.mark_missed(
            &client(),
            MissedReason::Other,
            Some("  ".to_string()),
            at("2026-01-09T09:00"),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));

        assignment
            .mark_missed(
                &client(),
                MissedReason::Other,
                Some("family matter".to_string()),
                at("2026-01-09T09:00"),
            )
            .unwrap();
        assert_eq!(assignment.missed_comment(), Some("family matter"));
    }

    #[test]
    fn test_mark_missed_twice_is_rejected() {
        let mut assignment = pending_assignment();
        assignment
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-01-09T09:00"))
            .unwrap();

        let result =
            assignment.mark_missed(&client(), MissedReason::Sick, None, at("2026-01-10T09:00"));
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_grant_extension_reopens_missed() {
        let mut assignment = pending_assignment();
        assignment
            .mark_missed(&client(), MissedReason::Traveling, None, at("2026-01-09T09:00"))
            .unwrap();

        assignment
            .grant_extension(Some("travel week".to_string()), at("2026-01-10T10:00"))
            .unwrap();

        assert_eq!(assignment.status(), AssignmentStatus::Pending);
        assert!(assignment.extension_granted());
        assert_eq!(assignment.extension_reason(), Some("travel week"));
        // Miss audit fields are retained
        assert_eq!(assignment.missed_reason(), Some(MissedReason::Traveling));
    }

    #[test]
    fn test_request_reopen_on_missed() {
        let mut assignment = pending_assignment();
        assignment
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-01-09T09:00"))
            .unwrap();

        assignment.request_reopen(&client(), at("2026-01-10T09:00")).unwrap();
        assert_eq!(assignment.reopen_requested_at(), Some(at("2026-01-10T09:00")));
        // Status does not change on a reopen request
        assert_eq!(assignment.status(), AssignmentStatus::Missed);
    }

    #[test]
    fn test_request_reopen_rejected_while_still_open() {
        let mut assignment = pending_assignment();
        let result = assignment.request_reopen(&client(), at("2026-01-04T09:00"));
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_request_reopen_on_overdue_without_extension() {
        let mut assignment = pending_assignment();
        assignment.request_reopen(&client(), at("2026-01-06T09:00")).unwrap();
        assert!(assignment.reopen_requested_at().is_some());
    }

    #[test]
    fn test_request_reopen_rejected_once_extension_granted() {
        let mut assignment = pending_assignment();
        assignment.grant_extension(None, at("2026-01-06T09:00")).unwrap();

        let result = assignment.request_reopen(&client(), at("2026-01-07T09:00"));
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_request_reopen_requires_owning_client() {
        let mut assignment = pending_assignment();
        let stranger = ClientId::from_string("client-2");
        let result = assignment.request_reopen(&stranger, at("2026-01-06T09:00"));
        assert!(matches!(result, Err(DomainError::PermissionDenied(_))));
    }

    #[test]
    fn test_display_status_derivation() {
        let evaluator = WindowEvaluator::default();
        let assignment = pending_assignment();

        assert_eq!(
            assignment.display_status(&evaluator, at("2026-01-04T09:00")),
            DisplayStatus::Pending
        );
        assert_eq!(
            assignment.display_status(&evaluator, at("2026-01-06T09:00")),
            DisplayStatus::Overdue
        );

        let mut completed = pending_assignment();
        completed.submit(ResponseId::new(), at("2026-01-05T08:00")).unwrap();
        assert_eq!(
            completed.display_status(&evaluator, at("2026-02-01T00:00")),
            DisplayStatus::Completed
        );

        let mut missed = pending_assignment();
        missed
            .mark_missed(&client(), MissedReason::Sick, None, at("2026-01-09T09:00"))
            .unwrap();
        assert_eq!(
            missed.display_status(&evaluator, at("2026-01-09T10:00")),
            DisplayStatus::Overdue
        );
    }

    #[test]
    fn test_extension_suppresses_derived_overdue() {
        let evaluator = WindowEvaluator::default();
        let mut assignment = pending_assignment();
        assignment.grant_extension(None, at("2026-01-06T09:00")).unwrap();

        assert_eq!(
            assignment.display_status(&evaluator, at("2026-01-07T09:00")),
            DisplayStatus::Pending
        );
    }

    #[test]
    fn test_display_status_respects_window_still_open() {
        let evaluator = WindowEvaluator::default();
        let mut assignment = pending_assignment();
        assignment.set_window(Some(
            CheckInWindow::parse(true, "Friday", "10:00", "Monday", "22:00").unwrap(),
        ));

        // Monday 15:00: due date passed but the window runs to 22:00
        assert_eq!(
            assignment.display_status(&evaluator, at("2026-01-05T15:00")),
            DisplayStatus::Pending
        );
        // Tuesday: window closed, due passed
        assert_eq!(
            assignment.display_status(&evaluator, at("2026-01-06T08:00")),
            DisplayStatus::Overdue
        );
    }
}
