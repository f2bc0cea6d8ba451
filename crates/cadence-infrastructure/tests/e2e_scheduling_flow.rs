/// E2E Test: Recurring Check-In Scheduling Flow
///
/// This test validates the core scheduling lifecycle against real storage:
/// 1. Create a client and a recurring series
/// 2. Lazily resolve a reflection week into a stored occurrence
/// 3. Submit a response
/// 4. Pause and resume the series atomically
/// 5. Reopen request delivers a message to the coach inbox
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use cadence_domain::assignment::{
    AssignmentRepository, CheckInAssignment, PauseEngine, RecurrenceKey, RecurrencePlanner,
};
use cadence_domain::client::{Client, ClientRepository};
use cadence_domain::messaging::{CoachMessage, MessageSender};
use cadence_domain::shared::{ClientId, CoachId, FormId, ResponseId};
use cadence_infrastructure::messaging::SqliteCoachInbox;
use cadence_infrastructure::persistence::repositories::{
    SqliteAssignmentRepository, SqliteClientRepository,
};


fn series_assignment(client: &ClientId, week: u32) -> CheckInAssignment {
    let due = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
        + chrono::Duration::weeks(week as i64 - 1);
    CheckInAssignment::new(
        client.clone(),
        CoachId::from_string("coach-1"),
        FormId::from_string("form-1"),
        "Weekly Reflection".to_string(),
        due,
        week,
        12,
        true,
    )
    .expect("valid assignment")
}

#[tokio::test]
async fn e2e_resolve_week_creates_exactly_one_occurrence() {
    // ============================================================
    // Setup
    // ============================================================
    let pool = test_helpers::setup_in_memory_db().await;
    let client_repo = SqliteClientRepository::new(Arc::new(pool.clone()));
    let assignment_repo = SqliteAssignmentRepository::new(Arc::new(pool.clone()));

    let client = Client::new("Avery".to_string(), CoachId::from_string("coach-1"))
        .expect("create client");
    client_repo.save(&client).await.expect("save client");

    let template = series_assignment(client.id(), 1);
    assignment_repo.save(&template).await.expect("save template");

    // ============================================================
    // Resolve a not-yet-materialized reflection week
    // ============================================================
    let week_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let key = RecurrenceKey::WeekStartKeyed { week_start };

    let series = assignment_repo
        .find_by_series(&[client.id().clone()], &FormId::from_string("form-1"))
        .await
        .expect("load series");
    assert!(RecurrencePlanner::find_for_week(&series, &key).is_none());

    let synthesized = RecurrencePlanner::synthesize(
        RecurrencePlanner::template(&series).expect("template exists"),
        week_start,
        RecurrencePlanner::DEFAULT_DUE_HOUR,
    )
    .expect("synthesize");
    assignment_repo.save(&synthesized).await.expect("save new");

    // ============================================================
    // Resolving the same week again finds the stored occurrence
    // ============================================================
    let series = assignment_repo
        .find_by_series(&[client.id().clone()], &FormId::from_string("form-1"))
        .await
        .expect("reload series");
    let found = RecurrencePlanner::find_for_week(&series, &key).expect("found");
    assert_eq!(found.id(), synthesized.id());
    assert_eq!(found.reflection_week_start(), Some(week_start));
    assert_eq!(
        found.due_date(),
        Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap()
    );

    println!("✓ Lazy week resolution is idempotent");
}

#[tokio::test]
async fn e2e_submit_then_resubmit_is_rejected() {
    let pool = test_helpers::setup_in_memory_db().await;
    let assignment_repo = SqliteAssignmentRepository::new(Arc::new(pool));

    let client = ClientId::from_string("client-1");
    let mut assignment = series_assignment(&client, 1);
    assignment_repo.save(&assignment).await.expect("save");

    let now = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
    assignment
        .submit(ResponseId::from_string("response-1"), now)
        .expect("submit");
    assignment_repo.save(&assignment).await.expect("save submitted");

    // Reload and confirm completion is terminal
    let mut loaded = assignment_repo
        .find_by_id(assignment.id())
        .await
        .expect("find")
        .expect("should exist");
    assert!(loaded.is_completed());
    assert!(loaded
        .submit(ResponseId::from_string("response-2"), now)
        .is_err());

    println!("✓ Completed check-in rejects resubmission after reload");
}

#[tokio::test]
async fn e2e_pause_and_resume_series() {
    // ============================================================
    // Setup: a three-week series, week 1 already completed
    // ============================================================
    let pool = test_helpers::setup_in_memory_db().await;
    let assignment_repo = SqliteAssignmentRepository::new(Arc::new(pool));

    let client = ClientId::from_string("client-1");
    let mut week1 = series_assignment(&client, 1);
    week1
        .submit(
            ResponseId::from_string("response-1"),
            Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
        )
        .expect("submit week 1");
    let week2 = series_assignment(&client, 2);
    let week3 = series_assignment(&client, 3);
    let original_week2_due = week2.due_date();

    assignment_repo
        .save_all(&[week1, week2, week3])
        .await
        .expect("seed series");

    // ============================================================
    // Pause two weeks
    // ============================================================
    let now = Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap();
    let form_id = FormId::from_string("form-1");

    let series = assignment_repo
        .find_by_series(&[client.clone()], &form_id)
        .await
        .expect("load series");
    let outcome = PauseEngine::pause(series, 2, now).expect("pause");
    assert_eq!(outcome.updated_count, 2);
    assignment_repo
        .save_all(&outcome.touched)
        .await
        .expect("persist pause");

    let paused = assignment_repo
        .find_by_series(&[client.clone()], &form_id)
        .await
        .expect("reload");
    let week2 = paused.iter().find(|a| a.recurring_week() == 2).unwrap();
    assert_eq!(
        week2.due_date(),
        original_week2_due + chrono::Duration::weeks(2)
    );
    let base = paused.iter().find(|a| a.recurring_week() == 1).unwrap();
    assert_eq!(base.pause_history().len(), 1);
    assert!(base.is_completed(), "completed base keeps its due date");

    // ============================================================
    // Resume: due dates return to the original schedule
    // ============================================================
    let resumed = PauseEngine::unpause(paused, now).expect("unpause");
    assignment_repo
        .save_all(&resumed.touched)
        .await
        .expect("persist resume");

    let restored = assignment_repo
        .find_by_series(&[client.clone()], &form_id)
        .await
        .expect("reload after resume");
    let week2 = restored.iter().find(|a| a.recurring_week() == 2).unwrap();
    assert_eq!(week2.due_date(), original_week2_due);
    let base = restored.iter().find(|a| a.recurring_week() == 1).unwrap();
    assert!(base.pause_history().is_empty());
    assert_eq!(base.paused_until(), None);

    println!("✓ Pause and resume round-trip through storage");
}

#[tokio::test]
async fn e2e_reopen_request_reaches_coach_inbox() {
    let pool = test_helpers::setup_in_memory_db().await;
    let assignment_repo = SqliteAssignmentRepository::new(Arc::new(pool.clone()));
    let inbox = SqliteCoachInbox::new(Arc::new(pool));

    let client = ClientId::from_string("client-1");
    let mut assignment = series_assignment(&client, 1);
    assignment_repo.save(&assignment).await.expect("save");

    // Five days past due: request a reopen and notify the coach
    let now = assignment.due_date() + chrono::Duration::days(5);
    assignment.request_reopen(&client, now).expect("request reopen");
    assignment_repo.save(&assignment).await.expect("save request");

    let message = CoachMessage::reopen_request(
        assignment.coach_id().clone(),
        client.clone(),
        "Avery",
        assignment.id().clone(),
        assignment.form_title(),
        now,
    );
    inbox.send(&message).await.expect("deliver");

    let messages = inbox
        .find_by_coach(&CoachId::from_string("coach-1"))
        .await
        .expect("read inbox");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].body().contains("Avery"));
    assert!(messages[0].body().contains("Weekly Reflection"));
    assert_eq!(messages[0].assignment_id(), assignment.id());

    println!("✓ Reopen request delivered to coach inbox");
}
