/// E2E Test: Error Scenarios
///
/// This test validates error handling across the full stack:
/// 1. Assignment not found
/// 2. Invalid domain input never reaches storage
/// 3. Duplicate occurrence constraint violations
/// 4. Corrupt stored JSON surfaces as a serialization error
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use cadence_domain::assignment::{AssignmentRepository, CheckInAssignment};
use cadence_domain::shared::{AssignmentId, ClientId, CoachId, DomainError, FormId};
use cadence_infrastructure::persistence::repositories::SqliteAssignmentRepository;


fn sample(week: u32) -> CheckInAssignment {
    CheckInAssignment::new(
        ClientId::from_string("client-1"),
        CoachId::from_string("coach-1"),
        FormId::from_string("form-1"),
        "Weekly Reflection".to_string(),
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
            + chrono::Duration::weeks(week as i64 - 1),
        week,
        12,
        true,
    )
    .expect("valid assignment")
}

#[tokio::test]
async fn e2e_error_assignment_not_found() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteAssignmentRepository::new(Arc::new(pool));

    let fake_id = AssignmentId::from_string("non-existent-assignment-id");
    let result = repo.find_by_id(&fake_id).await;

    assert!(result.is_ok(), "Query should succeed");
    assert!(result.unwrap().is_none(), "Assignment should not exist");

    println!("✓ Assignment not found handled correctly");
}

#[tokio::test]
async fn e2e_error_invalid_assignment_never_stored() {
    // Validation happens at construction, before any repository call
    let empty_title = CheckInAssignment::new(
        ClientId::from_string("client-1"),
        CoachId::from_string("coach-1"),
        FormId::from_string("form-1"),
        "   ".to_string(),
        Utc::now(),
        1,
        12,
        true,
    );
    assert!(matches!(empty_title, Err(DomainError::Validation(_))));

    let week_out_of_range = CheckInAssignment::new(
        ClientId::from_string("client-1"),
        CoachId::from_string("coach-1"),
        FormId::from_string("form-1"),
        "Weekly Reflection".to_string(),
        Utc::now(),
        13,
        12,
        true,
    );
    assert!(matches!(week_out_of_range, Err(DomainError::Validation(_))));

    println!("✓ Invalid domain input rejected before storage");
}

#[tokio::test]
async fn e2e_error_duplicate_occurrence_is_conflict() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteAssignmentRepository::new(Arc::new(pool));

    repo.save(&sample(1)).await.expect("save first");

    let duplicate = sample(1);
    let result = repo.save(&duplicate).await;

    let err = result.expect_err("duplicate week must be rejected");
    assert!(matches!(err, DomainError::Conflict(_)));
    assert!(err.is_recoverable(), "caller can retry with the stored row");

    println!("✓ Duplicate occurrence rejected as conflict");
}

#[tokio::test]
async fn e2e_error_corrupt_pause_history_fails_loudly() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteAssignmentRepository::new(Arc::new(pool.clone()));

    let assignment = sample(1);
    repo.save(&assignment).await.expect("save");

    // Corrupt the JSON column behind the repository's back
    sqlx::query("UPDATE assignments SET pause_history = 'not json' WHERE id = ?1")
        .bind(assignment.id().as_str())
        .execute(&pool)
        .await
        .expect("corrupt row");

    let result = repo.find_by_id(assignment.id()).await;
    assert!(matches!(result, Err(DomainError::Serialization(_))));

    println!("✓ Corrupt stored JSON surfaces as serialization error");
}
