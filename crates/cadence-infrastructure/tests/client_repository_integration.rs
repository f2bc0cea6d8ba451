use std::sync::Arc;

use cadence_domain::client::{Client, ClientRepository};
use cadence_domain::scoring::{ScoringThresholds, ThresholdProfile};
use cadence_domain::shared::CoachId;
use cadence_infrastructure::persistence::repositories::SqliteClientRepository;


#[tokio::test]
async fn client_repo_save_find_and_alias_lookup() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteClientRepository::new(Arc::new(pool));

    let mut client = Client::new("Avery".to_string(), CoachId::from_string("coach-1"))
        .expect("create client");
    client.link_auth_id("auth|42".to_string()).expect("link");

    repo.save(&client).await.expect("save");

    let by_id = repo
        .find_by_id(client.id())
        .await
        .expect("find by id")
        .expect("should exist");
    assert_eq!(by_id.name(), "Avery");
    assert_eq!(by_id.auth_id(), Some("auth|42"));

    let by_auth = repo
        .find_by_auth_id("auth|42")
        .await
        .expect("find by auth id")
        .expect("should exist");
    assert_eq!(by_auth.id(), client.id());

    assert!(repo
        .find_by_auth_id("auth|nobody")
        .await
        .expect("find missing")
        .is_none());
}

#[tokio::test]
async fn client_repo_thresholds_round_trip() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteClientRepository::new(Arc::new(pool));

    let mut client = Client::new("Jordan".to_string(), CoachId::from_string("coach-1"))
        .expect("create client");
    client.set_profile(ThresholdProfile::Custom);
    client.set_threshold_override(Some(ScoringThresholds::new(25.0, 70.0).unwrap()));

    repo.save(&client).await.expect("save");

    let fetched = repo
        .find_by_id(client.id())
        .await
        .expect("find")
        .expect("should exist");

    assert_eq!(fetched.threshold_profile(), ThresholdProfile::Custom);
    let resolved = fetched.resolved_thresholds();
    assert_eq!(resolved.red_max(), 25.0);
    assert_eq!(resolved.orange_max(), 70.0);

    // Clearing the override persists too
    let mut fetched = fetched;
    fetched.set_threshold_override(None);
    fetched.set_profile(ThresholdProfile::Lifestyle);
    repo.save(&fetched).await.expect("save again");

    let reloaded = repo
        .find_by_id(client.id())
        .await
        .expect("find")
        .expect("should exist");
    assert_eq!(reloaded.threshold_profile(), ThresholdProfile::Lifestyle);
    assert!(reloaded.threshold_override().is_none());
}

#[tokio::test]
async fn client_repo_find_by_coach() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteClientRepository::new(Arc::new(pool));

    for name in ["Avery", "Jordan", "Sam"] {
        let client = Client::new(name.to_string(), CoachId::from_string("coach-1"))
            .expect("create client");
        repo.save(&client).await.expect("save");
    }
    let outsider = Client::new("Riley".to_string(), CoachId::from_string("coach-2"))
        .expect("create client");
    repo.save(&outsider).await.expect("save outsider");

    let roster = repo.find_by_coach("coach-1").await.expect("find by coach");
    assert_eq!(roster.len(), 3);
    assert!(roster.iter().all(|c| c.coach_id().as_str() == "coach-1"));
}
