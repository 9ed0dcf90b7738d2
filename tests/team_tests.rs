mod common;

use std::sync::Arc;

use common::*;
use pretty_assertions::assert_eq;

use teamspace::database::repositories::TeamRepository;

#[tokio::test]
async fn new_teams_default_all_policy_flags_on() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;

    assert!(team.sharing);
    assert!(team.guest_signin);
    assert!(team.document_embeds);
    assert_eq!(team.subdomain, None);
    assert_eq!(team.deleted_at, None);
}

#[tokio::test]
async fn save_persists_policy_flag_changes() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let mut team = create_test_team(&db.pool, "Acme").await;

    let service = team_service(
        &db.pool,
        Arc::new(StaticFetcher::default()),
        Arc::new(MemoryStorage::default()),
    );

    team.sharing = false;
    team.guest_signin = false;
    service.save(&mut team).await.expect("Save should succeed");

    let stored = TeamRepository::new(db.pool.clone())
        .find_by_id(team.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.sharing);
    assert!(!stored.guest_signin);
    assert!(stored.document_embeds);
}

#[tokio::test]
async fn soft_delete_hides_team_from_default_lookups() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;

    let teams = TeamRepository::new(db.pool.clone());
    teams
        .soft_delete(team.id)
        .await
        .unwrap()
        .expect("Delete should succeed");

    assert!(teams.find_by_id(team.id).await.unwrap().is_none());

    let tombstoned = teams
        .find_by_id_with_deleted(team.id)
        .await
        .unwrap()
        .expect("tombstoned team should still exist");
    assert!(tombstoned.deleted_at.is_some());
}

#[tokio::test]
async fn soft_deleted_team_keeps_its_subdomain_claim() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let first = create_test_team(&db.pool, "Acme").await;
    let second = create_test_team(&db.pool, "Acme Again").await;

    let service = team_service(
        &db.pool,
        Arc::new(StaticFetcher::default()),
        Arc::new(MemoryStorage::default()),
    );

    service.provision_subdomain(first.id, "acme").await.unwrap();
    service.soft_delete(first.id).await.unwrap();

    // The tombstoned row still holds the unique subdomain
    let subdomain = service
        .provision_subdomain(second.id, "acme")
        .await
        .unwrap();
    assert_eq!(subdomain, "acme1");
}

#[tokio::test]
async fn find_by_subdomain_resolves_live_teams() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;

    let teams = TeamRepository::new(db.pool.clone());
    let service = team_service(
        &db.pool,
        Arc::new(StaticFetcher::default()),
        Arc::new(MemoryStorage::default()),
    );
    service.provision_subdomain(team.id, "acme").await.unwrap();

    let found = teams.find_by_subdomain("acme").await.unwrap().unwrap();
    assert_eq!(found.id, team.id);

    assert!(teams.find_by_subdomain("nope").await.unwrap().is_none());
}
