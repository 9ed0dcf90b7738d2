mod common;

use common::*;
use pretty_assertions::assert_eq;

use teamspace::AppError;
use teamspace::database::repositories::UserRepository;
use teamspace::services::admin::AdminGovernor;

#[tokio::test]
async fn removing_the_last_admin_is_rejected() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;
    let admin = create_test_user(&db.pool, team.id, true).await;
    // Non-admin members don't count towards the invariant
    create_test_user(&db.pool, team.id, false).await;

    let governor = AdminGovernor::new(db.pool.clone());
    let result = governor.remove_admin(&admin).await;

    assert!(matches!(result, Err(AppError::InvariantViolation(_))));

    let stored = UserRepository::new(db.pool.clone())
        .find_by_id(admin.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_admin, "last admin must keep their status");
}

#[tokio::test]
async fn removing_a_non_last_admin_succeeds() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;
    let first = create_test_user(&db.pool, team.id, true).await;
    let second = create_test_user(&db.pool, team.id, true).await;

    let governor = AdminGovernor::new(db.pool.clone());
    governor
        .remove_admin(&second)
        .await
        .expect("Demotion should succeed with another admin present");

    let users = UserRepository::new(db.pool.clone());
    assert!(!users.find_by_id(second.id).await.unwrap().unwrap().is_admin);
    assert!(users.find_by_id(first.id).await.unwrap().unwrap().is_admin);
}

#[tokio::test]
async fn admins_of_other_teams_do_not_count() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;
    let other_team = create_test_team(&db.pool, "Globex").await;
    let admin = create_test_user(&db.pool, team.id, true).await;
    create_test_user(&db.pool, other_team.id, true).await;

    let governor = AdminGovernor::new(db.pool.clone());
    let result = governor.remove_admin(&admin).await;

    assert!(matches!(result, Err(AppError::InvariantViolation(_))));
}

#[tokio::test]
async fn add_admin_grants_status() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;
    let member = create_test_user(&db.pool, team.id, false).await;

    let governor = AdminGovernor::new(db.pool.clone());
    governor.add_admin(&member).await.expect("Grant should succeed");

    let stored = UserRepository::new(db.pool.clone())
        .find_by_id(member.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_admin);
}

#[tokio::test]
async fn activate_user_clears_suspension() {
    let db = TestDb::new().await.expect("Failed to create test db");
    let team = create_test_team(&db.pool, "Acme").await;
    let admin = create_test_user(&db.pool, team.id, true).await;
    let member = create_test_user(&db.pool, team.id, false).await;

    let users = UserRepository::new(db.pool.clone());
    users
        .suspend(member.id, admin.id)
        .await
        .unwrap()
        .expect("Suspension should succeed");

    let suspended = users.find_by_id(member.id).await.unwrap().unwrap();
    assert!(suspended.is_suspended());
    assert_eq!(suspended.suspended_by_id, Some(admin.id));

    let governor = AdminGovernor::new(db.pool.clone());
    governor
        .activate_user(&member)
        .await
        .expect("Activation should succeed");

    let active = users.find_by_id(member.id).await.unwrap().unwrap();
    assert!(!active.is_suspended());
    assert_eq!(active.suspended_by_id, None);
}
