//! Schedule and membership API tests

mod helpers;

use helpers::*;
use rabbot::api::{self, ApiError};
use serde_json::json;

#[tokio::test]
async fn test_add_schedule_makes_admin_a_member() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    let admin = seed_user(&mut session, 10, "admin").await;

    let result = api::add_schedule(&mut session, 1, 10).await.unwrap();

    assert_eq!(result.message(), Some("Schedule created"));
    let schedule = result.into_value().unwrap();
    assert_eq!(schedule.telegram_group_id, 1);
    assert_eq!(schedule.admin_id, Some(admin.user_id));

    let members = api::list_schedule_users(&mut session, 1).await.unwrap();
    assert_eq!(members.into_value(), Some(vec![admin]));
}

#[tokio::test]
async fn test_add_schedule_requires_known_admin() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;

    let result = api::add_schedule(&mut session, 1, 10).await.unwrap();

    assert_eq!(result.errors(), &[ApiError::NoUserWithTelegramUserId(10)]);
    assert_eq!(session.schedules().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_schedule_twice_for_a_group() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_user(&mut session, 10, "admin").await;

    assert!(api::add_schedule(&mut session, 1, 10).await.unwrap().is_success());
    let second = api::add_schedule(&mut session, 1, 10).await.unwrap();

    assert_eq!(second.errors(), &[ApiError::AlreadyScheduleWithTelegramGroupId(1)]);
    assert_eq!(session.schedules().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_schedule_reports_both_problems() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;

    let result = api::add_schedule(&mut session, 1, 99).await.unwrap();

    assert_eq!(
        result.errors(),
        &[ApiError::NoUserWithTelegramUserId(99), ApiError::AlreadyScheduleWithTelegramGroupId(1)]
    );
}

#[tokio::test]
async fn test_get_schedule_by_group() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    let schedule = seed_schedule(&mut session, 1).await;

    let found = api::get_schedule_by_group(&mut session, 1).await.unwrap();
    assert_eq!(found.into_value(), Some(schedule));

    let missing = api::get_schedule_by_group(&mut session, 2).await.unwrap();
    assert!(missing.has_error("no-schedule-with-telegram-group-id"));
}

#[tokio::test]
async fn test_duplicate_group_schedules_are_reported() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;
    seed_schedule(&mut session, 1).await;

    let result = api::get_schedule_by_group(&mut session, 1).await.unwrap();

    assert!(result.value().is_none());
    assert_eq!(result.errors(), &[ApiError::MoreThan1ScheduleWithTelegramGroupId(1)]);

    // Every operation resolving the group inherits the integrity error.
    let shifts = api::list_shifts(&mut session, 1).await.unwrap();
    assert!(shifts.has_error("more-than-1-schedule-with-telegram-group-id"));
}

#[tokio::test]
async fn test_get_schedule_by_id() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    let schedule = seed_schedule(&mut session, 1).await;

    let found = api::get_schedule_by_id(&mut session, schedule.schedule_id).await.unwrap();
    assert_eq!(found.value(), Some(&schedule));

    let missing = api::get_schedule_by_id(&mut session, schedule.schedule_id + 1).await.unwrap();
    assert_eq!(missing.errors(), &[ApiError::NoScheduleWithId(schedule.schedule_id + 1)]);
}

#[tokio::test]
async fn test_delete_schedule_removes_everything_it_owns() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_user(&mut session, 10, "admin").await;
    let schedule = api::add_schedule(&mut session, 1, 10).await.unwrap().into_value().unwrap();
    let shift = seed_shift(&mut session, &schedule, "Morning", 1).await;
    api::add_mutation(&mut session, 1, 10, date(2016, 10, 1), shift.shift_id, None)
        .await
        .unwrap();
    let other = seed_schedule(&mut session, 2).await;
    seed_shift(&mut session, &other, "Morning", 1).await;

    let result = api::delete_schedule(&mut session, schedule.schedule_id).await.unwrap();

    assert_eq!(result.message(), Some("Schedule deleted"));
    assert!(api::get_schedule_by_group(&mut session, 1).await.unwrap().has_error("no-schedule-with-telegram-group-id"));
    assert_eq!(session.shifts().count().await.unwrap(), 1);
    assert_eq!(session.mutations().count_for_schedule(schedule.schedule_id).await.unwrap(), 0);
    assert!(session.schedules().get_members(schedule.schedule_id).await.unwrap().is_empty());
    // Users outlive the schedules they were in.
    assert_eq!(session.users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_missing_schedule() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;

    let result = api::delete_schedule(&mut session, 42).await.unwrap();

    assert_eq!(result.errors(), &[ApiError::NoScheduleWithId(42)]);
    assert_eq!(session.schedules().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_user_to_schedule() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    let schedule = seed_schedule(&mut session, 1).await;
    let user = seed_user(&mut session, 20, "bob").await;

    let result = api::add_user_to_schedule(&mut session, 20, 1).await.unwrap();

    assert_eq!(result.message(), Some("User added to schedule."));
    assert!(session.schedules().is_member(schedule.schedule_id, user.user_id).await.unwrap());
}

#[tokio::test]
async fn test_add_user_to_schedule_twice_keeps_one_membership() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;
    seed_user(&mut session, 20, "bob").await;

    assert!(api::add_user_to_schedule(&mut session, 20, 1).await.unwrap().is_success());
    assert!(api::add_user_to_schedule(&mut session, 20, 1).await.unwrap().is_success());

    let members = api::list_schedule_users(&mut session, 1).await.unwrap().into_value().unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn test_add_user_to_schedule_reports_both_lookups() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;

    let result = api::add_user_to_schedule(&mut session, 20, 1).await.unwrap();

    assert_eq!(
        result.errors(),
        &[ApiError::NoUserWithTelegramUserId(20), ApiError::NoScheduleWithTelegramGroupId(1)]
    );
}

#[tokio::test]
async fn test_remove_user_from_schedule() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    let schedule = seed_schedule(&mut session, 1).await;
    let user = seed_user(&mut session, 20, "bob").await;
    api::add_user_to_schedule(&mut session, 20, 1).await.unwrap();

    let result = api::remove_user_from_schedule(&mut session, 20, 1).await.unwrap();

    assert_eq!(result.message(), Some("User removed from schedule."));
    assert!(!session.schedules().is_member(schedule.schedule_id, user.user_id).await.unwrap());

    // Removing again is harmless.
    let again = api::remove_user_from_schedule(&mut session, 20, 1).await.unwrap();
    assert!(again.is_success());
}

#[tokio::test]
async fn test_remove_user_from_schedule_reports_both_lookups() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;

    let result = api::remove_user_from_schedule(&mut session, 20, 1).await.unwrap();

    assert!(result.has_error("no-users-with-telegram-user-id"));
    assert!(result.has_error("no-schedule-with-telegram-group-id"));
}

#[tokio::test]
async fn test_list_schedule_users_only_lists_members() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;
    seed_schedule(&mut session, 2).await;
    seed_user(&mut session, 20, "bob").await;
    seed_user(&mut session, 21, "carol").await;
    api::add_user_to_schedule(&mut session, 20, 1).await.unwrap();
    api::add_user_to_schedule(&mut session, 21, 2).await.unwrap();

    let members = api::list_schedule_users(&mut session, 1).await.unwrap().into_value().unwrap();

    let names: Vec<&str> = members.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["bob"]);
}

#[tokio::test]
async fn test_membership_survives_renaming_the_user() {
    let db = TestDatabase::new().await;
    let mut session = db.session().await;
    seed_schedule(&mut session, 1).await;
    seed_user(&mut session, 20, "bob").await;
    api::add_user_to_schedule(&mut session, 20, 1).await.unwrap();

    api::add_or_edit_user(&mut session, 20, &json!("robert")).await.unwrap();

    let members = api::list_schedule_users(&mut session, 1).await.unwrap().into_value().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "robert");
}
