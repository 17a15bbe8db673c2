//! Workflow tests that drive the services directly, including failure
//! injection by dropping tables underneath them.

mod common;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use diaspora_bridge::domain::{
    ApplicationStatus, Delivery, MenteeProfileInput, MentorProfileInput, NewNotification,
    NotificationKind, ProfileInput, RequestStatus, Role, Tags,
};
use diaspora_bridge::errors::AppError;
use diaspora_bridge::services::{
    AdminClaim, MentorFilter, Registration, ServiceContainer, Services,
};

use common::{test_services, ADMIN_CODE, ADMIN_EMAIL, PASSWORD};

async fn register(services: &Services, email: &str, profile: ProfileInput) -> Uuid {
    services
        .auth()
        .register(Registration {
            email: email.to_string(),
            password: PASSWORD.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            profile,
        })
        .await
        .expect("registration should succeed")
        .user
        .id
}

async fn mentee(services: &Services, email: &str) -> Uuid {
    register(
        services,
        email,
        ProfileInput::Mentee(MenteeProfileInput::default()),
    )
    .await
}

async fn mentor(services: &Services, email: &str) -> Uuid {
    register(
        services,
        email,
        ProfileInput::Mentor(MentorProfileInput {
            bio: "Engineer in Toronto".to_string(),
            expertise: Tags::new(["Software"]),
            ..Default::default()
        }),
    )
    .await
}

async fn admin(services: &Services) -> Uuid {
    services
        .auth()
        .claim_admin(AdminClaim {
            email: ADMIN_EMAIL.to_string(),
            code: ADMIN_CODE.to_string(),
            password: Some(PASSWORD.to_string()),
        })
        .await
        .expect("admin claim should succeed")
        .user
        .id
}

async fn application_of(services: &Services, admin_id: Uuid, user_id: Uuid) -> Uuid {
    services
        .applications()
        .list(admin_id, None)
        .await
        .unwrap()
        .into_iter()
        .find(|view| view.application.user_id == user_id)
        .expect("application for user")
        .application
        .id
}

async fn application_status(services: &Services, admin_id: Uuid, user_id: Uuid) -> ApplicationStatus {
    services
        .applications()
        .list(admin_id, None)
        .await
        .unwrap()
        .into_iter()
        .find(|view| view.application.user_id == user_id)
        .expect("application for user")
        .application
        .status
}

#[tokio::test]
async fn test_registration_submits_pending_application() {
    let (services, _db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let admin_id = admin(&services).await;

    let pending = services
        .applications()
        .list(admin_id, Some(ApplicationStatus::Pending))
        .await
        .unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].application.user_id, mentor_id);
    assert_eq!(pending[0].application.message, "Engineer in Toronto");
    assert_eq!(pending[0].user.as_ref().unwrap().email, "b@x.com");
}

#[tokio::test]
async fn test_second_submission_conflicts() {
    let (services, _db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;

    let err = services
        .applications()
        .submit(mentor_id, MentorProfileInput::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(msg) if msg == "Application already submitted"));
}

#[tokio::test]
async fn test_mentees_cannot_apply() {
    let (services, _db) = test_services().await;
    let mentee_id = mentee(&services, "a@x.com").await;

    let err = services
        .applications()
        .submit(mentee_id, MentorProfileInput::default(), Some("Me too".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(msg) if msg == "Only mentors can apply"));
}

#[tokio::test]
async fn test_approve_twice_conflicts() {
    let (services, _db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let admin_id = admin(&services).await;
    let application_id = application_of(&services, admin_id, mentor_id).await;

    let first = services
        .applications()
        .approve(application_id, admin_id)
        .await
        .unwrap();
    assert_eq!(first.record.status, ApplicationStatus::Approved);
    assert_eq!(first.notification, Delivery::Delivered);

    for result in [
        services.applications().approve(application_id, admin_id).await,
        services.applications().reject(application_id, admin_id).await,
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Application already processed"));
    }

    assert_eq!(
        application_status(&services, admin_id, mentor_id).await,
        ApplicationStatus::Approved
    );
    let notifications = services.notifications().list(mentor_id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::MentorApproved);
}

#[tokio::test]
async fn test_non_admin_cannot_review() {
    let (services, _db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let admin_id = admin(&services).await;
    let application_id = application_of(&services, admin_id, mentor_id).await;

    let err = services
        .applications()
        .approve(application_id, mentor_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = services
        .applications()
        .approve(Uuid::new_v4(), admin_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Application not found"));
}

#[tokio::test]
async fn test_failed_approval_leaves_no_partial_state() {
    let (services, db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let admin_id = admin(&services).await;
    let application_id = application_of(&services, admin_id, mentor_id).await;

    // Demote the applicant so the role write is observable, then make the
    // profile write fail after the status and role writes have run.
    let conn = db.connection();
    conn.execute_unprepared("UPDATE users SET role = 'MENTEE' WHERE email = 'b@x.com'")
        .await
        .unwrap();
    conn.execute_unprepared("DROP TABLE mentor_profiles")
        .await
        .unwrap();

    let err = services
        .applications()
        .approve(application_id, admin_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    assert_eq!(
        application_status(&services, admin_id, mentor_id).await,
        ApplicationStatus::Pending
    );
    let login = services
        .auth()
        .login("b@x.com".to_string(), PASSWORD.to_string())
        .await
        .unwrap();
    assert_eq!(login.user.role, Role::Mentee);
    assert_eq!(services.notifications().unread_count(mentor_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_notification_failure_does_not_undo_approval() {
    let (services, db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let mentee_id = mentee(&services, "a@x.com").await;
    let admin_id = admin(&services).await;
    let application_id = application_of(&services, admin_id, mentor_id).await;

    db.connection()
        .execute_unprepared("DROP TABLE notifications")
        .await
        .unwrap();

    let transition = services
        .applications()
        .approve(application_id, admin_id)
        .await
        .unwrap();

    assert_eq!(transition.record.status, ApplicationStatus::Approved);
    assert_eq!(transition.notification, Delivery::Failed);

    let mentors = services
        .mentors()
        .list(mentee_id, MentorFilter::default())
        .await
        .unwrap();
    assert_eq!(mentors.len(), 1);
    assert_eq!(mentors[0].profile.user_id, mentor_id);
    assert!(mentors[0].profile.is_approved);
}

#[tokio::test]
async fn test_request_is_terminal_after_answer() {
    let (services, _db) = test_services().await;
    let mentor_id = mentor(&services, "b@x.com").await;
    let mentee_id = mentee(&services, "a@x.com").await;
    let admin_id = admin(&services).await;
    let application_id = application_of(&services, admin_id, mentor_id).await;
    services
        .applications()
        .approve(application_id, admin_id)
        .await
        .unwrap();

    let created = services
        .requests()
        .create(mentee_id, mentor_id, "  Please help  ".to_string())
        .await
        .unwrap();
    assert_eq!(created.record.status, RequestStatus::Pending);
    assert_eq!(created.record.message, "Please help");

    let rejected = services
        .requests()
        .reject(created.record.id, mentor_id, None)
        .await
        .unwrap();
    assert_eq!(rejected.record.status, RequestStatus::Rejected);
    assert_eq!(rejected.record.response.as_deref(), Some("Request declined"));

    let err = services
        .requests()
        .accept(created.record.id, mentor_id, Some("Changed my mind".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(msg) if msg == "Request already processed"));

    let sent = services.requests().list_for_mentee(mentee_id).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].request.status, RequestStatus::Rejected);

    let inbox = services.notifications().list(mentee_id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::MentorRequestRejected);
    assert!(inbox[0].message.contains("Test User"));
}

#[tokio::test]
async fn test_emitted_notifications_are_listed_newest_first() {
    let (services, _db) = test_services().await;
    let mentee_id = mentee(&services, "a@x.com").await;
    let notifications = services.notifications();

    let first = notifications
        .emit(NewNotification::request_accepted(mentee_id, "Kwame Mensah"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = notifications
        .emit(NewNotification::request_rejected(mentee_id, "Ada Obi"))
        .await
        .unwrap();
    assert!(!first.is_read);

    let listed = notifications.list(mentee_id).await.unwrap();
    assert_eq!(
        listed.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    assert_eq!(notifications.unread_count(mentee_id).await.unwrap(), 2);

    notifications.mark_read(first.id, mentee_id).await.unwrap();
    // Marking again is harmless
    notifications.mark_read(first.id, mentee_id).await.unwrap();
    assert_eq!(notifications.unread_count(mentee_id).await.unwrap(), 1);

    let err = notifications
        .mark_read(Uuid::new_v4(), mentee_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
