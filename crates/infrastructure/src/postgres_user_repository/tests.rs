use chrono::Utc;
use petcare_application::{EntityRepository, IdentityRepository};
use petcare_core::{AppError, RecordId};
use petcare_domain::{NewUser, RecordTimestamps, Role, UserDraft};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresUserRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres user tests: {error}");
    }

    Some(pool)
}

fn draft(email: &str, role: &str) -> UserDraft {
    UserDraft::new(NewUser {
        name: "Bia Souza".to_owned(),
        email: email.to_owned(),
        role: role.to_owned(),
        is_active: None,
        clinic_id: None,
    })
    .unwrap_or_else(|error| panic!("valid user draft: {error}"))
}

#[tokio::test]
async fn permission_snapshot_tracks_active_flag() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool);
    let id = RecordId::generate();
    let email = format!("{}@clinic.test", id.as_str());
    let inserted = repository
        .insert(
            &id,
            RecordTimestamps::created_at(Utc::now()),
            &draft(email.as_str(), "RECEPCIONISTA"),
        )
        .await;
    assert!(inserted.is_ok());

    let snapshot = repository.find_permission_snapshot(&id).await;
    assert!(snapshot.is_ok_and(|snapshot| {
        snapshot.is_some_and(|snapshot| snapshot.role == Role::Receptionist && snapshot.is_active)
    }));

    let updated = repository.update_active_flag(&id, false, Utc::now()).await;
    assert_eq!(updated.ok(), Some(1));

    let snapshot = repository.find_permission_snapshot(&id).await;
    assert!(snapshot.is_ok_and(|snapshot| snapshot.is_some_and(|snapshot| !snapshot.is_active)));

    assert_eq!(repository.delete_by_id(&id).await.ok(), Some(1));
}

#[tokio::test]
async fn unknown_identities_have_no_snapshot() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool);

    let generated = repository
        .find_permission_snapshot(&RecordId::generate())
        .await;
    assert!(matches!(generated, Ok(None)));

    let legacy = RecordId::new("auth0|legacy").unwrap_or_else(|error| panic!("{error}"));
    assert!(matches!(
        repository.find_permission_snapshot(&legacy).await,
        Ok(None)
    ));
    assert_eq!(
        repository
            .update_active_flag(&legacy, false, Utc::now())
            .await
            .ok(),
        Some(0)
    );
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool);
    let marker = RecordId::generate();
    let email = format!("{}@clinic.test", marker.as_str());

    let first = repository
        .insert(
            &RecordId::generate(),
            RecordTimestamps::created_at(Utc::now()),
            &draft(email.as_str(), "TUTOR"),
        )
        .await;
    assert!(first.is_ok());

    let second = repository
        .insert(
            &RecordId::generate(),
            RecordTimestamps::created_at(Utc::now()),
            &draft(email.to_uppercase().as_str(), "TUTOR"),
        )
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}
