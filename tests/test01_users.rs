#![cfg(feature = "sqlite")]

use lightbnb_db::prelude::*;
use lightbnb_db::schema::apply_schema;
use tempfile::tempdir;

fn unique_db_path(prefix: &str) -> String {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(format!("{prefix}.db"));
    // Leak the tempdir so the file persists for the duration of the test binary.
    std::mem::forget(dir);
    path.to_string_lossy().into_owned()
}

async fn test_db(prefix: &str) -> Result<Database, DbError> {
    let db = Database::connect_sqlite(SqliteOptions::new(unique_db_path(prefix))).await?;
    apply_schema(&db).await?;
    Ok(db)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn absent_email_is_empty_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("users_absent").await?;
    let users = get_user_with_email(&db, "nobody@example.com").await?;
    assert!(users.is_empty());

    let users = get_user_with_id(&db, 9_999).await?;
    assert!(users.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn add_user_round_trips_by_id_and_email() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("users_roundtrip").await?;
    let new_user = NewUser {
        name: "Eva Stanley".into(),
        email: "eva@example.com".into(),
        password: "hunter2".into(),
    };

    let created = add_user(&db, &new_user).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, new_user.name);
    assert_eq!(created.email, new_user.email);

    let by_id = get_user_with_id(&db, created.id).await?;
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].name, new_user.name);
    assert_eq!(by_id[0].email, new_user.email);

    let by_email = get_user_with_email(&db, &new_user.email).await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].id, created.id);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn duplicate_email_is_a_constraint_error() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("users_dupe").await?;
    let new_user = NewUser {
        name: "First".into(),
        email: "same@example.com".into(),
        password: "pw".into(),
    };
    add_user(&db, &new_user).await?;

    let second = NewUser {
        name: "Second".into(),
        ..new_user
    };
    let err = add_user(&db, &second).await.unwrap_err();
    assert!(err.is_constraint_violation(), "got {err:?}");

    // The failed insert must not leave data behind or mask the original.
    let users = get_user_with_email(&db, "same@example.com").await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "First");
    Ok(())
}
