#![cfg(feature = "sqlite")]

use std::path::PathBuf;

use lightbnb_db::prelude::*;
use lightbnb_db::schema::apply_schema;
use lightbnb_db::seed::{load_properties, load_users, seed_database};
use tempfile::tempdir;

fn unique_db_path(prefix: &str) -> String {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(format!("{prefix}.db"));
    std::mem::forget(dir);
    path.to_string_lossy().into_owned()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn fixtures_parse_with_coerced_numerics() -> Result<(), Box<dyn std::error::Error>> {
    let users = load_users(fixture("users.json"))?;
    assert_eq!(users.len(), 6);

    let properties = load_properties(fixture("properties.json"))?;
    assert_eq!(properties.len(), 6);
    // Fixture numerics are strings; they land as integers.
    assert_eq!(properties[0].cost_per_night, 93_061);
    assert_eq!(properties[0].number_of_bedrooms, 8);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn seeding_populates_users_and_properties() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_sqlite(SqliteOptions::new(unique_db_path("seed"))).await?;
    apply_schema(&db).await?;
    seed_database(&db, fixture("users.json"), fixture("properties.json")).await?;

    let eva = get_user_with_email(&db, "sebastianguerra@ymail.com").await?;
    assert_eq!(eva.len(), 1);
    assert_eq!(eva[0].name, "Eva Stanley");

    let mut conn = db.acquire().await?;
    let rows = conn
        .fetch("SELECT count(*) AS n FROM properties", &[])
        .await?;
    assert_eq!(rows.rows[0].int("n")?, 6);

    // Seeding again trips the unique email constraint rather than
    // silently duplicating.
    let err = seed_database(&db, fixture("users.json"), fixture("properties.json"))
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation(), "got {err:?}");
    Ok(())
}
