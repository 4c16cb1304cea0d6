//! JSON fixture loading and database seeding, built on the public
//! insert operations so seeded data goes through the same path as live
//! data.

use std::path::Path;

use tracing::info;

use crate::error::DbError;
use crate::models::{NewProperty, NewUser, Property, User};
use crate::pool::Database;
use crate::queries::{add_property, add_user};

/// # Errors
/// Returns `DbError::Io` if the file cannot be read, `DbError::Json` if
/// it does not parse as a user array.
pub fn load_users(path: impl AsRef<Path>) -> Result<Vec<NewUser>, DbError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// # Errors
/// Returns `DbError::Io` if the file cannot be read, `DbError::Json` if
/// it does not parse as a property array.
pub fn load_properties(path: impl AsRef<Path>) -> Result<Vec<NewProperty>, DbError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Insert every user, returning the stored rows with generated ids.
///
/// # Errors
/// Returns the first insert failure.
pub async fn seed_users(db: &Database, users: &[NewUser]) -> Result<Vec<User>, DbError> {
    let mut inserted = Vec::with_capacity(users.len());
    for user in users {
        inserted.push(add_user(db, user).await?);
    }
    info!(count = inserted.len(), "seeded users");
    Ok(inserted)
}

/// Insert every property, returning the stored rows with generated ids.
/// Owners must already exist.
///
/// # Errors
/// Returns the first insert failure.
pub async fn seed_properties(
    db: &Database,
    properties: &[NewProperty],
) -> Result<Vec<Property>, DbError> {
    let mut inserted = Vec::with_capacity(properties.len());
    for property in properties {
        inserted.push(add_property(db, property).await?);
    }
    info!(count = inserted.len(), "seeded properties");
    Ok(inserted)
}

/// Load both fixture files and insert users, then properties.
///
/// # Errors
/// Returns the first load or insert failure.
pub async fn seed_database(
    db: &Database,
    users_path: impl AsRef<Path>,
    properties_path: impl AsRef<Path>,
) -> Result<(), DbError> {
    let users = load_users(users_path)?;
    let properties = load_properties(properties_path)?;
    seed_users(db, &users).await?;
    seed_properties(db, &properties).await?;
    Ok(())
}
