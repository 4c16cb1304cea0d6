use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::{NewUser, User};
use crate::pool::Database;
use crate::values::DbValue;

/// Look up users by email.
///
/// Email is the natural external key; uniqueness is the database's job,
/// so zero or one row is expected but every match is returned. An
/// absent email is `Ok(vec![])`, never an error.
///
/// # Errors
/// Returns `DbError` if the query fails.
pub async fn get_user_with_email(db: &Database, email: &str) -> Result<Vec<User>, DbError> {
    let mut conn = db.acquire().await?;
    let rows = conn
        .fetch(
            "SELECT * FROM users WHERE email = $1",
            &[DbValue::from(email)],
        )
        .await?;
    rows.decode()
}

/// Look up users by primary key. Same contract as
/// [`get_user_with_email`].
///
/// # Errors
/// Returns `DbError` if the query fails.
pub async fn get_user_with_id(db: &Database, id: i64) -> Result<Vec<User>, DbError> {
    let mut conn = db.acquire().await?;
    let rows = conn
        .fetch("SELECT * FROM users WHERE id = $1", &[DbValue::Int(id)])
        .await?;
    rows.decode()
}

/// Insert a new user and return the stored row, generated id included.
///
/// No uniqueness pre-check: a duplicate email surfaces as an `Err` whose
/// [`is_constraint_violation`](DbError::is_constraint_violation) is true.
///
/// # Errors
/// Returns `DbError` if the insert fails.
pub async fn add_user(db: &Database, user: &NewUser) -> Result<User, DbError> {
    let mut conn = db.acquire().await?;
    let rows = conn
        .fetch(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING *",
            &[
                DbValue::Text(user.name.clone()),
                DbValue::Text(user.email.clone()),
                DbValue::Text(user.password.clone()),
            ],
        )
        .await?;
    rows.decode_one()
}
