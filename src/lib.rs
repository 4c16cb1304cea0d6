//! Data-access layer for a property-rental web application.
//!
//! Six operations — user lookup by email and id, user insert, a guest's
//! reservation listing, a filtered property search, and property insert —
//! each a single parameterized round trip over a pooled connection.
//! Queries are written once in Postgres `$N` placeholder style and
//! rewritten for SQLite at execution time.
//!
//! ```rust,no_run
//! use lightbnb_db::prelude::*;
//!
//! # async fn demo() -> Result<(), DbError> {
//! let db = Database::connect_sqlite(SqliteOptions::new("lightbnb.db")).await?;
//! lightbnb_db::schema::apply_schema(&db).await?;
//!
//! let listings = get_all_properties(
//!     &db,
//!     &PropertySearch {
//!         city: Some("Vancouver".into()),
//!         minimum_rating: Some(4.0),
//!         ..PropertySearch::default()
//!     },
//!     Some(5),
//! )
//! .await?;
//! # let _ = listings;
//! # Ok(()) }
//! ```

pub mod error;
pub mod executor;
pub mod models;
pub mod pool;
pub mod queries;
pub mod rows;
pub mod schema;
pub mod seed;
pub mod translation;
pub mod values;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::DbError;
pub use executor::QueryExecutor;
pub use models::{GuestReservation, NewProperty, NewUser, Property, PropertyListing, User};
pub use pool::{Database, DatabaseKind, DbConnection, DbPool};
pub use queries::{
    PropertySearch, add_property, add_user, get_all_properties, get_all_reservations,
    get_user_with_email, get_user_with_id,
};
pub use rows::{ColumnSet, DbRow, FromRow, RowSet};
pub use values::DbValue;

#[cfg(feature = "sqlite")]
pub use sqlite::config::SqliteOptions;

/// One-stop imports for callers.
pub mod prelude {
    pub use crate::error::DbError;
    pub use crate::executor::QueryExecutor;
    pub use crate::models::{
        GuestReservation, NewProperty, NewUser, Property, PropertyListing, User,
    };
    pub use crate::pool::{Database, DatabaseKind, DbConnection};
    pub use crate::queries::{
        PropertySearch, add_property, add_user, get_all_properties, get_all_reservations,
        get_user_with_email, get_user_with_id,
    };
    pub use crate::rows::{DbRow, FromRow, RowSet};
    pub use crate::values::DbValue;

    #[cfg(feature = "sqlite")]
    pub use crate::sqlite::config::SqliteOptions;
}
