use std::fmt::Write;

use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::{NewProperty, Property, PropertyListing};
use crate::pool::Database;
use crate::values::DbValue;

/// Result cap applied when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Optional filters for the property search. Absent fields emit no
/// predicate.
#[derive(Debug, Clone, Default)]
pub struct PropertySearch {
    pub owner_id: Option<i64>,
    /// Case-insensitive substring match on the city name.
    pub city: Option<String>,
    /// Inclusive lower bound on `cost_per_night`.
    pub minimum_price_per_night: Option<i64>,
    /// Inclusive upper bound on `cost_per_night`.
    pub maximum_price_per_night: Option<i64>,
    /// Inclusive lower bound on the average review rating; filters the
    /// aggregate, so it lands in `HAVING`, not `WHERE`.
    pub minimum_rating: Option<f64>,
}

/// `WHERE` for the first predicate, `AND` for every later one. One flag
/// covers all filter branches, so any combination of filters yields
/// valid SQL.
fn predicate_keyword(has_predicate: &mut bool) -> &'static str {
    if *has_predicate {
        "AND"
    } else {
        *has_predicate = true;
        "WHERE"
    }
}

/// Assemble the search query and its positional parameters.
fn build_search_query(search: &PropertySearch, limit: i64) -> (String, Vec<DbValue>) {
    let mut sql = String::from(
        "SELECT properties.*, \
         CAST(avg(property_reviews.rating) AS DOUBLE PRECISION) AS average_rating\n\
         FROM properties\n\
         JOIN property_reviews ON properties.id = property_reviews.property_id\n",
    );
    let mut params: Vec<DbValue> = Vec::new();
    let mut has_predicate = false;

    if let Some(owner_id) = search.owner_id {
        params.push(DbValue::Int(owner_id));
        let _ = writeln!(
            sql,
            "{} properties.owner_id = ${}",
            predicate_keyword(&mut has_predicate),
            params.len()
        );
    }

    if let Some(city) = &search.city {
        params.push(DbValue::Text(format!("%{}%", city.to_lowercase())));
        let _ = writeln!(
            sql,
            "{} LOWER(properties.city) LIKE ${}",
            predicate_keyword(&mut has_predicate),
            params.len()
        );
    }

    if let Some(min_price) = search.minimum_price_per_night {
        params.push(DbValue::Int(min_price));
        let _ = writeln!(
            sql,
            "{} properties.cost_per_night >= ${}",
            predicate_keyword(&mut has_predicate),
            params.len()
        );
    }

    if let Some(max_price) = search.maximum_price_per_night {
        params.push(DbValue::Int(max_price));
        let _ = writeln!(
            sql,
            "{} properties.cost_per_night <= ${}",
            predicate_keyword(&mut has_predicate),
            params.len()
        );
    }

    sql.push_str("GROUP BY properties.id\n");

    if let Some(min_rating) = search.minimum_rating {
        params.push(DbValue::Float(min_rating));
        let _ = writeln!(
            sql,
            "HAVING CAST(avg(property_reviews.rating) AS DOUBLE PRECISION) >= ${}",
            params.len()
        );
    }

    sql.push_str("ORDER BY properties.cost_per_night, properties.id\n");

    params.push(DbValue::Int(limit));
    let _ = write!(sql, "LIMIT ${}", params.len());

    (sql, params)
}

/// List properties matching the search filters, cheapest first, each
/// with its average review rating.
///
/// Only reviewed properties appear: the review join is inner, matching
/// the application's listing behavior.
///
/// # Errors
/// Returns `DbError` if the query fails.
pub async fn get_all_properties(
    db: &Database,
    search: &PropertySearch,
    limit: Option<i64>,
) -> Result<Vec<PropertyListing>, DbError> {
    let (sql, params) = build_search_query(search, limit.unwrap_or(DEFAULT_LIMIT));
    let mut conn = db.acquire().await?;
    let rows = conn.fetch(&sql, &params).await?;
    rows.decode()
}

const INSERT_PROPERTY_SQL: &str = "\
INSERT INTO properties (title, description, number_of_bedrooms, number_of_bathrooms, \
parking_spaces, cost_per_night, thumbnail_photo_url, cover_photo_url, street, country, \
city, province, post_code, owner_id)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
RETURNING *";

/// Insert a property and return the stored row, generated id included.
///
/// Each placeholder is bound from the correspondingly named field, so
/// the binding cannot drift if the struct's field order changes.
///
/// # Errors
/// Returns `DbError` if the insert fails; a missing owner surfaces as a
/// constraint violation.
pub async fn add_property(db: &Database, property: &NewProperty) -> Result<Property, DbError> {
    let params = [
        DbValue::Text(property.title.clone()),
        DbValue::Text(property.description.clone()),
        DbValue::Int(property.number_of_bedrooms),
        DbValue::Int(property.number_of_bathrooms),
        DbValue::Int(property.parking_spaces),
        DbValue::Int(property.cost_per_night),
        DbValue::Text(property.thumbnail_photo_url.clone()),
        DbValue::Text(property.cover_photo_url.clone()),
        DbValue::Text(property.street.clone()),
        DbValue::Text(property.country.clone()),
        DbValue::Text(property.city.clone()),
        DbValue::Text(property.province.clone()),
        DbValue::Text(property.post_code.clone()),
        DbValue::Int(property.owner_id),
    ];
    let mut conn = db.acquire().await?;
    let rows = conn.fetch(INSERT_PROPERTY_SQL, &params).await?;
    rows.decode_one()
}
