use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::GuestReservation;
use crate::pool::Database;
use crate::queries::properties::DEFAULT_LIMIT;
use crate::values::DbValue;

// Columns are listed explicitly: a `SELECT *` over this join would
// produce two colliding `id` columns.
const GUEST_RESERVATIONS_SQL: &str = "\
SELECT reservations.id AS reservation_id, reservations.start_date, reservations.end_date,
       properties.id, properties.owner_id, properties.title, properties.description,
       properties.thumbnail_photo_url, properties.cover_photo_url, properties.cost_per_night,
       properties.parking_spaces, properties.number_of_bathrooms, properties.number_of_bedrooms,
       properties.country, properties.street, properties.city, properties.province,
       properties.post_code, properties.active
FROM properties
JOIN reservations ON properties.id = reservations.property_id
WHERE reservations.guest_id = $1
ORDER BY reservations.start_date, reservations.id
LIMIT $2";

/// List a guest's reservations, joined with the reserved properties.
///
/// Ordered by check-in date (reservation id as tiebreak) so paging over
/// the list is deterministic. `limit` defaults to 10.
///
/// # Errors
/// Returns `DbError` if the query fails.
pub async fn get_all_reservations(
    db: &Database,
    guest_id: i64,
    limit: Option<i64>,
) -> Result<Vec<GuestReservation>, DbError> {
    let mut conn = db.acquire().await?;
    let rows = conn
        .fetch(
            GUEST_RESERVATIONS_SQL,
            &[
                DbValue::Int(guest_id),
                DbValue::Int(limit.unwrap_or(DEFAULT_LIMIT)),
            ],
        )
        .await?;
    rows.decode()
}
