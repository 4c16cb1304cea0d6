use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DbError;
use crate::rows::{DbRow, FromRow};

/// A registered user. Passwords are stored as the caller supplied them;
/// hashing belongs to the auth layer above this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input record for [`add_user`](crate::queries::users::add_user).
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Input record for [`add_property`](crate::queries::properties::add_property).
///
/// The numeric fields accept JSON numbers or numeric strings: the seed
/// fixtures carry counts and prices as strings, and coercion happens
/// here at the type boundary rather than inside query assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub cost_per_night: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub parking_spaces: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub number_of_bathrooms: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// A property as returned by the search listing, with its average
/// review rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// One reservation of a guest, joined with the reserved property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestReservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property: Property,
}

impl FromRow for User {
    fn from_row(row: &DbRow) -> Result<Self, DbError> {
        Ok(User {
            id: row.int("id")?,
            name: row.text("name")?,
            email: row.text("email")?,
            password: row.text("password")?,
        })
    }
}

impl FromRow for Property {
    fn from_row(row: &DbRow) -> Result<Self, DbError> {
        Ok(Property {
            id: row.int("id")?,
            owner_id: row.int("owner_id")?,
            title: row.text("title")?,
            description: row.text("description")?,
            thumbnail_photo_url: row.text("thumbnail_photo_url")?,
            cover_photo_url: row.text("cover_photo_url")?,
            cost_per_night: row.int("cost_per_night")?,
            parking_spaces: row.int("parking_spaces")?,
            number_of_bathrooms: row.int("number_of_bathrooms")?,
            number_of_bedrooms: row.int("number_of_bedrooms")?,
            country: row.text("country")?,
            street: row.text("street")?,
            city: row.text("city")?,
            province: row.text("province")?,
            post_code: row.text("post_code")?,
            active: row.bool("active")?,
        })
    }
}

impl FromRow for PropertyListing {
    fn from_row(row: &DbRow) -> Result<Self, DbError> {
        Ok(PropertyListing {
            property: Property::from_row(row)?,
            average_rating: row.float("average_rating")?,
        })
    }
}

impl FromRow for GuestReservation {
    fn from_row(row: &DbRow) -> Result<Self, DbError> {
        // The reservation id is aliased; the property columns keep their
        // own names, so the nested decode reads the same row.
        Ok(GuestReservation {
            id: row.int("reservation_id")?,
            start_date: row.date("start_date")?,
            end_date: row.date("end_date")?,
            property: Property::from_row(row)?,
        })
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("an integer or a string holding one")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("integer {v} out of range")))
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("`{v}` is not an integer")))
        }
    }

    deserializer.deserialize_any(Visitor)
}
