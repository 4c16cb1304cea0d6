//! The six public data-access operations, one module per entity.

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::{PropertySearch, add_property, get_all_properties};
pub use reservations::get_all_reservations;
pub use users::{add_user, get_user_with_email, get_user_with_id};
