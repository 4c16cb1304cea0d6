#![cfg(feature = "sqlite")]

use lightbnb_db::prelude::*;
use lightbnb_db::schema::apply_schema;
use tempfile::tempdir;

fn unique_db_path(prefix: &str) -> String {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(format!("{prefix}.db"));
    std::mem::forget(dir);
    path.to_string_lossy().into_owned()
}

async fn test_db(prefix: &str) -> Result<Database, DbError> {
    let db = Database::connect_sqlite(SqliteOptions::new(unique_db_path(prefix))).await?;
    apply_schema(&db).await?;
    Ok(db)
}

fn new_property(owner_id: i64, title: &str, city: &str, cost_per_night: i64) -> NewProperty {
    NewProperty {
        owner_id,
        title: title.into(),
        description: format!("{title} description"),
        thumbnail_photo_url: "https://example.com/thumb.jpg".into(),
        cover_photo_url: "https://example.com/cover.jpg".into(),
        cost_per_night,
        parking_spaces: 1,
        number_of_bathrooms: 1,
        number_of_bedrooms: 2,
        country: "Canada".into(),
        street: "1 Test St".into(),
        city: city.into(),
        province: "BC".into(),
        post_code: "V5K 0A1".into(),
    }
}

async fn add_guest(db: &Database, email: &str) -> Result<User, DbError> {
    add_user(
        db,
        &NewUser {
            name: "Guest".into(),
            email: email.into(),
            password: "pw".into(),
        },
    )
    .await
}

async fn review(db: &Database, guest_id: i64, property_id: i64, rating: i64) -> Result<(), DbError> {
    let mut conn = db.acquire().await?;
    conn.execute(
        "INSERT INTO property_reviews (guest_id, property_id, rating, message) \
         VALUES ($1, $2, $3, $4)",
        &[
            DbValue::Int(guest_id),
            DbValue::Int(property_id),
            DbValue::Int(rating),
            DbValue::Text("fine".into()),
        ],
    )
    .await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn no_filters_orders_by_ascending_cost_and_caps_results()
-> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_order").await?;
    let owner = add_guest(&db, "owner@example.com").await?;
    let reviewer = add_guest(&db, "reviewer@example.com").await?;

    for (title, cost) in [
        ("mid", 500_i64),
        ("cheap", 100),
        ("pricey", 900),
        ("budget", 200),
        ("steep", 800),
        ("plain", 400),
    ] {
        let p = add_property(&db, &new_property(owner.id, title, "Vancouver", cost)).await?;
        review(&db, reviewer.id, p.id, 3).await?;
    }

    let listings = get_all_properties(&db, &PropertySearch::default(), Some(5)).await?;
    assert_eq!(listings.len(), 5);
    let costs: Vec<i64> = listings.iter().map(|l| l.property.cost_per_night).collect();
    assert_eq!(costs, vec![100, 200, 400, 500, 800]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn owner_and_city_filters_combine() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_owner_city").await?;
    let alice = add_guest(&db, "alice@example.com").await?;
    let bob = add_guest(&db, "bob@example.com").await?;
    let reviewer = add_guest(&db, "r@example.com").await?;

    let wanted = add_property(&db, &new_property(alice.id, "match", "Vancouver", 100)).await?;
    let wrong_owner = add_property(&db, &new_property(bob.id, "other owner", "Vancouver", 100)).await?;
    let wrong_city = add_property(&db, &new_property(alice.id, "other city", "Toronto", 100)).await?;
    for p in [&wanted, &wrong_owner, &wrong_city] {
        review(&db, reviewer.id, p.id, 4).await?;
    }

    // Both filters at once: the query must stay valid and AND them.
    let search = PropertySearch {
        owner_id: Some(alice.id),
        city: Some("couve".into()),
        ..PropertySearch::default()
    };
    let listings = get_all_properties(&db, &search, None).await?;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.id, wanted.id);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn city_match_is_case_insensitive_substring() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_city").await?;
    let owner = add_guest(&db, "owner@example.com").await?;
    let reviewer = add_guest(&db, "r@example.com").await?;

    let p = add_property(&db, &new_property(owner.id, "home", "VanCouVer", 100)).await?;
    review(&db, reviewer.id, p.id, 4).await?;

    for needle in ["vancouver", "VANCOUVER", "ancouv"] {
        let search = PropertySearch {
            city: Some(needle.into()),
            ..PropertySearch::default()
        };
        let listings = get_all_properties(&db, &search, None).await?;
        assert_eq!(listings.len(), 1, "needle {needle}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn price_bounds_are_inclusive() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_price").await?;
    let owner = add_guest(&db, "owner@example.com").await?;
    let reviewer = add_guest(&db, "r@example.com").await?;

    for cost in [100_i64, 200, 300, 400] {
        let p = add_property(&db, &new_property(owner.id, "p", "City", cost)).await?;
        review(&db, reviewer.id, p.id, 3).await?;
    }

    let search = PropertySearch {
        minimum_price_per_night: Some(200),
        maximum_price_per_night: Some(300),
        ..PropertySearch::default()
    };
    let listings = get_all_properties(&db, &search, None).await?;
    let costs: Vec<i64> = listings.iter().map(|l| l.property.cost_per_night).collect();
    assert_eq!(costs, vec![200, 300]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn minimum_rating_filters_on_the_average() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_rating").await?;
    let owner = add_guest(&db, "owner@example.com").await?;
    let reviewer = add_guest(&db, "r@example.com").await?;

    // Averages: above (5.0), at (4.0), below (2.5).
    let above = add_property(&db, &new_property(owner.id, "above", "City", 100)).await?;
    review(&db, reviewer.id, above.id, 5).await?;
    review(&db, reviewer.id, above.id, 5).await?;

    let at = add_property(&db, &new_property(owner.id, "at", "City", 200)).await?;
    review(&db, reviewer.id, at.id, 4).await?;
    review(&db, reviewer.id, at.id, 4).await?;

    let below = add_property(&db, &new_property(owner.id, "below", "City", 300)).await?;
    review(&db, reviewer.id, below.id, 3).await?;
    review(&db, reviewer.id, below.id, 2).await?;

    let search = PropertySearch {
        minimum_rating: Some(4.0),
        ..PropertySearch::default()
    };
    let listings = get_all_properties(&db, &search, None).await?;
    let ids: Vec<i64> = listings.iter().map(|l| l.property.id).collect();
    assert_eq!(ids, vec![above.id, at.id]);
    assert!((listings[0].average_rating - 5.0).abs() < f64::EPSILON);
    assert!((listings[1].average_rating - 4.0).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreviewed_properties_are_not_listed() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("search_unreviewed").await?;
    let owner = add_guest(&db, "owner@example.com").await?;
    let reviewer = add_guest(&db, "r@example.com").await?;

    let reviewed = add_property(&db, &new_property(owner.id, "reviewed", "City", 100)).await?;
    review(&db, reviewer.id, reviewed.id, 3).await?;
    add_property(&db, &new_property(owner.id, "silent", "City", 100)).await?;

    let listings = get_all_properties(&db, &PropertySearch::default(), None).await?;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].property.id, reviewed.id);
    Ok(())
}
