use super::*;
use crate::db::DbService;
use shared::models::{Area, AreaCreate, DiningTableCreate, MenuItemCreate, PreOrderItemInput};

/// UTC policy keeps window math independent of the host timezone
fn test_policy() -> BookingPolicy {
    BookingPolicy {
        timezone: chrono_tz::UTC,
        ..BookingPolicy::default()
    }
}

async fn create_test_manager() -> (BookingManager, SqlitePool) {
    let db = DbService::new_in_memory().await.unwrap();
    time_slot::ensure_defaults(&db.pool, 6, 22).await.unwrap();
    let pool = db.pool.clone();
    (BookingManager::new(db.pool, test_policy()), pool)
}

/// Manager over a database where the slot table was never seeded
async fn create_unseeded_manager() -> (BookingManager, SqlitePool) {
    let db = DbService::new_in_memory().await.unwrap();
    let pool = db.pool.clone();
    (BookingManager::new(db.pool, test_policy()), pool)
}

async fn seed_area(pool: &SqlitePool) -> Area {
    area::create(
        pool,
        AreaCreate {
            name: "Main Hall".to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_table(pool: &SqlitePool, area_id: i64, name: &str, capacity: i32) -> i64 {
    dining_table::create(
        pool,
        DiningTableCreate {
            area_id,
            name: name.to_string(),
            capacity,
        },
    )
    .await
    .unwrap()
    .id
}

/// Floor with one table per capacity so scan order is deterministic.
/// Returns `(area_id, table ids in capacity order)`.
async fn seed_floor(pool: &SqlitePool, capacities: &[i32]) -> (i64, Vec<i64>) {
    let area = seed_area(pool).await;
    let mut ids = Vec::with_capacity(capacities.len());
    for (i, capacity) in capacities.iter().enumerate() {
        ids.push(seed_table(pool, area.id, &format!("T{}", i + 1), *capacity).await);
    }
    (area.id, ids)
}

async fn seed_dish(pool: &SqlitePool, name: &str, price: i64) -> i64 {
    menu_item::create(
        pool,
        MenuItemCreate {
            name: name.to_string(),
            price,
            category: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Valid booking request for a far-future lunch slot
fn booking_for(area_id: i64, guest_count: i32) -> ReservationCreate {
    ReservationCreate {
        area_id,
        date: "2030-06-15".to_string(),
        slot_id: 8, // 13:00 - 14:00
        guest_count,
        contact_name: "Ana García".to_string(),
        contact_phone: "+34 600 000 001".to_string(),
        contact_email: None,
        notes: None,
        pre_order_items: vec![],
    }
}

fn preorder_line(menu_item_id: i64, quantity: i32) -> PreOrderItemInput {
    PreOrderItemInput {
        menu_item_id,
        quantity,
    }
}

/// Capacities of the tables a reservation holds, ascending
async fn held_capacities(pool: &SqlitePool, reservation: &Reservation) -> Vec<i32> {
    let mut capacities = Vec::new();
    for id in &reservation.table_ids {
        capacities.push(dining_table::find_by_id(pool, *id).await.unwrap().unwrap().capacity);
    }
    capacities.sort_unstable();
    capacities
}

mod test_boundary;
mod test_flows;
