use super::*;

// ========================================================================
//  Party size and window limits
// ========================================================================

#[tokio::test]
async fn test_party_size_ceiling() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[2, 4, 6, 8, 10]).await;

    // 23 is the online ceiling regardless of floor capacity
    let err = manager.auto_create(&booking_for(area_id, 23)).await.unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded(_)));

    // 22 still books, joined across three tables
    let created = manager.auto_create(&booking_for(area_id, 22)).await.unwrap();
    let capacities = held_capacities(&pool, &created).await;
    assert_eq!(capacities.len(), 3);
    assert!(capacities.iter().sum::<i32>() >= 22);
}

#[tokio::test]
async fn test_party_size_must_be_positive() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let err = manager
        .create(&booking_for(area_id, 0), &[tables[0]])
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    let err = manager.auto_create(&booking_for(area_id, -1)).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[tokio::test]
async fn test_past_date_is_rejected() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let mut input = booking_for(area_id, 2);
    input.date = "2020-01-01".to_string();

    let err = manager.create(&input, &[tables[0]]).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidTimeWindow(_)));
}

#[tokio::test]
async fn test_unknown_slot_is_rejected() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let mut input = booking_for(area_id, 2);
    input.slot_id = 99;

    let err = manager.create(&input, &[tables[0]]).await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_malformed_date_is_rejected() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let mut input = booking_for(area_id, 2);
    input.date = "next friday".to_string();

    let err = manager.create(&input, &[tables[0]]).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

// ========================================================================
//  Detail updates
// ========================================================================

#[tokio::test]
async fn test_update_details_while_pending() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();

    let update = ReservationUpdate {
        guest_count: None,
        contact_name: Some("Luis Martín".to_string()),
        contact_phone: None,
        contact_email: Some("luis@example.com".to_string()),
        notes: Some("Window seat please".to_string()),
        payment_status: Some(PaymentStatus::Paid),
        pre_order_items: None,
    };
    let updated = manager.update_details(created.id, &update).await.unwrap();

    assert_eq!(updated.contact_name, "Luis Martín");
    assert_eq!(updated.contact_phone, created.contact_phone);
    assert_eq!(updated.contact_email.as_deref(), Some("luis@example.com"));
    assert_eq!(updated.notes.as_deref(), Some("Window seat please"));
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_guest_count_rechecks_held_capacity() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 8]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();

    let grow = |guest_count| ReservationUpdate {
        guest_count: Some(guest_count),
        contact_name: None,
        contact_phone: None,
        contact_email: None,
        notes: None,
        payment_status: None,
        pre_order_items: None,
    };

    // The held 2-top cannot seat four
    let err = manager.update_details(created.id, &grow(4)).await.unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded(_)));

    // The ceiling also applies to edits
    let err = manager.update_details(created.id, &grow(23)).await.unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded(_)));

    // Shrinking (and staying) within the held capacity is fine
    let updated = manager.update_details(created.id, &grow(1)).await.unwrap();
    assert_eq!(updated.guest_count, 1);
}

#[tokio::test]
async fn test_update_after_seating_is_rejected() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();
    manager.transition(created.id, ReservationStatus::Confirmed).await.unwrap();
    manager.transition(created.id, ReservationStatus::Seated).await.unwrap();

    let update = ReservationUpdate {
        guest_count: None,
        contact_name: None,
        contact_phone: None,
        contact_email: None,
        notes: Some("too late".to_string()),
        payment_status: None,
        pre_order_items: None,
    };
    let err = manager.update_details(created.id, &update).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidOperation(_)));
}

#[tokio::test]
async fn test_update_replaces_preorder() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;
    let paella = seed_dish(&pool, "Paella", 10_000).await;
    let pulpo = seed_dish(&pool, "Pulpo", 20_000).await;

    let mut input = booking_for(area_id, 2);
    input.pre_order_items = vec![preorder_line(paella, 1)];
    let created = manager.create(&input, &[tables[0]]).await.unwrap();
    assert_eq!(created.pre_order_total, 8_500);

    let update = ReservationUpdate {
        guest_count: None,
        contact_name: None,
        contact_phone: None,
        contact_email: None,
        notes: None,
        payment_status: None,
        pre_order_items: Some(vec![preorder_line(pulpo, 2)]),
    };
    let updated = manager.update_details(created.id, &update).await.unwrap();

    assert_eq!(updated.pre_order_items.len(), 1);
    assert_eq!(updated.pre_order_items[0].name, "Pulpo");
    assert_eq!(updated.pre_order_subtotal, 40_000);
    assert_eq!(updated.pre_order_total, 34_000);

    // An update without pre_order_items leaves the order untouched
    let note_only = ReservationUpdate {
        guest_count: None,
        contact_name: None,
        contact_phone: None,
        contact_email: None,
        notes: Some("no cutlery".to_string()),
        payment_status: None,
        pre_order_items: None,
    };
    let untouched = manager.update_details(created.id, &note_only).await.unwrap();
    assert_eq!(untouched.pre_order_subtotal, 40_000);
    assert_eq!(untouched.pre_order_items[0].name, "Pulpo");
}

// ========================================================================
//  Slot fallback
// ========================================================================

#[tokio::test]
async fn test_unseeded_slots_fall_back_to_default_set() {
    let (manager, pool) = create_unseeded_manager().await;

    let slots = manager.list_slots().await.unwrap();
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0].start_time, "06:00");
    assert_eq!(slots[15].end_time, "22:00");

    // Booking against a fallback slot works
    let (area_id, tables) = seed_floor(&pool, &[4]).await;
    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();
    assert_eq!(created.slot_id, 8);
}

// ========================================================================
//  Availability resolution
// ========================================================================

#[tokio::test]
async fn test_availability_lists_free_tables_and_seatings() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4]).await;
    let input = booking_for(area_id, 6);

    let before = manager
        .find_available_tables(area_id, &input.date, input.slot_id, 6)
        .await
        .unwrap();
    assert_eq!(before.tables.len(), 2);
    assert!(before.combinations.single.is_empty());
    assert_eq!(before.combinations.double.len(), 1);

    manager.create(&input, &[tables[0], tables[1]]).await.unwrap();

    let after = manager
        .find_available_tables(area_id, &input.date, input.slot_id, 6)
        .await
        .unwrap();
    assert!(after.tables.is_empty());
    assert!(after.combinations.is_empty());
}

#[tokio::test]
async fn test_availability_validates_inputs() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[4]).await;

    let err = manager
        .find_available_tables(999, "2030-06-15", 8, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));

    let err = manager
        .find_available_tables(area_id, "2030-06-15", 8, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));

    let err = manager
        .find_available_tables(area_id, "2020-01-01", 8, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidTimeWindow(_)));
}
