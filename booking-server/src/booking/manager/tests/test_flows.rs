use super::*;

// ========================================================================
//  Lifecycle
// ========================================================================

#[tokio::test]
async fn test_full_lifecycle() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4]).await;

    let created = manager.create(&booking_for(area_id, 4), &[tables[1]]).await.unwrap();

    let confirmed = manager
        .transition(created.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let seated = manager
        .transition(created.id, ReservationStatus::Seated)
        .await
        .unwrap();
    assert_eq!(seated.status, ReservationStatus::Seated);

    let completed = manager
        .transition(created.id, ReservationStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);

    // Completed service keeps its table history
    assert_eq!(completed.table_ids, vec![tables[1]]);
}

#[tokio::test]
async fn test_invalid_transitions_are_rejected() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();

    // Seating an unconfirmed reservation
    let err = manager
        .transition(created.id, ReservationStatus::Seated)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Pending,
            to: ReservationStatus::Seated
        }
    ));

    // Completed is terminal
    manager.transition(created.id, ReservationStatus::Confirmed).await.unwrap();
    manager.transition(created.id, ReservationStatus::Seated).await.unwrap();
    manager.transition(created.id, ReservationStatus::Completed).await.unwrap();

    let err = manager
        .transition(created.id, ReservationStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_cancelled_is_terminal() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();
    manager.cancel_by_customer(created.id).await.unwrap();

    let err = manager
        .transition(created.id, ReservationStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition { .. }));
}

// ========================================================================
//  Cancellation releases tables
// ========================================================================

#[tokio::test]
async fn test_cancel_releases_tables_for_rebooking() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4]).await;
    let input = booking_for(area_id, 4);

    let first = manager.create(&input, &[tables[1]]).await.unwrap();

    // The 4-top is gone for this window
    let availability = manager
        .find_available_tables(area_id, &input.date, input.slot_id, 4)
        .await
        .unwrap();
    assert!(availability.tables.iter().all(|t| t.id != tables[1]));

    let cancelled = manager.cancel_by_customer(first.id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    // Released assignments no longer list the table
    assert!(cancelled.table_ids.is_empty());

    // And the window is bookable again
    let availability = manager
        .find_available_tables(area_id, &input.date, input.slot_id, 4)
        .await
        .unwrap();
    assert!(availability.tables.iter().any(|t| t.id == tables[1]));

    manager.create(&input, &[tables[1]]).await.unwrap();
}

#[tokio::test]
async fn test_customer_cancel_requires_pending() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4]).await;

    let created = manager.create(&booking_for(area_id, 2), &[tables[0]]).await.unwrap();
    manager.transition(created.id, ReservationStatus::Confirmed).await.unwrap();

    let err = manager.cancel_by_customer(created.id).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidOperation(_)));

    // The restaurant can still cancel a confirmed reservation
    let cancelled = manager
        .transition(created.id, ReservationStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

// ========================================================================
//  Auto-selection
// ========================================================================

#[tokio::test]
async fn test_auto_create_small_party_takes_smallest_table() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[2, 4, 6, 8]).await;

    let created = manager.auto_create(&booking_for(area_id, 2)).await.unwrap();

    assert_eq!(held_capacities(&pool, &created).await, vec![2]);
}

#[tokio::test]
async fn test_auto_create_prefers_banded_single() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[2, 4, 6, 8, 20]).await;

    // Band for 6 guests is [6, 9]
    let created = manager.auto_create(&booking_for(area_id, 6)).await.unwrap();

    assert_eq!(held_capacities(&pool, &created).await, vec![6]);
}

#[tokio::test]
async fn test_auto_create_combines_tables_for_large_party() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[2, 4, 6, 8]).await;

    // No single fits 12; first fitting pair is (4, 8)
    let created = manager.auto_create(&booking_for(area_id, 12)).await.unwrap();

    assert_eq!(held_capacities(&pool, &created).await, vec![4, 8]);
}

#[tokio::test]
async fn test_auto_create_distinguishes_full_from_too_small() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, _) = seed_floor(&pool, &[2, 4]).await;

    // Six guests fit on (2, 4), so the first booking lands
    manager.auto_create(&booking_for(area_id, 6)).await.unwrap();

    // The same window again: seatable in principle, taken in practice
    let err = manager.auto_create(&booking_for(area_id, 6)).await.unwrap_err();
    assert!(matches!(err, BookingError::NoAvailability(_)));

    // A different slot is still free, but no combination ever seats 15
    let mut big = booking_for(area_id, 15);
    big.slot_id = 9;
    let err = manager.auto_create(&big).await.unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded(_)));
}

// ========================================================================
//  Double-booking defense
// ========================================================================

#[tokio::test]
async fn test_same_tables_cannot_be_booked_twice() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4]).await;
    let input = booking_for(area_id, 4);

    manager.create(&input, &[tables[1]]).await.unwrap();

    // A second writer that read availability before the first commit
    let err = manager.create(&input, &[tables[1]]).await.unwrap_err();
    assert!(matches!(err, BookingError::ConcurrencyConflict(_)));
}

#[tokio::test]
async fn test_overlapping_selection_conflicts() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[2, 4, 6]).await;
    let input = booking_for(area_id, 6);

    manager.create(&input, &[tables[0], tables[1]]).await.unwrap();

    // Sharing even one table with the winner loses
    let err = manager
        .create(&input, &[tables[1], tables[2]])
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::ConcurrencyConflict(_)));

    // A disjoint selection is fine
    manager.create(&booking_for(area_id, 4), &[tables[2]]).await.unwrap();
}

#[tokio::test]
async fn test_auto_create_books_around_taken_tables() {
    let (manager, pool) = create_test_manager().await;
    let (area_id, tables) = seed_floor(&pool, &[4, 6]).await;
    let input = booking_for(area_id, 4);

    // Take the 4-top explicitly; auto then lands on the 6-top
    manager.create(&input, &[tables[0]]).await.unwrap();
    let second = manager.auto_create(&input).await.unwrap();

    assert_eq!(held_capacities(&pool, &second).await, vec![6]);
}
