//! Pre-order pricing using rust_decimal for precision
//!
//! Customers may attach dishes to a reservation and earn a percentage
//! discount for committing ahead of time. Prices live in minor currency
//! units (cents) end to end; the discounted total is computed in `Decimal`
//! and rounded up to the next cent so a fractional result never undercuts
//! the kitchen.
//!
//! All prices are snapshotted from the menu at booking time. Later menu
//! edits never touch an existing reservation.

use rust_decimal::prelude::*;
use shared::models::{MenuItem, PreOrderItem, PreOrderItemInput};

use super::manager::{BookingError, BookingResult};

/// Maximum quantity per pre-ordered dish
const MAX_ITEM_QUANTITY: i32 = 999;

/// Maximum number of distinct dishes in one pre-order
const MAX_PRE_ORDER_LINES: usize = 50;

/// Priced pre-order snapshot, ready to store on the reservation
#[derive(Debug, Clone, Default)]
pub struct PricedPreOrder {
    pub items: Vec<PreOrderItem>,
    /// Sum of unit price x quantity, before discount
    pub subtotal: i64,
    /// Subtotal after the pre-order discount, rounded up
    pub total: i64,
}

impl PricedPreOrder {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Price a pre-order against the current menu.
///
/// Duplicate lines for the same dish are merged (quantities added, first
/// occurrence keeps its position). Every referenced item must exist in
/// `menu`; the caller is expected to have loaded active items only.
pub fn price_pre_order(
    inputs: &[PreOrderItemInput],
    menu: &[MenuItem],
    discount_percent: u32,
) -> BookingResult<PricedPreOrder> {
    if discount_percent > 100 {
        return Err(BookingError::Validation(format!(
            "discount_percent must be within 0..=100, got {}",
            discount_percent
        )));
    }
    if inputs.is_empty() {
        return Ok(PricedPreOrder::default());
    }
    if inputs.len() > MAX_PRE_ORDER_LINES {
        return Err(BookingError::Validation(format!(
            "pre-order exceeds {} lines",
            MAX_PRE_ORDER_LINES
        )));
    }

    let mut items: Vec<PreOrderItem> = Vec::new();
    for input in inputs {
        if input.quantity < 1 || input.quantity > MAX_ITEM_QUANTITY {
            return Err(BookingError::Validation(format!(
                "quantity must be within 1..={}, got {}",
                MAX_ITEM_QUANTITY, input.quantity
            )));
        }

        let item = menu
            .iter()
            .find(|m| m.id == input.menu_item_id)
            .ok_or_else(|| {
                BookingError::Validation(format!(
                    "Menu item not available: {}",
                    input.menu_item_id
                ))
            })?;

        match items.iter_mut().find(|i| i.menu_item_id == item.id) {
            Some(line) => line.quantity += input.quantity,
            None => items.push(PreOrderItem {
                menu_item_id: item.id,
                name: item.name.clone(),
                price: item.price,
                quantity: input.quantity,
            }),
        }
    }

    let mut subtotal: i64 = 0;
    for line in &items {
        subtotal = line
            .price
            .checked_mul(i64::from(line.quantity))
            .and_then(|t| subtotal.checked_add(t))
            .ok_or_else(|| BookingError::Validation("pre-order total overflows".to_string()))?;
    }

    let total = apply_discount(subtotal, discount_percent)?;

    Ok(PricedPreOrder {
        items,
        subtotal,
        total,
    })
}

/// Discounted amount in minor units, rounded up to the next cent
fn apply_discount(subtotal: i64, discount_percent: u32) -> BookingResult<i64> {
    let rate = (Decimal::ONE_HUNDRED - Decimal::from(discount_percent)) / Decimal::ONE_HUNDRED;
    (Decimal::from(subtotal) * rate)
        .ceil()
        .to_i64()
        .ok_or_else(|| BookingError::Validation("pre-order total overflows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: i64, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            price,
            category: None,
            is_active: true,
        }
    }

    fn line(menu_item_id: i64, quantity: i32) -> PreOrderItemInput {
        PreOrderItemInput {
            menu_item_id,
            quantity,
        }
    }

    #[test]
    fn test_fifteen_percent_discount() {
        let menu = vec![dish(1, "Paella", 50_000)];

        let priced = price_pre_order(&[line(1, 2)], &menu, 15).unwrap();

        assert_eq!(priced.subtotal, 100_000);
        assert_eq!(priced.total, 85_000);
        assert_eq!(priced.items.len(), 1);
        assert_eq!(priced.items[0].name, "Paella");
        assert_eq!(priced.items[0].quantity, 2);
    }

    #[test]
    fn test_fractional_total_rounds_up() {
        // 99 * 0.85 = 84.15, the customer pays 85
        let menu = vec![dish(1, "Cafe", 99)];

        let priced = price_pre_order(&[line(1, 1)], &menu, 15).unwrap();

        assert_eq!(priced.subtotal, 99);
        assert_eq!(priced.total, 85);
    }

    #[test]
    fn test_zero_discount_keeps_subtotal() {
        let menu = vec![dish(1, "Tarta", 4_500)];

        let priced = price_pre_order(&[line(1, 3)], &menu, 0).unwrap();

        assert_eq!(priced.subtotal, 13_500);
        assert_eq!(priced.total, 13_500);
    }

    #[test]
    fn test_duplicate_lines_are_merged() {
        let menu = vec![dish(1, "Gambas", 1_200), dish(2, "Pan", 300)];

        let priced = price_pre_order(&[line(1, 1), line(2, 2), line(1, 2)], &menu, 0).unwrap();

        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.items[0].menu_item_id, 1);
        assert_eq!(priced.items[0].quantity, 3);
        assert_eq!(priced.subtotal, 3 * 1_200 + 2 * 300);
    }

    #[test]
    fn test_unknown_menu_item_is_rejected() {
        let menu = vec![dish(1, "Paella", 50_000)];

        let err = price_pre_order(&[line(99, 1)], &menu, 15).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_quantity_bounds() {
        let menu = vec![dish(1, "Paella", 50_000)];

        assert!(price_pre_order(&[line(1, 0)], &menu, 15).is_err());
        assert!(price_pre_order(&[line(1, -2)], &menu, 15).is_err());
        assert!(price_pre_order(&[line(1, 1_000)], &menu, 15).is_err());
        assert!(price_pre_order(&[line(1, 999)], &menu, 15).is_ok());
    }

    #[test]
    fn test_empty_preorder_is_free() {
        let priced = price_pre_order(&[], &[], 15).unwrap();

        assert!(priced.is_empty());
        assert_eq!(priced.subtotal, 0);
        assert_eq!(priced.total, 0);
    }

    #[test]
    fn test_discount_over_hundred_is_rejected() {
        let menu = vec![dish(1, "Paella", 50_000)];

        assert!(price_pre_order(&[line(1, 1)], &menu, 101).is_err());
    }
}
