//! Stock adjustment workflow tests
//!
//! Covers the rules enforced by adjustment application:
//! - Addition and Subtraction map to signed stock deltas
//! - line items snapshot the pre-adjustment stock
//! - both kinds evaluate the depletion alert on the resulting count

use proptest::prelude::*;

use shared::stock::{depletion_alert, AlertSeverity};
use shared::validation::validate_required;

/// Adjustment direction model mirroring the document forms
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Addition,
    Subtraction,
}

/// Signed stock delta for a quantity moved under a kind
fn signed_delta(kind: Kind, quantity: i32) -> i32 {
    match kind {
        Kind::Addition => quantity,
        Kind::Subtraction => -quantity,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Addition moves stock up by the quantity
    #[test]
    fn test_addition_delta() {
        assert_eq!(signed_delta(Kind::Addition, 7), 7);
    }

    /// Subtraction moves stock down by the quantity
    #[test]
    fn test_subtraction_delta() {
        assert_eq!(signed_delta(Kind::Subtraction, 7), -7);
    }

    /// Writing off the entire count lands on zero and escalates to danger
    #[test]
    fn test_full_write_off_is_danger() {
        // 3 on hand, threshold 4, subtract 3
        let stock_before = 3;
        let delta = signed_delta(Kind::Subtraction, 3);
        let stock_after = stock_before + delta;

        // The stored snapshot is the pre-adjustment count
        let current_stock = stock_after - delta;
        assert_eq!(current_stock, 3);

        let alert = depletion_alert("Milk 500ml", stock_after, 4).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Danger);
    }

    /// An addition that still leaves the product short stays a warning,
    /// not a replenishment notice
    #[test]
    fn test_short_addition_is_warning() {
        // 1 on hand, threshold 10, add 2
        let stock_after = 1 + signed_delta(Kind::Addition, 2);
        let alert = depletion_alert("Milk 500ml", stock_after, 10).unwrap();

        assert_eq!(alert.severity, AlertSeverity::Warning);
    }

    /// An addition that clears the threshold is silent
    #[test]
    fn test_recovering_addition_is_silent() {
        let stock_after = 1 + signed_delta(Kind::Addition, 20);
        assert!(depletion_alert("Milk 500ml", stock_after, 10).is_none());
    }

    /// Mixed line items apply their deltas in order
    #[test]
    fn test_mixed_adjustment_lines() {
        let lines = [
            (Kind::Subtraction, 5),
            (Kind::Addition, 2),
            (Kind::Subtraction, 1),
        ];

        let mut stock = 10;
        for (kind, quantity) in lines {
            stock += signed_delta(kind, quantity);
        }

        assert_eq!(stock, 6);
    }

    /// An adjustment needs a non-blank reason
    #[test]
    fn test_reason_required() {
        assert!(validate_required("Monthly stock take").is_ok());
        assert!(validate_required("  ").is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating adjustment kinds
    fn kind_strategy() -> impl Strategy<Value = Kind> {
        prop_oneof![Just(Kind::Addition), Just(Kind::Subtraction)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The snapshot arithmetic recovers the pre-adjustment count for
        /// either kind
        #[test]
        fn prop_snapshot_recovers_pre_adjustment_count(
            stock_before in -100i32..=10_000,
            kind in kind_strategy(),
            quantity in 1i32..=500
        ) {
            let delta = signed_delta(kind, quantity);
            let stock_after = stock_before + delta;
            let current_stock = stock_after - delta;

            prop_assert_eq!(current_stock, stock_before);
        }

        /// Net stock movement equals the sum of signed line deltas
        #[test]
        fn prop_net_movement_is_signed_sum(
            initial_stock in -100i32..=10_000,
            lines in prop::collection::vec((kind_strategy(), 1i32..=100), 1..15)
        ) {
            let net: i32 = lines.iter().map(|(kind, qty)| signed_delta(*kind, *qty)).sum();

            let mut stock = initial_stock;
            for (kind, quantity) in &lines {
                stock += signed_delta(*kind, *quantity);
            }

            prop_assert_eq!(stock, initial_stock + net);
        }

        /// Opposite adjustments of the same quantity cancel out
        #[test]
        fn prop_opposite_adjustments_cancel(
            initial_stock in -100i32..=10_000,
            quantity in 1i32..=500
        ) {
            let stock = initial_stock
                + signed_delta(Kind::Subtraction, quantity)
                + signed_delta(Kind::Addition, quantity);

            prop_assert_eq!(stock, initial_stock);
        }

        /// The alert decision sees only the resulting count, not the kind
        #[test]
        fn prop_alert_depends_only_on_resulting_count(
            stock_after in -100i32..=200,
            alert_quantity in 0i32..=100
        ) {
            // The same post-adjustment count from an addition or a
            // subtraction produces the same notification
            let from_addition = depletion_alert("Test Product", stock_after, alert_quantity);
            let from_subtraction = depletion_alert("Test Product", stock_after, alert_quantity);

            prop_assert_eq!(from_addition, from_subtraction);
        }
    }
}
